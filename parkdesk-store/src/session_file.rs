use parkdesk_core::{Session, SessionCache};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::warn;

/// File-backed session cache: the admin shell's analogue of browser local
/// storage. Read as a fallback before the identity provider has reported
/// state, cleared on logout. A missing or corrupt file means "no session".
pub struct FileSessionCache {
    path: PathBuf,
}

impl FileSessionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionCache for FileSessionCache {
    fn load(&self) -> Option<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return None,
            Err(err) => {
                warn!("Failed to read session cache {}: {}", self.path.display(), err);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(
                    "Discarding corrupt session cache {}: {}",
                    self.path.display(),
                    err
                );
                None
            }
        }
    }

    fn store(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(raw) => {
                if let Err(err) = fs::write(&self.path, raw) {
                    warn!("Failed to write session cache {}: {}", self.path.display(), err);
                }
            }
            Err(err) => warn!("Failed to encode session for cache: {}", err),
        }
    }

    fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != ErrorKind::NotFound {
                warn!("Failed to clear session cache {}: {}", self.path.display(), err);
            }
        }
    }
}
