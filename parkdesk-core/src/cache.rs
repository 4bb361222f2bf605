use crate::identity::Session;
use std::sync::Mutex;

/// Local persistence of the last-known session, read as a fallback while the
/// identity provider has not yet reported state. Implementations are
/// best-effort and log failures instead of surfacing them; the provider
/// remains the source of truth.
pub trait SessionCache: Send + Sync {
    fn load(&self) -> Option<Session>;

    fn store(&self, session: &Session);

    fn clear(&self);
}

/// In-memory cache for tests.
#[derive(Default)]
pub struct MemorySessionCache {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionCache for MemorySessionCache {
    fn load(&self) -> Option<Session> {
        self.slot.lock().map(|slot| slot.clone()).unwrap_or(None)
    }

    fn store(&self, session: &Session) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(session.clone());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}
