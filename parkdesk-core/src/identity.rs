use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

/// The authenticated operator, as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub uid: String,
}

impl Session {
    /// The provider reports bare account facts; the admin surface only has
    /// one operator role, so the rest is fixed.
    pub fn admin(email: &str, uid: &str) -> Self {
        Self {
            email: email.to_string(),
            display_name: "Admin".to_string(),
            role: "admin".to_string(),
            uid: uid.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("identity provider unreachable: {source}")]
    ProviderUnreachable {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("sign-out failed: {source}")]
    SignOut {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// External identity provider seam.
///
/// `subscribe` yields the provider's session-change stream; the receiver's
/// initial value is whatever the provider last reported (none before the
/// first report).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}

/// In-process provider with a fixed credential table. Used by tests and
/// local development; `set_offline` simulates an unreachable provider.
pub struct StaticIdentityProvider {
    accounts: Vec<StaticAccount>,
    offline: AtomicBool,
    tx: watch::Sender<Option<Session>>,
}

struct StaticAccount {
    email: String,
    password: String,
    uid: String,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            accounts: Vec::new(),
            offline: AtomicBool::new(false),
            tx,
        }
    }

    pub fn with_account(mut self, email: &str, password: &str, uid: &str) -> Self {
        self.accounts.push(StaticAccount {
            email: email.to_string(),
            password: password.to_string(),
            uid: uid.to_string(),
        });
        self
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn unreachable() -> AuthError {
        AuthError::ProviderUnreachable {
            source: "identity provider offline".into(),
        }
    }
}

impl Default for StaticIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(Self::unreachable());
        }

        let account = self
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let session = Session::admin(&account.email, &account.uid);
        let _ = self.tx.send(Some(session.clone()));
        tracing::info!("Operator signed in: {}", session.email);
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AuthError::SignOut {
                source: "identity provider offline".into(),
            });
        }

        let _ = self.tx.send(None);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}
