use parkdesk_core::{AuthError, IdentityProvider, Session, SessionCache};
use parkdesk_store::app_config::AuthConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, warn};

/// Holds the current operator identity, derived from the identity
/// provider's event stream with a local cache fallback for the window
/// before the provider has reported state.
pub struct SessionManager {
    provider: Arc<dyn IdentityProvider>,
    cache: Arc<dyn SessionCache>,
    fallback: AuthConfig,
    state: watch::Sender<Option<Session>>,
    provider_reported: Arc<AtomicBool>,
}

impl SessionManager {
    /// Must be called from within a Tokio runtime: the manager spawns a
    /// listener mirroring provider events into its own state and the cache.
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        cache: Arc<dyn SessionCache>,
        fallback: AuthConfig,
    ) -> Arc<Self> {
        let (state, _) = watch::channel(None);
        let manager = Arc::new(Self {
            provider,
            cache,
            fallback,
            state,
            provider_reported: Arc::new(AtomicBool::new(false)),
        });
        manager.clone().spawn_listener();
        manager
    }

    fn spawn_listener(self: Arc<Self>) {
        let mut events = self.provider.subscribe();
        tokio::spawn(async move {
            while events.changed().await.is_ok() {
                let session = events.borrow_and_update().clone();
                self.provider_reported.store(true, Ordering::SeqCst);
                match &session {
                    Some(s) => self.cache.store(s),
                    None => self.cache.clear(),
                }
                let _ = self.state.send(session);
            }
        });
    }

    /// Provider-reported state, falling back to the cached session while
    /// the provider has not reported yet.
    pub fn current_session(&self) -> Option<Session> {
        if let Some(session) = self.state.borrow().clone() {
            return Some(session);
        }
        if !self.provider_reported.load(Ordering::SeqCst) {
            return self.cache.load();
        }
        None
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_session().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }

    /// Delegates to the identity provider. When the provider is unreachable
    /// (never on rejected credentials) and the configured fallback gate is
    /// on, the fixed operator pair yields a locally synthesized session.
    /// The fallback is a compatibility shim, not an authorization mechanism.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        match self.provider.sign_in(email, password).await {
            Ok(session) => {
                self.accept(session.clone());
                Ok(session)
            }
            Err(AuthError::ProviderUnreachable { source }) => {
                if self.fallback_matches(email, password) {
                    warn!(
                        "Identity provider unreachable, using fallback operator login: {}",
                        source
                    );
                    let session = Session::admin(email, "local-admin");
                    self.accept(session.clone());
                    Ok(session)
                } else {
                    Err(AuthError::ProviderUnreachable { source })
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Provider sign-out failures are logged; local session state and the
    /// cache clear regardless.
    pub async fn logout(&self) {
        if let Err(err) = self.provider.sign_out().await {
            error!("Error signing out: {}", err);
        }
        self.cache.clear();
        let _ = self.state.send(None);
    }

    fn fallback_matches(&self, email: &str, password: &str) -> bool {
        self.fallback.fallback_login
            && self.fallback.fallback_email.as_deref() == Some(email)
            && self.fallback.fallback_password.as_deref() == Some(password)
    }

    fn accept(&self, session: Session) {
        self.cache.store(&session);
        let _ = self.state.send(Some(session));
    }
}
