use crate::directory::DirectoryService;
use crate::passes::PassBoard;
use crate::records::RecordService;
use crate::session::SessionManager;
use parkdesk_core::{DocumentStore, IdentityProvider, SessionCache};
use parkdesk_pass::PassService;
use parkdesk_store::{Config, DocPassRepository, FileSessionCache};
use std::sync::Arc;

/// Everything the rendering layer needs, wired once at startup.
pub struct AdminState {
    pub sessions: Arc<SessionManager>,
    pub records: Arc<RecordService>,
    pub directory: Arc<DirectoryService>,
    pub passes: Arc<PassBoard>,
    pub pass_service: Arc<PassService>,
}

impl AdminState {
    /// Must be called from within a Tokio runtime (the session manager
    /// spawns its provider listener).
    pub fn new(
        config: &Config,
        store: Arc<dyn DocumentStore>,
        provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        let cache: Arc<dyn SessionCache> =
            Arc::new(FileSessionCache::new(config.cache.session_file.clone()));
        Self::with_cache(config, store, provider, cache)
    }

    pub fn with_cache(
        config: &Config,
        store: Arc<dyn DocumentStore>,
        provider: Arc<dyn IdentityProvider>,
        cache: Arc<dyn SessionCache>,
    ) -> Self {
        let repo = Arc::new(DocPassRepository::new(store.clone()));

        Self {
            sessions: SessionManager::new(provider, cache, config.auth.clone()),
            records: Arc::new(RecordService::new(store.clone(), config.rules.clone())),
            directory: Arc::new(DirectoryService::new(store)),
            passes: Arc::new(PassBoard::new(repo.clone())),
            pass_service: Arc::new(PassService::new(repo)),
        }
    }
}
