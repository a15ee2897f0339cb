use std::sync::Arc;

use crate::auth::AuthService;
use crate::clock::Clock;
use crate::completion::CompletionClient;
use crate::gateway::CompletionGateway;
use crate::quota::QuotaTracker;
use crate::store::{AccountStore, QueuedStore};

/// Shared state behind every command handler.
///
/// All components see the same [`QueuedStore`], so the register, quota
/// and ask paths are serialized against one another.
pub struct App<S> {
    store: Arc<QueuedStore<S>>,
    auth: AuthService<S>,
    quota: Arc<QuotaTracker<S>>,
    gateway: CompletionGateway<S>,
}

impl<S: AccountStore> App<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>, client: Arc<dyn CompletionClient>) -> Self {
        let store = Arc::new(QueuedStore::new(store));
        let quota = Arc::new(QuotaTracker::new(store.clone(), clock.clone()));
        App {
            auth: AuthService::new(store.clone(), clock),
            gateway: CompletionGateway::new(quota.clone(), client),
            quota,
            store,
        }
    }

    pub fn store(&self) -> &QueuedStore<S> {
        &self.store
    }

    pub fn auth(&self) -> &AuthService<S> {
        &self.auth
    }

    pub fn quota(&self) -> &QuotaTracker<S> {
        &self.quota
    }

    pub fn gateway(&self) -> &CompletionGateway<S> {
        &self.gateway
    }
}
