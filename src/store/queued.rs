use std::sync::Mutex;

use super::{AccountStore, StoreError};
use crate::account::Accounts;

/// Serializes access to an [`AccountStore`].
///
/// The store rewrites the whole document on every change, so two unguarded
/// read-modify-write cycles lose an update even when they touch different
/// identities. Every [`transact`](QueuedStore::transact) call holds one
/// store-wide lock from load to save.
pub struct QueuedStore<S> {
    inner: S,
    queue: Mutex<()>,
}

impl<S: AccountStore> QueuedStore<S> {
    pub fn new(inner: S) -> Self {
        QueuedStore {
            inner,
            queue: Mutex::new(()),
        }
    }

    /// Access the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Load a snapshot of every account.
    pub fn snapshot(&self) -> Result<Accounts, StoreError> {
        let _guard = self
            .queue
            .lock()
            .map_err(|_| StoreError::LockPoisoned("snapshot"))?;
        self.inner.load()
    }

    /// Run `f` against the loaded accounts and persist the result.
    ///
    /// The document is saved only when `f` succeeds and actually changed
    /// something; an error from `f` discards its changes.
    pub fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Accounts) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self
            .queue
            .lock()
            .map_err(|_| StoreError::LockPoisoned("transact"))?;

        let before = self.inner.load()?;
        let mut accounts = before.clone();
        let value = f(&mut accounts)?;
        if accounts != before {
            self.inner.save(&accounts)?;
        }
        Ok(value)
    }
}
