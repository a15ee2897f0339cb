use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use super::{AccountStore, StoreError};
use crate::account::Accounts;

/// Account store held in process memory. Counts saves so callers can
/// assert that an operation did not write.
pub struct InMemoryStore {
    accounts: RwLock<Accounts>,
    saves: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_accounts(Accounts::new())
    }

    pub fn with_accounts(accounts: Accounts) -> Self {
        InMemoryStore {
            accounts: RwLock::new(accounts),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of completed `save` calls.
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for InMemoryStore {
    fn load(&self) -> Result<Accounts, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(accounts.clone())
    }

    fn save(&self, accounts: &Accounts) -> Result<(), StoreError> {
        let mut stored = self
            .accounts
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        *stored = accounts.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
