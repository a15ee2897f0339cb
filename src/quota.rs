//! Daily request quota per identity.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::account::Account;
use crate::clock::Clock;
use crate::store::{AccountStore, QueuedStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaError {
    MissingIdentity,
    NotFound(String),
    Store(StoreError),
}

impl fmt::Display for QuotaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotaError::MissingIdentity => write!(f, "email missing"),
            QuotaError::NotFound(_) => write!(f, "User not found"),
            QuotaError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for QuotaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuotaError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for QuotaError {
    fn from(err: StoreError) -> Self {
        QuotaError::Store(err)
    }
}

/// Tracks how many completions each identity has used today.
///
/// A stored day other than today resets the counter before anything else
/// is evaluated.
pub struct QuotaTracker<S> {
    store: Arc<QueuedStore<S>>,
    clock: Arc<dyn Clock>,
}

impl<S: AccountStore> QuotaTracker<S> {
    pub fn new(store: Arc<QueuedStore<S>>, clock: Arc<dyn Clock>) -> Self {
        QuotaTracker { store, clock }
    }

    /// Requests left today for a known identity.
    pub fn remaining(&self, identity: &str) -> Result<u32, QuotaError> {
        if identity.is_empty() {
            return Err(QuotaError::MissingIdentity);
        }
        let today = self.clock.today();

        self.store.transact(|accounts| {
            let account = accounts
                .get_mut(identity)
                .ok_or_else(|| QuotaError::NotFound(identity.to_string()))?;
            if account.roll_over(today) {
                debug!(identity, %today, "quota rolled over");
            }
            Ok(account.remaining())
        })
    }

    /// Use one request from today's quota.
    ///
    /// Unknown identities get a credential-less account on first use.
    /// Returns `false`, leaving the store untouched, once the limit is hit.
    pub fn consume(&self, identity: &str) -> Result<bool, QuotaError> {
        if identity.is_empty() {
            return Err(QuotaError::MissingIdentity);
        }
        let today = self.clock.today();

        self.store.transact(|accounts| {
            let account = accounts
                .entry(identity.to_string())
                .or_insert_with(|| Account::anonymous(today));
            account.roll_over(today);

            if account.is_exhausted() {
                return Ok(false);
            }
            account.request_count += 1;
            debug!(identity, used = account.request_count, "quota consumed");
            Ok(true)
        })
    }
}
