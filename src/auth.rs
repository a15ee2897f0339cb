//! Registration and credential checks against the account store.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::account::Account;
use crate::clock::Clock;
use crate::credential::{self, HashError, Verification};
use crate::store::{AccountStore, QueuedStore, StoreError};

#[derive(Debug)]
pub enum AuthError {
    /// Identity or credential missing or empty.
    MissingFields,
    /// An account already exists for this identity.
    Conflict(String),
    /// Unknown identity or wrong credential; the two are not distinguished.
    Unauthorized,
    Hash(HashError),
    Store(StoreError),
    /// The blocking hash task panicked or was cancelled.
    Task(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingFields => write!(f, "email/password missing"),
            AuthError::Conflict(_) => write!(f, "User already exists"),
            AuthError::Unauthorized => write!(f, "Invalid credentials"),
            AuthError::Hash(e) => write!(f, "{}", e),
            AuthError::Store(e) => write!(f, "{}", e),
            AuthError::Task(msg) => write!(f, "credential task failed: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Hash(e) => Some(e),
            AuthError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Store(err)
    }
}

impl From<HashError> for AuthError {
    fn from(err: HashError) -> Self {
        AuthError::Hash(err)
    }
}

pub struct AuthService<S> {
    store: Arc<QueuedStore<S>>,
    clock: Arc<dyn Clock>,
}

impl<S: AccountStore> AuthService<S> {
    pub fn new(store: Arc<QueuedStore<S>>, clock: Arc<dyn Clock>) -> Self {
        AuthService { store, clock }
    }

    /// Create an account with a fresh daily quota.
    pub async fn register(&self, identity: &str, secret: &str) -> Result<(), AuthError> {
        if identity.is_empty() || secret.is_empty() {
            return Err(AuthError::MissingFields);
        }

        // Hashed before the store lock is taken.
        let secret = secret.to_string();
        let hashed = blocking(move || credential::hash(&secret)).await??;
        let today = self.clock.today();

        self.store.transact(|accounts| {
            if accounts.contains_key(identity) {
                return Err(AuthError::Conflict(identity.to_string()));
            }
            accounts.insert(identity.to_string(), Account::registered(hashed, today));
            Ok(())
        })?;

        info!(identity, "account registered");
        Ok(())
    }

    /// Check `secret` against the stored credential for `identity`.
    ///
    /// Unknown identities cost the same hash work as known ones. A legacy
    /// plaintext credential that matches is rehashed in place.
    pub async fn login(&self, identity: &str, secret: &str) -> Result<(), AuthError> {
        if identity.is_empty() || secret.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let stored = self
            .store
            .snapshot()?
            .get(identity)
            .and_then(|account| account.credential.clone());
        let claimed = secret.to_string();
        let verification = blocking(move || match stored {
            Some(stored) => credential::verify(&claimed, &stored),
            None => credential::reject(&claimed),
        })
        .await?;

        match verification {
            Verification::Mismatch => Err(AuthError::Unauthorized),
            Verification::Match => Ok(()),
            Verification::NeedsUpgrade => {
                self.upgrade(identity, secret).await;
                Ok(())
            }
        }
    }

    async fn upgrade(&self, identity: &str, secret: &str) {
        let secret = secret.to_string();
        let result = match blocking(move || credential::hash(&secret)).await {
            Ok(Ok(hashed)) => self.store.transact(|accounts| {
                if let Some(account) = accounts.get_mut(identity) {
                    account.credential = Some(hashed);
                }
                Ok::<_, AuthError>(())
            }),
            Ok(Err(e)) => Err(e.into()),
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => info!(identity, "legacy credential upgraded to argon2"),
            Err(e) => warn!(identity, error = %e, "could not upgrade legacy credential"),
        }
    }
}

/// Run Argon2 work on the blocking pool so request handling keeps moving.
async fn blocking<T, F>(f: F) -> Result<T, AuthError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthError::Task(e.to_string()))
}
