use crate::account::Accounts;
use super::StoreError;

/// Whole-document account persistence.
///
/// Implementations never surface a corrupted document to callers: malformed
/// content is replaced with an empty mapping and reported through logging.
pub trait AccountStore: Send + Sync + 'static {
    /// Read every account record.
    fn load(&self) -> Result<Accounts, StoreError>;

    /// Replace the stored document with `accounts`.
    fn save(&self, accounts: &Accounts) -> Result<(), StoreError>;
}
