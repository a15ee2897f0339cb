use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completions an identity may consume per calendar day.
pub const DAILY_LIMIT: u32 = 25;

/// Every account record, keyed by identity.
pub type Accounts = BTreeMap<String, Account>;

/// One persisted account: credential reference plus daily quota state.
///
/// Field names on disk are `password`, `count` and `last`, so documents
/// written by earlier deployments of the service load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Argon2 PHC string, or a legacy plaintext secret awaiting upgrade.
    /// Absent for accounts created lazily by a quota check.
    #[serde(rename = "password", default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    /// Completions consumed on `last_reset`.
    #[serde(rename = "count", default)]
    pub request_count: u32,
    /// Day the counter was last reset.
    #[serde(rename = "last")]
    pub last_reset: NaiveDate,
}

impl Account {
    /// A registered account with a fresh quota.
    pub fn registered(credential: String, today: NaiveDate) -> Self {
        Account {
            credential: Some(credential),
            request_count: 0,
            last_reset: today,
        }
    }

    /// An account without a credential, created on first quota use.
    pub fn anonymous(today: NaiveDate) -> Self {
        Account {
            credential: None,
            request_count: 0,
            last_reset: today,
        }
    }

    /// Reset the counter if `today` is a different day than the last reset.
    ///
    /// Returns `true` when the record changed and must be persisted.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.last_reset == today {
            return false;
        }
        self.last_reset = today;
        self.request_count = 0;
        true
    }

    /// Requests left today, floored at zero.
    pub fn remaining(&self) -> u32 {
        DAILY_LIMIT.saturating_sub(self.request_count)
    }

    pub fn is_exhausted(&self) -> bool {
        self.request_count >= DAILY_LIMIT
    }
}
