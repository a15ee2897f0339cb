//! Quota-gated forwarding of questions to the completion API.

use std::fmt;
use std::sync::Arc;

use tracing::{error, info};

use crate::account::DAILY_LIMIT;
use crate::completion::{CompletionClient, CompletionError};
use crate::quota::{QuotaError, QuotaTracker};
use crate::store::AccountStore;

#[derive(Debug)]
pub enum AskError {
    MissingFields,
    /// Today's quota is used up; no outbound call was made.
    QuotaExceeded,
    Quota(QuotaError),
    /// The outbound call failed. Display never includes the cause.
    Upstream(CompletionError),
}

impl fmt::Display for AskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AskError::MissingFields => write!(f, "email/question missing"),
            AskError::QuotaExceeded => write!(f, "Daily limit reached ({})", DAILY_LIMIT),
            AskError::Quota(e) => write!(f, "{}", e),
            AskError::Upstream(_) => write!(f, "AI request failed"),
        }
    }
}

impl std::error::Error for AskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AskError::Quota(e) => Some(e),
            AskError::Upstream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<QuotaError> for AskError {
    fn from(err: QuotaError) -> Self {
        AskError::Quota(err)
    }
}

pub struct CompletionGateway<S> {
    quota: Arc<QuotaTracker<S>>,
    client: Arc<dyn CompletionClient>,
}

impl<S: AccountStore> CompletionGateway<S> {
    pub fn new(quota: Arc<QuotaTracker<S>>, client: Arc<dyn CompletionClient>) -> Self {
        CompletionGateway { quota, client }
    }

    /// Charge one request to `identity` and forward `question`.
    ///
    /// The quota is charged before the call and is not refunded when the
    /// call fails.
    pub async fn ask(&self, identity: &str, question: &str) -> Result<String, AskError> {
        if identity.is_empty() || question.is_empty() {
            return Err(AskError::MissingFields);
        }
        if !self.quota.consume(identity)? {
            info!(identity, "daily limit reached");
            return Err(AskError::QuotaExceeded);
        }

        match self.client.complete(question).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                error!(identity, error = %e, "completion request failed");
                Err(AskError::Upstream(e))
            }
        }
    }
}
