//! Error types for microsvc command handlers.

use std::error::Error;
use std::fmt;

use crate::auth::AuthError;
use crate::gateway::AskError;
use crate::quota::QuotaError;
use crate::store::StoreError;

/// Error type for command handler operations.
///
/// `Display` is the message returned to callers, so server-side details
/// (store paths, upstream responses) never appear in it.
#[derive(Debug)]
pub enum HandlerError {
    /// No handler registered for this command name.
    UnknownCommand(String),
    /// Payload is not JSON or does not match the handler's input type.
    DecodeFailed(String),
    /// Guard rejected the command (required field missing or empty).
    GuardRejected(String),
    /// A required field was empty after decoding.
    MissingFields(String),
    /// Resource already exists.
    Conflict(String),
    /// Bad credentials.
    Unauthorized(String),
    /// Resource not found.
    NotFound(String),
    /// Daily quota used up.
    QuotaExceeded(String),
    /// Outbound completion call failed.
    Upstream(String),
    /// Account store failure.
    Store(Box<dyn Error + Send + Sync>),
    /// Other error.
    Other(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::UnknownCommand(name) => write!(f, "unknown command: {}", name),
            HandlerError::DecodeFailed(msg) => write!(f, "invalid request body: {}", msg),
            HandlerError::GuardRejected(name) => write!(f, "{}: required fields missing", name),
            HandlerError::MissingFields(msg)
            | HandlerError::Conflict(msg)
            | HandlerError::Unauthorized(msg)
            | HandlerError::NotFound(msg)
            | HandlerError::QuotaExceeded(msg)
            | HandlerError::Upstream(msg) => write!(f, "{}", msg),
            HandlerError::Store(_) | HandlerError::Other(_) => write!(f, "internal error"),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Store(e) | HandlerError::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl From<StoreError> for HandlerError {
    fn from(err: StoreError) -> Self {
        HandlerError::Store(Box::new(err))
    }
}

impl From<AuthError> for HandlerError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::MissingFields => HandlerError::MissingFields(message),
            AuthError::Conflict(_) => HandlerError::Conflict(message),
            AuthError::Unauthorized => HandlerError::Unauthorized(message),
            AuthError::Hash(e) => HandlerError::Other(Box::new(e)),
            AuthError::Task(msg) => HandlerError::Other(msg.into()),
            AuthError::Store(e) => e.into(),
        }
    }
}

impl From<QuotaError> for HandlerError {
    fn from(err: QuotaError) -> Self {
        let message = err.to_string();
        match err {
            QuotaError::MissingIdentity => HandlerError::MissingFields(message),
            QuotaError::NotFound(_) => HandlerError::NotFound(message),
            QuotaError::Store(e) => e.into(),
        }
    }
}

impl From<AskError> for HandlerError {
    fn from(err: AskError) -> Self {
        let message = err.to_string();
        match err {
            AskError::MissingFields => HandlerError::MissingFields(message),
            AskError::QuotaExceeded => HandlerError::QuotaExceeded(message),
            AskError::Quota(e) => e.into(),
            AskError::Upstream(_) => HandlerError::Upstream(message),
        }
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::MissingFields(_) => 400,
            // Duplicate registration is reported as a bad request.
            HandlerError::Conflict(_) => 400,
            HandlerError::Unauthorized(_) => 401,
            HandlerError::NotFound(_) => 404,
            HandlerError::QuotaExceeded(_) => 403,
            HandlerError::Upstream(_) => 500,
            HandlerError::Store(_) => 500,
            HandlerError::Other(_) => 500,
        }
    }
}
