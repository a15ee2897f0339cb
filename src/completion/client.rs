use std::fmt;

use async_trait::async_trait;

/// Failure of a single outbound completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// The request never produced a response (connect, TLS, timeout).
    Transport(String),
    /// The API answered with a non-success status.
    Status { status: u16, body: String },
    /// The response did not contain a first choice with text content.
    MalformedResponse(String),
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionError::Transport(msg) => write!(f, "transport error: {}", msg),
            CompletionError::Status { status, body } => {
                write!(f, "completion API returned {}: {}", status, body)
            }
            CompletionError::MalformedResponse(msg) => {
                write!(f, "unexpected completion response: {}", msg)
            }
        }
    }
}

impl std::error::Error for CompletionError {}

/// Turns a prompt into generated text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `prompt` as the only user message and return the first answer.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
