use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    LockPoisoned(&'static str),
    Io { path: String, message: String },
    Encode(String),
}

impl StoreError {
    pub(crate) fn io(path: &Path, err: impl fmt::Display) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "account store lock poisoned during {}", operation)
            }
            StoreError::Io { path, message } => {
                write!(f, "account store i/o error at {}: {}", path, message)
            }
            StoreError::Encode(message) => write!(f, "account store encode error: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Encode(err.to_string())
    }
}
