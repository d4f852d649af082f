use std::fmt;

/// Unified error type for the activity-explorer bridge.
#[derive(Debug, Clone)]
pub enum BridgeError {
    /// Method name not recognised by the dispatch layer.
    NotImplemented,
    /// Invalid input provided by the caller.
    InvalidInput(String),
    /// Platform call failed.
    Internal(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::NotImplemented => write!(f, "not implemented"),
            BridgeError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            BridgeError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for BridgeError {}

/// Result type alias using [`BridgeError`].
pub type BridgeResult<T> = Result<T, BridgeError>;
