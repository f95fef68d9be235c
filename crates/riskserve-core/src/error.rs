//! Error types for riskserve

/// Result type alias using riskserve's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for riskserve operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or mis-sized raw input
    #[error("validation error: {0}")]
    Validation(String),

    /// The preprocessing transform rejected the record
    #[error("preprocessing error: {0}")]
    Preprocessing(String),

    /// Classifier failure or any other fault during the transform/classify pair
    #[error("inference error: {0}")]
    Inference(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Timeout errors
    #[error("operation timed out")]
    Timeout,
}

impl Error {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a validation error for an input arity mismatch
    pub fn arity(expected: usize, got: usize) -> Self {
        Self::Validation(format!("expected {expected} input values, got {got}"))
    }

    /// Create a new preprocessing error
    pub fn preprocessing(msg: impl Into<String>) -> Self {
        Self::Preprocessing(msg.into())
    }

    /// Create a new inference error
    pub fn inference(msg: impl Into<String>) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
