//! Error types for the TrueGuard engine
//!
//! This module provides comprehensive error handling using thiserror for
//! structured error definitions and anyhow for error propagation.

use thiserror::Error;

/// Main error type for TrueGuard operations
#[derive(Error, Debug)]
pub enum TrueGuardError {
    /// Submission rejected locally: neither text nor photo present
    #[error("Мәтін немесе фото керек")]
    EmptySubmission,

    /// Submission rejected locally: an analyze call is already in flight
    #[error("Analysis already in progress")]
    AnalysisPending,

    /// Network-level failure reaching the analyze backend
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend error: {0}")]
    Backend(String),

    /// Backend answered, but the payload was not the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl TrueGuardError {
    /// Whether this error should surface as a local validation failure
    /// (no backend call was made) rather than a transport failure.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            TrueGuardError::EmptySubmission | TrueGuardError::AnalysisPending
        )
    }
}

/// Result type alias for TrueGuard operations
pub type Result<T> = std::result::Result<T, TrueGuardError>;

/// Convert anyhow::Error to TrueGuardError
impl From<anyhow::Error> for TrueGuardError {
    fn from(err: anyhow::Error) -> Self {
        TrueGuardError::Other(err.to_string())
    }
}
