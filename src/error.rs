//! Error types for safe-dao

use thiserror::Error;

/// Result type alias for safe-dao operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while planning a DAO deployment
///
/// Every variant is fatal to the planning pass that raised it. A failed
/// [`Error::ExternalRead`] may be retried by re-running the whole plan.
#[derive(Debug, Error)]
pub enum Error {
    /// A required address or parameter is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A module's predicted address was requested before prediction
    #[error("{module} address has not been predicted yet")]
    NotYetPredicted { module: &'static str },

    /// A module's initializer was requested before it was computed
    #[error("{module} initializer has not been computed yet")]
    NotYetInitialized { module: &'static str },

    /// A write-once module field was written twice
    #[error("{module} is already {state}")]
    AlreadyInitialized {
        module: &'static str,
        state: &'static str,
    },

    /// Reading an on-chain constant failed
    #[error("Failed to read {what}: {reason}")]
    ExternalRead { what: &'static str, reason: String },

    /// The descriptor names a strategy or freeze voting kind that cannot be built
    #[error("Unsupported variant: {0}")]
    UnsupportedVariant(String),

    /// ABI decoding error
    #[error("ABI error: {0}")]
    Abi(String),
}

impl Error {
    /// Shorthand for a [`Error::Configuration`] error
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Configuration(reason.into())
    }
}

impl From<alloy::sol_types::Error> for Error {
    fn from(err: alloy::sol_types::Error) -> Self {
        Error::Abi(err.to_string())
    }
}
