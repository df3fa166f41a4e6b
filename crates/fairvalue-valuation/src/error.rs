//! Error types for valuation.

use thiserror::Error;

/// Errors raised by the valuation engine.
///
/// Missing financial inputs are not errors: estimators downgrade their
/// confidence and flag the absent input instead.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// Configuration rejected by [`ValuationConfig::validate`](crate::ValuationConfig::validate)
    #[error("invalid valuation config: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for valuation operations.
pub type Result<T> = std::result::Result<T, ValuationError>;
