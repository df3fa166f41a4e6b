//! Error types for statement reconstruction.

use thiserror::Error;

/// Result type for reconstruction operations.
pub type Result<T> = std::result::Result<T, ReconstructionError>;

/// Errors that can occur during reconstruction.
///
/// Missing facts are never an error; they surface as absent line items.
#[derive(Debug, Error)]
pub enum ReconstructionError {
    /// Fiscal-year-end month outside 1..=12
    #[error("Invalid fiscal year end month: {0} (expected 1-12)")]
    InvalidFiscalYearEndMonth(u32),

    /// A record cap of zero
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
