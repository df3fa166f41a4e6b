//! Error types for the analyzer.

use fairvalue_data::DataError;
use fairvalue_statements::ReconstructionError;
use fairvalue_valuation::ValuationError;
use thiserror::Error;

/// Result type for analyzer operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Errors that can stop an analysis.
///
/// Unavailable facts or quotes are not errors; the analyzer degrades to an
/// empty fact map or a zero quote instead.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Symbol rejected before any collaborator was called
    #[error(transparent)]
    Data(#[from] DataError),

    /// Invalid reconstruction configuration
    #[error("Reconstruction error: {0}")]
    Reconstruction(#[from] ReconstructionError),

    /// Invalid valuation configuration
    #[error("Valuation error: {0}")]
    Valuation(#[from] ValuationError),
}
