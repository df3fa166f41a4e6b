#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fairvalue/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analyzer;
pub mod error;

// Re-export the pipeline stages
pub use fairvalue_data as data;
pub use fairvalue_statements as statements;
pub use fairvalue_valuation as valuation;

pub use analyzer::{Analysis, Analyzer};
pub use error::{AnalyzerError, Result};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
