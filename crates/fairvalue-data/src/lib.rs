#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fairvalue/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod concepts;
pub mod error;
pub mod facts;
pub mod quote;
pub mod source;

pub use error::{DataError, Result};
pub use facts::{FactEntry, FactMap, FiscalPeriod};
pub use quote::Quote;
pub use source::{
    FactSource, JsonFileFactSource, JsonFileQuoteSource, QuoteSource, StaticFactSource,
    StaticQuoteSource, normalize_symbol,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
