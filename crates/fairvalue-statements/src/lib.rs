#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fairvalue/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod amount;
pub mod builder;
pub mod config;
pub mod error;
pub mod fiscal;
pub mod line_item;
pub mod pipeline;
pub mod q4;
pub mod quarterize;
pub mod reconcile;
pub mod record;
pub mod tags;
pub mod ttm;

pub use amount::Amount;
pub use builder::{Cadence, StatementBuilder};
pub use config::ReconstructionConfig;
pub use error::{ReconstructionError, Result};
pub use line_item::{Aggregation, LineItem, StatementKind};
pub use pipeline::{build_set, reconstruct};
pub use q4::derive_q4;
pub use quarterize::quarterize;
pub use reconcile::{deduplicate, filter_mislabeled, reconcile};
pub use record::{
    DataQualityWarning, FinancialStatements, RecordOrigin, StatementRecord, StatementSet,
};
pub use tags::ConceptTable;
pub use ttm::trailing_twelve_months;
