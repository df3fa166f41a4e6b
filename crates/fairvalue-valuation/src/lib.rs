#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fairvalue/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod category;
pub mod config;
pub mod engine;
pub mod error;
pub mod estimator;
pub mod methods;
pub mod multiples;
pub mod registry;
pub mod result;
pub mod summary;

pub use aggregate::{aggregate, upside_percent, weighted_average};
pub use category::{ValuationCategory, ValuationLevel, categorize};
pub use config::ValuationConfig;
pub use engine::ValuationEngine;
pub use error::{Result, ValuationError};
pub use estimator::{Estimator, ValuationInputs};
pub use multiples::{HistoricalMultiples, Multiple, MultipleSource};
pub use registry::{MethodInfo, available_methods, default_estimators, get_method_info, methods_by_confidence};
pub use result::{ComprehensiveValuation, Confidence, Recommendation, ValuationMethod, ValuationResult};
pub use summary::{FinancialsSummary, GrowthSource, ManualOverrides};
