//! Estimator implementations, one per valuation method.
//!
//! - [`dcf`]: 20-year discounted operating cash flow, free cash flow and net income
//! - [`terminal`]: free cash flow with a Gordon growth terminal value
//! - [`relative`]: mean historical P/S, P/E and P/B
//! - [`growth_adjusted`]: PSG and PEG

pub mod dcf;
pub mod growth_adjusted;
pub mod relative;
pub mod terminal;

pub use dcf::{CashFlowBasis, DiscountedCashFlowEstimator, GrowthSchedule, Projection};
pub use growth_adjusted::{PegEstimator, PsgEstimator};
pub use relative::{MeanMultipleEstimator, MultipleMetric};
pub use terminal::TerminalValueEstimator;
