//! Valuation results: per-method estimates and the aggregate.

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trust tier of an estimate.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Weight 1
    #[display("low")]
    Low,
    /// Weight 2
    #[display("medium")]
    Medium,
    /// Weight 3
    #[display("high")]
    High,
}

impl Confidence {
    /// Aggregation weight: high = 3, medium = 2, low = 1.
    pub const fn weight(self) -> f64 {
        match self {
            Self::High => 3.0,
            Self::Medium => 2.0,
            Self::Low => 1.0,
        }
    }
}

/// The nine valuation methods.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationMethod {
    /// 20-year discounted operating cash flow
    #[display("DCF-20 (Operating Cash Flow)")]
    DiscountedOperatingCashFlow,
    /// 20-year discounted free cash flow, net of debt and cash
    #[display("DFCF-20 (Free Cash Flow)")]
    DiscountedFreeCashFlow,
    /// 20-year discounted net income
    #[display("DNI-20 (Net Income)")]
    DiscountedNetIncome,
    /// Five explicit years plus a Gordon growth terminal value
    #[display("Terminal Value (Gordon Growth)")]
    TerminalValue,
    /// Mean historical price/sales
    #[display("Mean P/S")]
    MeanPriceToSales,
    /// Mean historical price/earnings
    #[display("Mean P/E")]
    MeanPriceToEarnings,
    /// Mean historical price/book
    #[display("Mean P/B")]
    MeanPriceToBook,
    /// Price/sales-to-growth
    #[display("PSG")]
    PriceSalesToGrowth,
    /// Price/earnings-to-growth
    #[display("PEG")]
    PriceEarningsToGrowth,
}

impl ValuationMethod {
    /// Every method, in report order.
    pub const ALL: [Self; 9] = [
        Self::DiscountedOperatingCashFlow,
        Self::DiscountedFreeCashFlow,
        Self::DiscountedNetIncome,
        Self::TerminalValue,
        Self::MeanPriceToSales,
        Self::MeanPriceToEarnings,
        Self::MeanPriceToBook,
        Self::PriceSalesToGrowth,
        Self::PriceEarningsToGrowth,
    ];

    /// Stable identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::DiscountedOperatingCashFlow => "dcf_operating_cash_flow",
            Self::DiscountedFreeCashFlow => "dcf_free_cash_flow",
            Self::DiscountedNetIncome => "dcf_net_income",
            Self::TerminalValue => "terminal_value",
            Self::MeanPriceToSales => "mean_price_to_sales",
            Self::MeanPriceToEarnings => "mean_price_to_earnings",
            Self::MeanPriceToBook => "mean_price_to_book",
            Self::PriceSalesToGrowth => "price_sales_to_growth",
            Self::PriceEarningsToGrowth => "price_earnings_to_growth",
        }
    }

    /// Look up a method by [`id`](Self::id).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.id() == id)
    }
}

/// One estimator's fair value per share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Method that produced the estimate
    pub method: ValuationMethod,
    /// Fair value per share, never negative
    pub value: f64,
    /// Trust tier
    pub confidence: Confidence,
    /// Name of the absent input a neutral default stood in for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_data: Option<String>,
    /// Formula in words
    pub calculation_formula: String,
    /// Named numeric inputs
    pub inputs: BTreeMap<String, f64>,
    /// Human-readable calculation steps
    pub steps: Vec<String>,
}

impl ValuationResult {
    /// New result; non-finite and negative values are floored at zero.
    pub fn new(
        method: ValuationMethod,
        value: f64,
        confidence: Confidence,
        formula: impl Into<String>,
    ) -> Self {
        Self {
            method,
            value: floor_value(value),
            confidence,
            missing_data: None,
            calculation_formula: formula.into(),
            inputs: BTreeMap::new(),
            steps: Vec::new(),
        }
    }

    /// Record a named input.
    pub fn with_input(mut self, name: &str, value: f64) -> Self {
        self.inputs.insert(name.to_string(), value);
        self
    }

    /// Append a calculation step.
    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Flag an absent input; confidence drops to low.
    pub fn missing(mut self, what: impl Into<String>) -> Self {
        self.missing_data = Some(what.into());
        self.confidence = Confidence::Low;
        self
    }

    /// Returns true if no input was substituted.
    pub const fn is_usable(&self) -> bool {
        self.missing_data.is_none()
    }
}

fn floor_value(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Three-bucket verdict on the upside.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Upside above 20%
    #[display("undervalued")]
    Undervalued,
    /// Upside within +/- 20%
    #[display("fair")]
    Fair,
    /// Upside below -20%
    #[display("overvalued")]
    Overvalued,
}

impl Recommendation {
    /// Bucket an upside percentage.
    pub fn from_upside(upside_percent: f64) -> Self {
        if upside_percent > 20.0 {
            Self::Undervalued
        } else if upside_percent < -20.0 {
            Self::Overvalued
        } else {
            Self::Fair
        }
    }
}

/// Aggregate of every estimator for one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveValuation {
    /// Market price used
    pub current_price: f64,
    /// Confidence-weighted mean of the usable estimates
    pub average_intrinsic_value: f64,
    /// `(average - price) / price * 100`, 0 when the price is not positive
    pub upside_percent: f64,
    /// Every estimator's result, in report order
    pub valuations: Vec<ValuationResult>,
    /// Three-bucket verdict
    pub recommendation: Recommendation,
    /// When the valuation was computed
    pub calculated_at: DateTime<Utc>,
}

impl ComprehensiveValuation {
    /// Result for a method.
    pub fn get(&self, method: ValuationMethod) -> Option<&ValuationResult> {
        self.valuations.iter().find(|v| v.method == method)
    }

    /// Number of estimates with no substituted input.
    pub fn usable_count(&self) -> usize {
        self.valuations.iter().filter(|v| v.is_usable()).count()
    }
}
