//! Method Registry
//!
//! Central registry of the valuation methods: metadata for display and the
//! default estimator set used by the engine.

use crate::estimator::Estimator;
use crate::methods::{
    DiscountedCashFlowEstimator, MeanMultipleEstimator, PegEstimator, PsgEstimator,
    TerminalValueEstimator,
};
use crate::result::{Confidence, ValuationMethod};
use serde::Serialize;

/// Method metadata
#[derive(Debug, Clone, Serialize)]
pub struct MethodInfo {
    /// Method
    pub method: ValuationMethod,
    /// Display name
    pub name: &'static str,
    /// Brief description of the estimate
    pub description: &'static str,
    /// Inputs the method reads
    pub required_inputs: &'static [&'static str],
    /// Confidence when every input is present
    pub base_confidence: Confidence,
}

/// Get all available method info
pub fn available_methods() -> Vec<MethodInfo> {
    vec![
        // Discounted cash flow family
        MethodInfo {
            method: ValuationMethod::DiscountedOperatingCashFlow,
            name: "DCF-20 (Operating Cash Flow)",
            description: "Operating cash flow grown over three phases and discounted for 20 years",
            required_inputs: &["operating_cash_flow", "growth_rate", "shares_outstanding"],
            base_confidence: Confidence::High,
        },
        MethodInfo {
            method: ValuationMethod::DiscountedFreeCashFlow,
            name: "DFCF-20 (Free Cash Flow)",
            description: "Free cash flow discounted for 20 years, less debt plus cash",
            required_inputs: &[
                "free_cash_flow",
                "growth_rate",
                "total_debt",
                "cash_and_investments",
                "shares_outstanding",
            ],
            base_confidence: Confidence::High,
        },
        MethodInfo {
            method: ValuationMethod::DiscountedNetIncome,
            name: "DNI-20 (Net Income)",
            description: "Net income grown over three phases and discounted for 20 years",
            required_inputs: &["net_income", "growth_rate", "shares_outstanding"],
            base_confidence: Confidence::Medium,
        },
        MethodInfo {
            method: ValuationMethod::TerminalValue,
            name: "Terminal Value (Gordon Growth)",
            description: "Five years of free cash flow plus a perpetuity at the terminal growth rate",
            required_inputs: &["free_cash_flow", "growth_rate", "shares_outstanding"],
            base_confidence: Confidence::Medium,
        },
        // Relative multiples
        MethodInfo {
            method: ValuationMethod::MeanPriceToSales,
            name: "Mean P/S",
            description: "Mean historical price/sales applied to current revenue",
            required_inputs: &["revenue", "price_to_sales", "shares_outstanding"],
            base_confidence: Confidence::Medium,
        },
        MethodInfo {
            method: ValuationMethod::MeanPriceToEarnings,
            name: "Mean P/E",
            description: "Mean historical price/earnings applied to current net income",
            required_inputs: &["net_income", "price_to_earnings", "shares_outstanding"],
            base_confidence: Confidence::High,
        },
        MethodInfo {
            method: ValuationMethod::MeanPriceToBook,
            name: "Mean P/B",
            description: "Mean historical price/book applied to current shareholder equity",
            required_inputs: &["shareholder_equity", "price_to_book", "shares_outstanding"],
            base_confidence: Confidence::Medium,
        },
        // Growth-adjusted multiples
        MethodInfo {
            method: ValuationMethod::PriceSalesToGrowth,
            name: "PSG",
            description: "Price scaled by fair over current price/sales-to-growth",
            required_inputs: &["revenue", "revenue_growth", "price"],
            base_confidence: Confidence::Low,
        },
        MethodInfo {
            method: ValuationMethod::PriceEarningsToGrowth,
            name: "PEG",
            description: "Price scaled by fair over current price/earnings-to-growth",
            required_inputs: &["net_income", "earnings_growth", "price"],
            base_confidence: Confidence::Medium,
        },
    ]
}

/// Get methods by base confidence
pub fn methods_by_confidence(confidence: Confidence) -> Vec<MethodInfo> {
    available_methods()
        .into_iter()
        .filter(|m| m.base_confidence == confidence)
        .collect()
}

/// Get method info
pub fn get_method_info(method: ValuationMethod) -> Option<MethodInfo> {
    available_methods().into_iter().find(|m| m.method == method)
}

/// One estimator per method, in report order
pub fn default_estimators() -> Vec<Box<dyn Estimator>> {
    vec![
        Box::new(DiscountedCashFlowEstimator::operating_cash_flow()),
        Box::new(DiscountedCashFlowEstimator::free_cash_flow()),
        Box::new(DiscountedCashFlowEstimator::net_income()),
        Box::new(TerminalValueEstimator),
        Box::new(MeanMultipleEstimator::price_to_sales()),
        Box::new(MeanMultipleEstimator::price_to_earnings()),
        Box::new(MeanMultipleEstimator::price_to_book()),
        Box::new(PsgEstimator),
        Box::new(PegEstimator),
    ]
}
