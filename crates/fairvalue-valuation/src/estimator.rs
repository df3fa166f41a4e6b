//! The estimator seam and its inputs.

use crate::config::ValuationConfig;
use crate::multiples::HistoricalMultiples;
use crate::result::{Confidence, ValuationMethod, ValuationResult};
use crate::summary::{FinancialsSummary, ManualOverrides};
use fairvalue_data::Quote;
use fairvalue_statements::FinancialStatements;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Everything an estimator may read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    /// Market price per share
    pub price: f64,
    /// Shares outstanding
    pub shares_outstanding: f64,
    /// Financial summary
    pub summary: FinancialsSummary,
    /// Historical multiples
    pub multiples: HistoricalMultiples,
}

impl ValuationInputs {
    /// Assemble inputs from explicit parts.
    pub const fn new(
        price: f64,
        shares_outstanding: f64,
        summary: FinancialsSummary,
        multiples: HistoricalMultiples,
    ) -> Self {
        Self {
            price,
            shares_outstanding,
            summary,
            multiples,
        }
    }

    /// Assemble inputs from reconstructed statements and a quote.
    ///
    /// The quote's share count wins; the latest balance sheet's count is
    /// used when the quote has none.
    pub fn from_statements(
        statements: &FinancialStatements,
        quote: &Quote,
        overrides: &ManualOverrides,
        config: &ValuationConfig,
    ) -> Self {
        let summary = FinancialsSummary::from_statements(statements, config).with_overrides(overrides);
        let multiples = HistoricalMultiples::from_statements(statements, quote, config);
        let shares = if quote.shares_outstanding > 0.0 {
            quote.shares_outstanding
        } else {
            summary.shares_outstanding.or_zero()
        };
        Self::new(quote.price, shares, summary, multiples)
    }

    /// Price times shares.
    pub const fn market_cap(&self) -> f64 {
        self.price * self.shares_outstanding
    }

    /// Divide a company-level value by the share count; zero without shares.
    pub const fn per_share(&self, total: f64) -> f64 {
        if self.shares_outstanding > 0.0 {
            total / self.shares_outstanding
        } else {
            0.0
        }
    }

    pub(crate) const fn has_shares(&self) -> bool {
        self.shares_outstanding > 0.0
    }
}

/// One intrinsic-value method.
///
/// Estimators never fail: an absent input is replaced by a neutral default
/// and reported through [`ValuationResult::missing`].
pub trait Estimator: Debug + Send + Sync {
    /// Method implemented.
    fn method(&self) -> ValuationMethod;

    /// Confidence when every input is present.
    fn base_confidence(&self) -> Confidence;

    /// Produce an estimate.
    fn estimate(&self, inputs: &ValuationInputs, config: &ValuationConfig) -> ValuationResult;
}

/// Shared "no shares" flag applied by every per-share estimator.
pub(crate) fn require_shares(result: ValuationResult, inputs: &ValuationInputs) -> ValuationResult {
    if inputs.has_shares() || result.missing_data.is_some() {
        result
    } else {
        result.missing("Shares Outstanding required")
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::complete_inputs;
    use super::*;
    use chrono::NaiveDate;
    use fairvalue_statements::{LineItem, StatementKind, StatementRecord};

    #[test]
    fn test_per_share_without_shares_is_zero() {
        let mut inputs = complete_inputs();
        assert_eq!(inputs.per_share(5_000.0), 5.0);
        inputs.shares_outstanding = 0.0;
        assert_eq!(inputs.per_share(5_000.0), 0.0);
    }

    fn balance_with_shares(shares: f64) -> FinancialStatements {
        let mut statements = FinancialStatements::empty(12);
        statements.balance.annual.push(
            StatementRecord::new(
                StatementKind::Balance,
                NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
                2023,
                None,
            )
            .with(LineItem::SharesOutstanding, shares),
        );
        statements
    }

    #[test]
    fn test_from_statements_uses_balance_shares_without_quote() {
        let inputs = ValuationInputs::from_statements(
            &balance_with_shares(2_500.0),
            &Quote::new("ACME", 12.0, 0.0),
            &ManualOverrides::default(),
            &ValuationConfig::default(),
        );
        assert_eq!(inputs.shares_outstanding, 2_500.0);
        assert_eq!(inputs.market_cap(), 30_000.0);
        assert!(inputs.has_shares());
    }

    #[test]
    fn test_from_statements_prefers_quote_shares() {
        let inputs = ValuationInputs::from_statements(
            &balance_with_shares(2_500.0),
            &Quote::new("ACME", 12.0, 3_000.0),
            &ManualOverrides::default(),
            &ValuationConfig::default(),
        );
        assert_eq!(inputs.shares_outstanding, 3_000.0);
    }

    #[test]
    fn test_from_statements_without_any_data() {
        let inputs = ValuationInputs::from_statements(
            &FinancialStatements::empty(12),
            &Quote::unavailable("ACME"),
            &ManualOverrides::default(),
            &ValuationConfig::default(),
        );
        assert_eq!(inputs.shares_outstanding, 0.0);
        assert_eq!(inputs.price, 0.0);
        assert!(inputs.summary.revenue.is_absent());
    }
}
