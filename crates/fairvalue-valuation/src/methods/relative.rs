//! Mean historical multiple estimators: P/S, P/E and P/B.

use crate::config::ValuationConfig;
use crate::estimator::{Estimator, ValuationInputs, require_shares};
use crate::multiples::{Multiple, MultipleSource};
use crate::result::{Confidence, ValuationMethod, ValuationResult};
use fairvalue_statements::Amount;

/// Fundamental a multiple is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultipleMetric {
    /// Revenue, for price/sales
    Sales,
    /// Net income, for price/earnings
    Earnings,
    /// Shareholder equity, for price/book
    Book,
}

impl MultipleMetric {
    const fn label(self) -> &'static str {
        match self {
            Self::Sales => "Revenue",
            Self::Earnings => "Net Income",
            Self::Book => "Shareholder Equity",
        }
    }

    const fn key(self) -> &'static str {
        match self {
            Self::Sales => "revenue",
            Self::Earnings => "net_income",
            Self::Book => "shareholder_equity",
        }
    }

    const fn ratio_name(self) -> &'static str {
        match self {
            Self::Sales => "P/S",
            Self::Earnings => "P/E",
            Self::Book => "P/B",
        }
    }
}

/// Fair value per share = mean multiple x fundamental / shares.
#[derive(Debug, Clone, Copy)]
pub struct MeanMultipleEstimator {
    metric: MultipleMetric,
}

impl MeanMultipleEstimator {
    /// Estimator for a metric.
    pub const fn new(metric: MultipleMetric) -> Self {
        Self { metric }
    }

    /// Mean price/sales.
    pub const fn price_to_sales() -> Self {
        Self::new(MultipleMetric::Sales)
    }

    /// Mean price/earnings.
    pub const fn price_to_earnings() -> Self {
        Self::new(MultipleMetric::Earnings)
    }

    /// Mean price/book.
    pub const fn price_to_book() -> Self {
        Self::new(MultipleMetric::Book)
    }

    const fn select(&self, inputs: &ValuationInputs) -> (Amount, Multiple) {
        let summary = &inputs.summary;
        let multiples = &inputs.multiples;
        match self.metric {
            MultipleMetric::Sales => (summary.revenue, multiples.price_to_sales),
            MultipleMetric::Earnings => (summary.net_income, multiples.price_to_earnings),
            MultipleMetric::Book => (summary.shareholder_equity, multiples.price_to_book),
        }
    }
}

impl Estimator for MeanMultipleEstimator {
    fn method(&self) -> ValuationMethod {
        match self.metric {
            MultipleMetric::Sales => ValuationMethod::MeanPriceToSales,
            MultipleMetric::Earnings => ValuationMethod::MeanPriceToEarnings,
            MultipleMetric::Book => ValuationMethod::MeanPriceToBook,
        }
    }

    fn base_confidence(&self) -> Confidence {
        match self.metric {
            MultipleMetric::Earnings => Confidence::High,
            MultipleMetric::Sales | MultipleMetric::Book => Confidence::Medium,
        }
    }

    fn estimate(&self, inputs: &ValuationInputs, _config: &ValuationConfig) -> ValuationResult {
        let (fundamental, multiple) = self.select(inputs);
        let label = self.metric.label();
        let ratio = self.metric.ratio_name();
        let base = fundamental.or_zero();
        let value = inputs.per_share(multiple.value * base);

        let source = match multiple.source {
            MultipleSource::Historical(n) => format!("mean of {n} annual periods"),
            MultipleSource::CurrentQuote => "current quote".to_string(),
            MultipleSource::Fallback => "configured fallback".to_string(),
        };

        let mut result = ValuationResult::new(
            self.method(),
            value,
            self.base_confidence(),
            format!("mean {ratio} x {label} / shares outstanding"),
        )
        .with_input(self.metric.key(), base)
        .with_input(ratio, multiple.value)
        .with_input("shares_outstanding", inputs.shares_outstanding)
        .with_step(format!("{ratio} {:.2} ({source})", multiple.value))
        .with_step(format!("{label}: {base:.0}"))
        .with_step(format!(
            "{:.2} x {base:.0} / {:.0} shares = {value:.2}",
            multiple.value, inputs.shares_outstanding
        ));

        if fundamental.is_absent() {
            result = result.missing(format!("{label} required"));
        }
        require_shares(result, inputs)
    }
}
