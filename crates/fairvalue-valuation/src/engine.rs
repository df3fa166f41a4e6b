//! Valuation engine: runs every estimator and aggregates the results.

use crate::aggregate::aggregate;
use crate::category::{ValuationCategory, categorize};
use crate::config::ValuationConfig;
use crate::error::Result;
use crate::estimator::{Estimator, ValuationInputs};
use crate::registry::default_estimators;
use crate::result::ComprehensiveValuation;
use crate::summary::ManualOverrides;
use chrono::{DateTime, Utc};
use fairvalue_data::Quote;
use fairvalue_statements::FinancialStatements;
use tracing::{debug, info};

/// Multi-method valuation engine.
#[derive(Debug)]
pub struct ValuationEngine {
    config: ValuationConfig,
    estimators: Vec<Box<dyn Estimator>>,
}

impl ValuationEngine {
    /// Engine with every registered estimator.
    pub fn new(config: ValuationConfig) -> Result<Self> {
        Self::with_estimators(config, default_estimators())
    }

    /// Engine with a custom estimator set.
    pub fn with_estimators(config: ValuationConfig, estimators: Vec<Box<dyn Estimator>>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, estimators })
    }

    /// Configuration in use.
    pub const fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Estimators in report order.
    pub fn estimators(&self) -> &[Box<dyn Estimator>] {
        &self.estimators
    }

    /// Run every estimator over prepared inputs.
    pub fn evaluate(&self, inputs: &ValuationInputs) -> ComprehensiveValuation {
        self.evaluate_at(inputs, Utc::now())
    }

    /// [`evaluate`](Self::evaluate) with an explicit timestamp.
    pub fn evaluate_at(&self, inputs: &ValuationInputs, calculated_at: DateTime<Utc>) -> ComprehensiveValuation {
        let valuations: Vec<_> = self
            .estimators
            .iter()
            .map(|estimator| {
                let result = estimator.estimate(inputs, &self.config);
                debug!(
                    method = %result.method,
                    value = result.value,
                    confidence = %result.confidence,
                    missing = result.missing_data.as_deref().unwrap_or(""),
                    "estimate"
                );
                result
            })
            .collect();

        let valuation = aggregate(inputs.price, valuations, calculated_at);
        info!(
            price = valuation.current_price,
            fair_value = valuation.average_intrinsic_value,
            upside_percent = valuation.upside_percent,
            usable = valuation.usable_count(),
            recommendation = %valuation.recommendation,
            "valuation complete"
        );
        valuation
    }

    /// Summarize statements, apply overrides, and evaluate.
    pub fn value(
        &self,
        statements: &FinancialStatements,
        quote: &Quote,
        overrides: &ManualOverrides,
    ) -> ComprehensiveValuation {
        let inputs = ValuationInputs::from_statements(statements, quote, overrides, &self.config);
        self.evaluate(&inputs)
    }

    /// Five-level category of a valuation.
    pub fn categorize(&self, valuation: &ComprehensiveValuation) -> Option<ValuationCategory> {
        categorize(valuation)
    }
}
