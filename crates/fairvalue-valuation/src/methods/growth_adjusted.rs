//! Growth-adjusted multiples: PSG and PEG.
//!
//! Both scale the current price by `fair ratio / current ratio`, where the
//! current ratio is a multiple divided by the growth rate in percent. When
//! the ratio cannot be computed a ratio of exactly 1.0 is substituted, so the
//! estimate falls back to `price x fair ratio`.

use crate::config::ValuationConfig;
use crate::estimator::{Estimator, ValuationInputs, require_shares};
use crate::result::{Confidence, ValuationMethod, ValuationResult};
use tracing::debug;

/// Ratio used when the current ratio cannot be computed.
const NEUTRAL_RATIO: f64 = 1.0;

/// Current growth-adjusted ratio, or the name of the missing input.
type RatioOutcome = Result<f64, &'static str>;

fn growth_adjusted(
    estimator: &dyn Estimator,
    inputs: &ValuationInputs,
    current: RatioOutcome,
    fair_ratio: f64,
    ratio_name: &str,
) -> ValuationResult {
    let (ratio, missing) = match current {
        Ok(ratio) => (ratio, None),
        Err(what) => {
            debug!(method = %estimator.method(), missing = what, "substituting neutral ratio");
            (NEUTRAL_RATIO, Some(what))
        }
    };
    let value = inputs.price * fair_ratio / ratio;

    let mut result = ValuationResult::new(
        estimator.method(),
        value,
        estimator.base_confidence(),
        format!("price x fair {ratio_name} / current {ratio_name}"),
    )
    .with_input("price", inputs.price)
    .with_input(&format!("current_{}", ratio_name.to_lowercase()), ratio)
    .with_input(&format!("fair_{}", ratio_name.to_lowercase()), fair_ratio)
    .with_step(format!("Current {ratio_name}: {ratio:.2}"))
    .with_step(format!(
        "{:.2} x {fair_ratio:.2} / {ratio:.2} = {value:.2}",
        inputs.price
    ));

    if let Some(what) = missing {
        result = result.missing(what);
    }
    result
}

/// Growth in percent when strictly positive.
fn growth_percent(growth: Option<f64>) -> Option<f64> {
    growth.filter(|g| g.is_finite() && *g > 0.0).map(|g| g * 100.0)
}

/// Price/sales-to-growth.
#[derive(Debug, Clone, Copy, Default)]
pub struct PsgEstimator;

impl PsgEstimator {
    fn current_ratio(inputs: &ValuationInputs) -> RatioOutcome {
        let revenue = inputs.summary.revenue.positive().ok_or("Revenue required")?;
        let growth = growth_percent(inputs.summary.revenue_growth).ok_or("Revenue Growth required")?;
        if !inputs.has_shares() {
            return Err("Shares Outstanding required");
        }
        Ok(inputs.market_cap() / revenue / growth)
    }
}

impl Estimator for PsgEstimator {
    fn method(&self) -> ValuationMethod {
        ValuationMethod::PriceSalesToGrowth
    }

    fn base_confidence(&self) -> Confidence {
        Confidence::Low
    }

    fn estimate(&self, inputs: &ValuationInputs, config: &ValuationConfig) -> ValuationResult {
        let result = growth_adjusted(self, inputs, Self::current_ratio(inputs), config.fair_psg_ratio, "PSG");
        require_shares(result, inputs)
    }
}

/// Price/earnings-to-growth.
///
/// A caller-supplied PEG ratio is used as the current ratio when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct PegEstimator;

impl PegEstimator {
    fn current_ratio(inputs: &ValuationInputs) -> RatioOutcome {
        if let Some(peg) = inputs.summary.peg_ratio.filter(|p| p.is_finite() && *p > 0.0) {
            return Ok(peg);
        }
        let net_income = inputs.summary.net_income.positive().ok_or("Net Income required")?;
        let growth = growth_percent(inputs.summary.earnings_growth).ok_or("Earnings Growth required")?;
        if !inputs.has_shares() {
            return Err("Shares Outstanding required");
        }
        Ok(inputs.market_cap() / net_income / growth)
    }
}

impl Estimator for PegEstimator {
    fn method(&self) -> ValuationMethod {
        ValuationMethod::PriceEarningsToGrowth
    }

    fn base_confidence(&self) -> Confidence {
        Confidence::Medium
    }

    fn estimate(&self, inputs: &ValuationInputs, config: &ValuationConfig) -> ValuationResult {
        let result = growth_adjusted(self, inputs, Self::current_ratio(inputs), config.fair_peg_ratio, "PEG");
        require_shares(result, inputs)
    }
}
