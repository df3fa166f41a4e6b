//! Free cash flow with a Gordon growth terminal value.

use super::dcf::GrowthSchedule;
use crate::config::ValuationConfig;
use crate::estimator::{Estimator, ValuationInputs, require_shares};
use crate::result::{Confidence, ValuationMethod, ValuationResult};

/// Explicit free cash flow years plus a perpetuity growing at the terminal
/// rate, bridged to equity value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalValueEstimator;

impl Estimator for TerminalValueEstimator {
    fn method(&self) -> ValuationMethod {
        ValuationMethod::TerminalValue
    }

    fn base_confidence(&self) -> Confidence {
        Confidence::Medium
    }

    fn estimate(&self, inputs: &ValuationInputs, config: &ValuationConfig) -> ValuationResult {
        let reported = inputs.summary.free_cash_flow;
        let base = reported.or_zero();
        let r = config.discount_rate;
        let tg = config.terminal_growth_rate;
        let years = config.explicit_years;

        // Explicit phase only: the perpetuity replaces the decay and terminal phases.
        let explicit = ValuationConfig {
            decay_years: 0,
            terminal_years: 0,
            ..config.clone()
        };
        let projection = GrowthSchedule::new(inputs.summary.growth_rate, &explicit).project(base, r);
        let terminal_value = projection.final_cash_flow * (1.0 + tg) / (r - tg);
        let discounted_terminal = terminal_value / (1.0 + r).powf(f64::from(years));
        let bridge = inputs.summary.net_cash();
        let equity_value = projection.present_value + discounted_terminal + bridge;
        let value = inputs.per_share(equity_value);

        let mut result = ValuationResult::new(
            self.method(),
            value,
            self.base_confidence(),
            format!(
                "(PV of {years} years of Free Cash Flow + PV of FCF_{years} x (1 + g) / (r - g) - total debt + cash) / shares outstanding"
            ),
        )
        .with_input("free_cash_flow", base)
        .with_input("growth_rate", inputs.summary.growth_rate.clamp(-config.growth_cap, config.growth_cap))
        .with_input("discount_rate", r)
        .with_input("terminal_growth_rate", tg)
        .with_input("shares_outstanding", inputs.shares_outstanding)
        .with_step(format!("Base Free Cash Flow: {base:.0}"))
        .with_step(format!("PV of years 1-{years}: {:.0}", projection.present_value))
        .with_step(format!(
            "Terminal value {terminal_value:.0}, discounted {discounted_terminal:.0}"
        ))
        .with_step(format!("Net cash bridge: {bridge:.0}"))
        .with_step(format!(
            "Equity value {equity_value:.0} / {:.0} shares = {value:.2}",
            inputs.shares_outstanding
        ));

        if reported.is_absent() {
            result = result.missing("Free Cash Flow required");
        }
        require_shares(result, inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::fixtures::complete_inputs;
    use approx::assert_relative_eq;
    use fairvalue_statements::Amount;

    #[test]
    fn test_gordon_value() {
        let config = ValuationConfig::default();
        let mut inputs = complete_inputs();
        inputs.summary.growth_rate = 0.0;
        inputs.summary.total_debt = Amount::ABSENT;
        inputs.summary.cash_and_investments = Amount::ABSENT;

        // Flat 10,000 for five years, then 10,400 / 0.06 in perpetuity.
        let annuity: f64 = (1..=5).map(|t| 10_000.0 / 1.1_f64.powi(t)).sum();
        let terminal = 10_000.0 * 1.04 / 0.06 / 1.1_f64.powi(5);
        let result = TerminalValueEstimator.estimate(&inputs, &config);
        assert_relative_eq!(result.value, (annuity + terminal) / 1_000.0, epsilon = 1e-9);
        assert_eq!(result.confidence, Confidence::Medium);
    }

    #[test]
    fn test_increases_with_growth() {
        let config = ValuationConfig::default();
        let mut low = complete_inputs();
        low.summary.growth_rate = 0.02;
        let mut high = complete_inputs();
        high.summary.growth_rate = 0.12;
        assert!(
            TerminalValueEstimator.estimate(&high, &config).value
                > TerminalValueEstimator.estimate(&low, &config).value
        );
    }

    #[test]
    fn test_missing_free_cash_flow() {
        let mut inputs = complete_inputs();
        inputs.summary.free_cash_flow = Amount::ABSENT;
        let result = TerminalValueEstimator.estimate(&inputs, &ValuationConfig::default());
        assert_eq!(result.missing_data.as_deref(), Some("Free Cash Flow required"));
        assert_eq!(result.confidence, Confidence::Low);
        // Net cash 2,000 / 1,000 shares
        assert_relative_eq!(result.value, 2.0, epsilon = 1e-9);
    }
}
