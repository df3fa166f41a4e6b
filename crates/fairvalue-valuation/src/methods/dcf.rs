//! Twenty-year discounted cash flow family.
//!
//! A base annual figure is grown through three phases and discounted at the
//! configured required return:
//!
//! 1. `explicit_years` at the company's own growth rate, clamped to
//!    +/- `growth_cap`;
//! 2. `decay_years` at `decay_factor` times that rate;
//! 3. `terminal_years` at `terminal_growth_rate`.
//!
//! No terminal value is added after the last projected year.

use crate::config::ValuationConfig;
use crate::estimator::{Estimator, ValuationInputs, require_shares};
use crate::result::{Confidence, ValuationMethod, ValuationResult};
use fairvalue_statements::Amount;
use tracing::debug;

/// Growth rates per projection phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthSchedule {
    /// Company growth after clamping
    pub explicit_rate: f64,
    /// Decayed growth
    pub decayed_rate: f64,
    /// Long-run growth
    pub terminal_rate: f64,
    explicit_years: u32,
    decay_years: u32,
    terminal_years: u32,
}

impl GrowthSchedule {
    /// Build the schedule for a company growth rate.
    pub fn new(growth_rate: f64, config: &ValuationConfig) -> Self {
        let explicit_rate = growth_rate.clamp(-config.growth_cap, config.growth_cap);
        Self {
            explicit_rate,
            decayed_rate: explicit_rate * config.decay_factor,
            terminal_rate: config.terminal_growth_rate,
            explicit_years: config.explicit_years,
            decay_years: config.decay_years,
            terminal_years: config.terminal_years,
        }
    }

    /// Growth applied in projection year `year` (1-based).
    pub const fn rate_for_year(&self, year: u32) -> f64 {
        if year <= self.explicit_years {
            self.explicit_rate
        } else if year <= self.explicit_years + self.decay_years {
            self.decayed_rate
        } else {
            self.terminal_rate
        }
    }

    /// Number of projected years.
    pub const fn horizon(&self) -> u32 {
        self.explicit_years + self.decay_years + self.terminal_years
    }

    /// Project `base` forward and discount every year back to today.
    pub fn project(&self, base: f64, discount_rate: f64) -> Projection {
        let mut cash_flow = base;
        let mut factor = 1.0;
        let mut projection = Projection::default();

        for year in 1..=self.horizon() {
            cash_flow *= 1.0 + self.rate_for_year(year);
            factor *= 1.0 + discount_rate;
            let present = cash_flow / factor;

            let phase = if year <= self.explicit_years {
                0
            } else if year <= self.explicit_years + self.decay_years {
                1
            } else {
                2
            };
            projection.phase_values[phase] += present;
            projection.present_value += present;
            projection.final_cash_flow = cash_flow;
        }
        projection
    }
}

/// Result of a projection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Projection {
    /// Sum of discounted cash flows
    pub present_value: f64,
    /// Discounted value contributed by each phase
    pub phase_values: [f64; 3],
    /// Undiscounted cash flow of the last projected year
    pub final_cash_flow: f64,
}

/// Figure a discounted estimator projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashFlowBasis {
    /// Operating cash flow
    OperatingCashFlow,
    /// Free cash flow, bridged from enterprise to equity value
    FreeCashFlow,
    /// Net income
    NetIncome,
}

impl CashFlowBasis {
    const fn label(self) -> &'static str {
        match self {
            Self::OperatingCashFlow => "Operating Cash Flow",
            Self::FreeCashFlow => "Free Cash Flow",
            Self::NetIncome => "Net Income",
        }
    }

    const fn key(self) -> &'static str {
        match self {
            Self::OperatingCashFlow => "operating_cash_flow",
            Self::FreeCashFlow => "free_cash_flow",
            Self::NetIncome => "net_income",
        }
    }

    const fn select(self, inputs: &ValuationInputs) -> Amount {
        match self {
            Self::OperatingCashFlow => inputs.summary.operating_cash_flow,
            Self::FreeCashFlow => inputs.summary.free_cash_flow,
            Self::NetIncome => inputs.summary.net_income,
        }
    }
}

/// Twenty-year discounted estimator over a cash-flow basis.
#[derive(Debug, Clone, Copy)]
pub struct DiscountedCashFlowEstimator {
    basis: CashFlowBasis,
}

impl DiscountedCashFlowEstimator {
    /// Estimator for a basis.
    pub const fn new(basis: CashFlowBasis) -> Self {
        Self { basis }
    }

    /// Discounted operating cash flow.
    pub const fn operating_cash_flow() -> Self {
        Self::new(CashFlowBasis::OperatingCashFlow)
    }

    /// Discounted free cash flow.
    pub const fn free_cash_flow() -> Self {
        Self::new(CashFlowBasis::FreeCashFlow)
    }

    /// Discounted net income.
    pub const fn net_income() -> Self {
        Self::new(CashFlowBasis::NetIncome)
    }

    /// Basis projected.
    pub const fn basis(&self) -> CashFlowBasis {
        self.basis
    }
}

impl Estimator for DiscountedCashFlowEstimator {
    fn method(&self) -> ValuationMethod {
        match self.basis {
            CashFlowBasis::OperatingCashFlow => ValuationMethod::DiscountedOperatingCashFlow,
            CashFlowBasis::FreeCashFlow => ValuationMethod::DiscountedFreeCashFlow,
            CashFlowBasis::NetIncome => ValuationMethod::DiscountedNetIncome,
        }
    }

    fn base_confidence(&self) -> Confidence {
        match self.basis {
            CashFlowBasis::OperatingCashFlow | CashFlowBasis::FreeCashFlow => Confidence::High,
            CashFlowBasis::NetIncome => Confidence::Medium,
        }
    }

    fn estimate(&self, inputs: &ValuationInputs, config: &ValuationConfig) -> ValuationResult {
        let label = self.basis.label();
        let reported = self.basis.select(inputs);
        let base = reported.value().unwrap_or_else(|| {
            debug!(method = %self.method(), input = label, "input absent, projecting zero");
            0.0
        });

        let schedule = GrowthSchedule::new(inputs.summary.growth_rate, config);
        let projection = schedule.project(base, config.discount_rate);
        let bridge = match self.basis {
            CashFlowBasis::FreeCashFlow => inputs.summary.net_cash(),
            _ => 0.0,
        };
        let equity_value = projection.present_value + bridge;
        let value = inputs.per_share(equity_value);

        let formula = match self.basis {
            CashFlowBasis::FreeCashFlow => format!(
                "(sum of {} years of discounted {label} - total debt + cash) / shares outstanding",
                schedule.horizon()
            ),
            _ => format!(
                "sum of {} years of discounted {label} / shares outstanding",
                schedule.horizon()
            ),
        };

        let mut result = ValuationResult::new(self.method(), value, self.base_confidence(), formula)
            .with_input(self.basis.key(), base)
            .with_input("growth_rate", schedule.explicit_rate)
            .with_input("discount_rate", config.discount_rate)
            .with_input("terminal_growth_rate", config.terminal_growth_rate)
            .with_input("shares_outstanding", inputs.shares_outstanding)
            .with_step(format!("Base {label}: {base:.0}"))
            .with_step(format!(
                "Years 1-{} at {:.2}%: present value {:.0}",
                config.explicit_years,
                schedule.explicit_rate * 100.0,
                projection.phase_values[0]
            ))
            .with_step(format!(
                "Next {} years at {:.2}%: present value {:.0}",
                config.decay_years,
                schedule.decayed_rate * 100.0,
                projection.phase_values[1]
            ))
            .with_step(format!(
                "Final {} years at {:.2}%: present value {:.0}",
                config.terminal_years,
                schedule.terminal_rate * 100.0,
                projection.phase_values[2]
            ));

        if self.basis == CashFlowBasis::FreeCashFlow {
            result = result
                .with_input("total_debt", inputs.summary.total_debt.or_zero())
                .with_input("cash_and_investments", inputs.summary.cash_and_investments.or_zero())
                .with_step(format!("Net cash bridge: {bridge:.0}"));
        }
        result = result.with_step(format!(
            "Equity value {equity_value:.0} / {:.0} shares = {value:.2}",
            inputs.shares_outstanding
        ));

        if reported.is_absent() {
            result = result.missing(format!("{label} required"));
        }
        require_shares(result, inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::fixtures::complete_inputs;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_schedule_phases() {
        let schedule = GrowthSchedule::new(0.08, &ValuationConfig::default());
        assert_eq!(schedule.horizon(), 20);
        assert_relative_eq!(schedule.rate_for_year(1), 0.08);
        assert_relative_eq!(schedule.rate_for_year(5), 0.08);
        assert_relative_eq!(schedule.rate_for_year(6), 0.06);
        assert_relative_eq!(schedule.rate_for_year(10), 0.06);
        assert_relative_eq!(schedule.rate_for_year(11), 0.04);
        assert_relative_eq!(schedule.rate_for_year(20), 0.04);
    }

    #[rstest]
    #[case(0.9, 0.5)]
    #[case(-0.7, -0.5)]
    fn test_growth_clamped(#[case] growth: f64, #[case] expected: f64) {
        let schedule = GrowthSchedule::new(growth, &ValuationConfig::default());
        assert_relative_eq!(schedule.explicit_rate, expected);
    }

    #[test]
    fn test_zero_growth_zero_discount_sums_flat() {
        let config = ValuationConfig {
            terminal_growth_rate: 0.0,
            ..ValuationConfig::default()
        };
        let projection = GrowthSchedule::new(0.0, &config).project(10.0, 0.0);
        assert_relative_eq!(projection.present_value, 200.0);
        assert_relative_eq!(projection.phase_values.iter().sum::<f64>(), 200.0);
    }

    #[test]
    fn test_single_year_discounting() {
        let config = ValuationConfig {
            explicit_years: 1,
            decay_years: 0,
            terminal_years: 0,
            ..ValuationConfig::default()
        };
        let projection = GrowthSchedule::new(0.10, &config).project(100.0, 0.10);
        assert_relative_eq!(projection.present_value, 100.0, epsilon = 1e-9);
        assert_relative_eq!(projection.final_cash_flow, 110.0, epsilon = 1e-9);
    }

    #[rstest]
    #[case(DiscountedCashFlowEstimator::operating_cash_flow())]
    #[case(DiscountedCashFlowEstimator::free_cash_flow())]
    #[case(DiscountedCashFlowEstimator::net_income())]
    fn test_value_increases_with_growth(#[case] estimator: DiscountedCashFlowEstimator) {
        let config = ValuationConfig::default();
        let mut previous = f64::NEG_INFINITY;
        for growth in [-0.2, 0.0, 0.05, 0.1, 0.3, 0.45] {
            let mut inputs = complete_inputs();
            inputs.summary.growth_rate = growth;
            let value = estimator.estimate(&inputs, &config).value;
            assert!(value > previous, "growth {growth} gave {value} <= {previous}");
            previous = value;
        }
    }

    #[test]
    fn test_free_cash_flow_bridge() {
        let config = ValuationConfig::default();
        let inputs = complete_inputs();
        let result = DiscountedCashFlowEstimator::free_cash_flow().estimate(&inputs, &config);
        let projection = GrowthSchedule::new(0.08, &config).project(10_000.0, 0.10);
        assert_relative_eq!(result.value, (projection.present_value + 2_000.0) / 1_000.0, epsilon = 1e-9);
        assert_eq!(result.confidence, Confidence::High);
        assert!(result.is_usable());
        assert_eq!(result.inputs["total_debt"], 5_000.0);
    }

    #[test]
    fn test_missing_operating_cash_flow_stays_visible() {
        let mut inputs = complete_inputs();
        inputs.summary.operating_cash_flow = Amount::ABSENT;
        let result =
            DiscountedCashFlowEstimator::operating_cash_flow().estimate(&inputs, &ValuationConfig::default());
        assert_eq!(result.method, ValuationMethod::DiscountedOperatingCashFlow);
        assert_eq!(result.value, 0.0);
        assert_eq!(result.confidence, Confidence::Low);
        assert_eq!(result.missing_data.as_deref(), Some("Operating Cash Flow required"));
    }

    #[test]
    fn test_net_income_confidence_medium() {
        let result = DiscountedCashFlowEstimator::net_income().estimate(&complete_inputs(), &ValuationConfig::default());
        assert_eq!(result.confidence, Confidence::Medium);
        assert!(result.steps.len() >= 4);
    }

    #[test]
    fn test_negative_cash_flow_floors_at_zero() {
        let mut inputs = complete_inputs();
        inputs.summary.net_income = Amount::new(-5_000.0);
        let result = DiscountedCashFlowEstimator::net_income().estimate(&inputs, &ValuationConfig::default());
        assert_eq!(result.value, 0.0);
        assert!(result.is_usable());
    }

    #[test]
    fn test_no_shares_flagged() {
        let mut inputs = complete_inputs();
        inputs.shares_outstanding = 0.0;
        let result =
            DiscountedCashFlowEstimator::free_cash_flow().estimate(&inputs, &ValuationConfig::default());
        assert_eq!(result.value, 0.0);
        assert_eq!(result.missing_data.as_deref(), Some("Shares Outstanding required"));
    }
}
