//! Valuation configuration.

use crate::error::{Result, ValuationError};
use serde::{Deserialize, Serialize};

/// Rates, horizons and fallback multiples used by every estimator.
///
/// Passed explicitly into the [`ValuationEngine`](crate::ValuationEngine);
/// there are no global constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValuationConfig {
    /// Required annual return used for discounting (default: 0.10)
    pub discount_rate: f64,
    /// Long-run growth rate for the terminal phase (default: 0.04)
    pub terminal_growth_rate: f64,
    /// Risk-free rate; the discount rate may not fall below it (default: 0.045)
    pub risk_free_rate: f64,
    /// Company growth is clamped to +/- this rate (default: 0.50)
    pub growth_cap: f64,
    /// Share of the explicit growth rate kept in the decay phase (default: 0.75)
    pub decay_factor: f64,
    /// Years at the company's own growth rate (default: 5)
    pub explicit_years: u32,
    /// Years at the decayed growth rate (default: 5)
    pub decay_years: u32,
    /// Years at the terminal growth rate (default: 10)
    pub terminal_years: u32,
    /// PEG ratio considered fair (default: 1.0)
    pub fair_peg_ratio: f64,
    /// PSG ratio considered fair (default: 1.0)
    pub fair_psg_ratio: f64,
    /// Growth rate assumed when no history is available (default: 0.05)
    pub default_growth_rate: f64,
    /// P/S used when neither history nor the quote provides one (default: 2.0)
    pub fallback_price_to_sales: f64,
    /// P/E used when neither history nor the quote provides one (default: 15.0)
    pub fallback_price_to_earnings: f64,
    /// P/B used when neither history nor the quote provides one (default: 3.0)
    pub fallback_price_to_book: f64,
    /// Historical P/E observations above this are ignored (default: 200.0)
    pub max_historical_pe: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            discount_rate: 0.10,
            terminal_growth_rate: 0.04,
            risk_free_rate: 0.045,
            growth_cap: 0.50,
            decay_factor: 0.75,
            explicit_years: 5,
            decay_years: 5,
            terminal_years: 10,
            fair_peg_ratio: 1.0,
            fair_psg_ratio: 1.0,
            default_growth_rate: 0.05,
            fallback_price_to_sales: 2.0,
            fallback_price_to_earnings: 15.0,
            fallback_price_to_book: 3.0,
            max_historical_pe: 200.0,
        }
    }
}

impl ValuationConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the discount rate.
    pub const fn with_discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = rate;
        self
    }

    /// Set the terminal growth rate.
    pub const fn with_terminal_growth_rate(mut self, rate: f64) -> Self {
        self.terminal_growth_rate = rate;
        self
    }

    /// Total projection horizon in years.
    pub const fn horizon_years(&self) -> u32 {
        self.explicit_years + self.decay_years + self.terminal_years
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("discount_rate", self.discount_rate),
            ("terminal_growth_rate", self.terminal_growth_rate),
            ("risk_free_rate", self.risk_free_rate),
            ("growth_cap", self.growth_cap),
            ("decay_factor", self.decay_factor),
            ("default_growth_rate", self.default_growth_rate),
        ];
        if let Some((name, _)) = rates.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{name} must be finite")));
        }
        if self.discount_rate <= self.terminal_growth_rate {
            return Err(invalid(format!(
                "discount rate {} must exceed terminal growth rate {}",
                self.discount_rate, self.terminal_growth_rate
            )));
        }
        if self.discount_rate < self.risk_free_rate {
            return Err(invalid(format!(
                "discount rate {} is below the risk-free rate {}",
                self.discount_rate, self.risk_free_rate
            )));
        }
        if self.growth_cap <= 0.0 {
            return Err(invalid("growth_cap must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.decay_factor) {
            return Err(invalid("decay_factor must lie in [0, 1]".to_string()));
        }
        if self.explicit_years == 0 {
            return Err(invalid("explicit_years must be positive".to_string()));
        }

        let multiples = [
            ("fair_peg_ratio", self.fair_peg_ratio),
            ("fair_psg_ratio", self.fair_psg_ratio),
            ("fallback_price_to_sales", self.fallback_price_to_sales),
            ("fallback_price_to_earnings", self.fallback_price_to_earnings),
            ("fallback_price_to_book", self.fallback_price_to_book),
            ("max_historical_pe", self.max_historical_pe),
        ];
        if let Some((name, _)) = multiples.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(invalid(format!("{name} must be positive")));
        }
        Ok(())
    }
}

fn invalid(message: String) -> ValuationError {
    ValuationError::InvalidConfig(message)
}
