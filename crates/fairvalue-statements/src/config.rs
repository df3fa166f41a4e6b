//! Reconstruction configuration.

use crate::error::{ReconstructionError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for [`reconstruct`](crate::reconstruct).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReconstructionConfig {
    /// Month (1-12) the fiscal year ends in; `None` infers it from annual filings
    pub fiscal_year_end_month: Option<u32>,
    /// Maximum number of annual records kept (newest first)
    pub annual_limit: usize,
    /// Maximum number of quarterly records kept (newest first)
    pub quarterly_limit: usize,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            fiscal_year_end_month: None,
            annual_limit: 10,
            quarterly_limit: 20,
        }
    }
}

impl ReconstructionConfig {
    /// Fix the fiscal-year-end month.
    pub const fn with_fiscal_year_end_month(mut self, month: u32) -> Self {
        self.fiscal_year_end_month = Some(month);
        self
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(month) = self.fiscal_year_end_month
            && !(1..=12).contains(&month)
        {
            return Err(ReconstructionError::InvalidFiscalYearEndMonth(month));
        }
        if self.annual_limit == 0 || self.quarterly_limit == 0 {
            return Err(ReconstructionError::InvalidConfig(
                "record limits must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = ReconstructionConfig::default();
        assert_eq!(config.annual_limit, 10);
        assert_eq!(config.quarterly_limit, 20);
        assert!(config.fiscal_year_end_month.is_none());
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(13)]
    fn test_invalid_month(#[case] month: u32) {
        let config = ReconstructionConfig::default().with_fiscal_year_end_month(month);
        assert!(matches!(
            config.validate(),
            Err(ReconstructionError::InvalidFiscalYearEndMonth(m)) if m == month
        ));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let config = ReconstructionConfig {
            annual_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ReconstructionConfig =
            serde_json::from_str(r#"{"fiscal_year_end_month": 9}"#).unwrap();
        assert_eq!(config.fiscal_year_end_month, Some(9));
        assert_eq!(config.quarterly_limit, 20);
    }
}
