//! Five-level valuation category.

use crate::result::{ComprehensiveValuation, Confidence};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// How far the price sits from fair value.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValuationLevel {
    /// Price more than 20% below fair value
    #[display("highly-undervalued")]
    HighlyUndervalued,
    /// Price 10-20% below fair value
    #[display("undervalued")]
    Undervalued,
    /// Price within 10% of fair value
    #[display("fairly-valued")]
    FairlyValued,
    /// Price 10-20% above fair value
    #[display("overvalued")]
    Overvalued,
    /// Price more than 20% above fair value
    #[display("highly-overvalued")]
    HighlyOvervalued,
}

impl ValuationLevel {
    /// Classify a discount (negative) or premium (positive) in percent.
    pub fn from_discount_premium(percent: f64) -> Self {
        if percent < -20.0 {
            Self::HighlyUndervalued
        } else if percent < -10.0 {
            Self::Undervalued
        } else if percent <= 10.0 {
            Self::FairlyValued
        } else if percent <= 20.0 {
            Self::Overvalued
        } else {
            Self::HighlyOvervalued
        }
    }
}

/// Category of a valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationCategory {
    /// Level
    pub level: ValuationLevel,
    /// `(price - fair value) / fair value * 100`
    pub discount_premium_percent: f64,
    /// Confidence from the number of usable estimators
    pub confidence: Confidence,
    /// Fair value per share
    pub fair_value: f64,
    /// Market price
    pub current_price: f64,
}

/// Categorize a valuation; `None` when the fair value is not positive.
pub fn categorize(valuation: &ComprehensiveValuation) -> Option<ValuationCategory> {
    let fair_value = valuation.average_intrinsic_value;
    if fair_value.is_nan() || fair_value <= 0.0 {
        return None;
    }
    let price = valuation.current_price;
    let percent = (price - fair_value) / fair_value * 100.0;
    let confidence = match valuation.usable_count() {
        n if n >= 6 => Confidence::High,
        n if n >= 3 => Confidence::Medium,
        _ => Confidence::Low,
    };

    Some(ValuationCategory {
        level: ValuationLevel::from_discount_premium(percent),
        discount_premium_percent: percent,
        confidence,
        fair_value,
        current_price: price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Recommendation, ValuationMethod, ValuationResult};
    use approx::assert_relative_eq;
    use chrono::Utc;
    use rstest::rstest;

    fn valuation(price: f64, fair: f64, usable: usize) -> ComprehensiveValuation {
        let valuations = ValuationMethod::ALL
            .iter()
            .enumerate()
            .map(|(i, method)| {
                let result = ValuationResult::new(*method, fair, Confidence::Medium, "f");
                if i < usable { result } else { result.missing("input") }
            })
            .collect();
        ComprehensiveValuation {
            current_price: price,
            average_intrinsic_value: fair,
            upside_percent: 0.0,
            valuations,
            recommendation: Recommendation::Fair,
            calculated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(70.0, ValuationLevel::HighlyUndervalued)]
    #[case(85.0, ValuationLevel::Undervalued)]
    #[case(90.0, ValuationLevel::FairlyValued)]
    #[case(110.0, ValuationLevel::FairlyValued)]
    #[case(115.0, ValuationLevel::Overvalued)]
    #[case(130.0, ValuationLevel::HighlyOvervalued)]
    fn test_levels(#[case] price: f64, #[case] expected: ValuationLevel) {
        let category = categorize(&valuation(price, 100.0, 9)).unwrap();
        assert_eq!(category.level, expected);
    }

    #[test]
    fn test_discount_premium_percent() {
        let category = categorize(&valuation(150.0, 200.0, 9)).unwrap();
        assert_relative_eq!(category.discount_premium_percent, -25.0);
        assert_eq!(category.fair_value, 200.0);
        assert_eq!(category.current_price, 150.0);
    }

    #[rstest]
    #[case(9, Confidence::High)]
    #[case(6, Confidence::High)]
    #[case(5, Confidence::Medium)]
    #[case(3, Confidence::Medium)]
    #[case(2, Confidence::Low)]
    fn test_confidence_from_usable_count(#[case] usable: usize, #[case] expected: Confidence) {
        let category = categorize(&valuation(100.0, 100.0, usable)).unwrap();
        assert_eq!(category.confidence, expected);
    }

    #[test]
    fn test_no_category_without_fair_value() {
        assert!(categorize(&valuation(100.0, 0.0, 9)).is_none());
    }
}
