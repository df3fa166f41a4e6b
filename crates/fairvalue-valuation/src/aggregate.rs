//! Confidence-weighted aggregation.

use crate::result::{ComprehensiveValuation, Recommendation, ValuationResult};
use chrono::{DateTime, Utc};

/// Weighted mean of the usable estimates.
///
/// Estimates flagged with missing data are left out; when every estimate is
/// flagged, all of them are averaged. Returns 0 for an empty slice.
pub fn weighted_average(valuations: &[ValuationResult]) -> f64 {
    let usable: Vec<&ValuationResult> = valuations.iter().filter(|v| v.is_usable()).collect();
    let pool: Vec<&ValuationResult> = if usable.is_empty() {
        valuations.iter().collect()
    } else {
        usable
    };

    let total_weight: f64 = pool.iter().map(|v| v.confidence.weight()).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    pool.iter().map(|v| v.value * v.confidence.weight()).sum::<f64>() / total_weight
}

/// `(fair_value - price) / price * 100`, 0 when the price is not positive.
pub fn upside_percent(fair_value: f64, price: f64) -> f64 {
    if price > 0.0 {
        (fair_value - price) / price * 100.0
    } else {
        0.0
    }
}

/// Combine estimates into a [`ComprehensiveValuation`].
pub fn aggregate(
    current_price: f64,
    valuations: Vec<ValuationResult>,
    calculated_at: DateTime<Utc>,
) -> ComprehensiveValuation {
    let average_intrinsic_value = weighted_average(&valuations);
    let upside_percent = upside_percent(average_intrinsic_value, current_price);
    ComprehensiveValuation {
        current_price,
        average_intrinsic_value,
        upside_percent,
        valuations,
        recommendation: Recommendation::from_upside(upside_percent),
        calculated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Confidence, ValuationMethod};
    use approx::assert_relative_eq;

    fn result(method: ValuationMethod, value: f64, confidence: Confidence) -> ValuationResult {
        ValuationResult::new(method, value, confidence, "f")
    }

    #[test]
    fn test_weighted_by_confidence() {
        let valuations = vec![
            result(ValuationMethod::DiscountedFreeCashFlow, 100.0, Confidence::High),
            result(ValuationMethod::MeanPriceToSales, 120.0, Confidence::Medium),
            result(ValuationMethod::PriceSalesToGrowth, 80.0, Confidence::Low),
        ];
        assert_relative_eq!(weighted_average(&valuations), 620.0 / 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_excluded() {
        let valuations = vec![
            result(ValuationMethod::DiscountedFreeCashFlow, 100.0, Confidence::High),
            result(ValuationMethod::MeanPriceToBook, 0.0, Confidence::Medium).missing("Shareholder Equity required"),
        ];
        assert_relative_eq!(weighted_average(&valuations), 100.0);
    }

    #[test]
    fn test_all_missing_falls_back_to_all() {
        let valuations = vec![
            result(ValuationMethod::PriceEarningsToGrowth, 90.0, Confidence::Medium).missing("Earnings Growth required"),
            result(ValuationMethod::PriceSalesToGrowth, 30.0, Confidence::Low).missing("Revenue Growth required"),
        ];
        assert_relative_eq!(weighted_average(&valuations), 60.0);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(weighted_average(&[]), 0.0);
    }

    #[test]
    fn test_upside_and_recommendation() {
        let valuation = aggregate(
            100.0,
            vec![result(ValuationMethod::MeanPriceToEarnings, 130.0, Confidence::High)],
            Utc::now(),
        );
        assert_relative_eq!(valuation.upside_percent, 30.0);
        assert_eq!(valuation.recommendation, Recommendation::Undervalued);
    }

    #[test]
    fn test_zero_price_has_no_upside() {
        assert_eq!(upside_percent(50.0, 0.0), 0.0);
        assert_eq!(upside_percent(50.0, -1.0), 0.0);
    }
}
