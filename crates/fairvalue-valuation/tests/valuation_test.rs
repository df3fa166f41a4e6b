//! Engine-level valuation scenarios.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use fairvalue_data::Quote;
use fairvalue_statements::{Amount, FinancialStatements, LineItem, StatementKind, StatementRecord};
use fairvalue_valuation::{
    Confidence, FinancialsSummary, HistoricalMultiples, ManualOverrides, Recommendation,
    ValuationConfig, ValuationEngine, ValuationInputs, ValuationLevel, ValuationMethod,
    ValuationResult, weighted_average,
};

fn engine() -> ValuationEngine {
    ValuationEngine::new(ValuationConfig::default()).unwrap()
}

/// $150 stock, 1B shares, $15B free cash flow growing 8%.
fn large_cap_inputs() -> ValuationInputs {
    let config = ValuationConfig::default();
    let mut summary = FinancialsSummary::empty(&config);
    summary.free_cash_flow = Amount::new(15.0e9);
    summary.operating_cash_flow = Amount::new(18.0e9);
    summary.net_income = Amount::new(12.0e9);
    summary.revenue = Amount::new(60.0e9);
    summary.growth_rate = 0.08;
    ValuationInputs::new(150.0, 1.0e9, summary, HistoricalMultiples::fallback(&config))
}

#[test]
fn test_free_cash_flow_scenario_undervalued() {
    let inputs = large_cap_inputs();
    let valuation = engine().evaluate(&inputs);

    let dfcf = valuation.get(ValuationMethod::DiscountedFreeCashFlow).unwrap();
    assert!(dfcf.value > 200.0, "DFCF-20 gave {}", dfcf.value);
    assert_relative_eq!(dfcf.value, 216.94, epsilon = 0.01);
    assert_eq!(dfcf.confidence, Confidence::High);
    assert_eq!(
        Recommendation::from_upside((dfcf.value - 150.0) / 150.0 * 100.0),
        Recommendation::Undervalued
    );
}

#[test]
fn test_missing_equity_reports_low_confidence_price_to_book() {
    let valuation = engine().evaluate(&large_cap_inputs());
    let pb = valuation.get(ValuationMethod::MeanPriceToBook).unwrap();
    assert_eq!(pb.confidence, Confidence::Low);
    assert_eq!(pb.missing_data.as_deref(), Some("Shareholder Equity required"));

    // Flagged estimates do not drag the aggregate.
    let usable: Vec<_> = valuation.valuations.iter().filter(|v| v.is_usable()).cloned().collect();
    assert_relative_eq!(valuation.average_intrinsic_value, weighted_average(&usable), epsilon = 1e-9);
}

#[test]
fn test_three_estimator_weighting() {
    let valuations = vec![
        ValuationResult::new(ValuationMethod::DiscountedOperatingCashFlow, 100.0, Confidence::High, "a"),
        ValuationResult::new(ValuationMethod::MeanPriceToSales, 120.0, Confidence::Medium, "b"),
        ValuationResult::new(ValuationMethod::PriceSalesToGrowth, 80.0, Confidence::Low, "c"),
    ];
    assert_relative_eq!(weighted_average(&valuations), 103.333_333, epsilon = 1e-5);
}

#[test]
fn test_discounted_family_monotone_in_growth() {
    let engine = engine();
    let family = [
        ValuationMethod::DiscountedOperatingCashFlow,
        ValuationMethod::DiscountedFreeCashFlow,
        ValuationMethod::DiscountedNetIncome,
        ValuationMethod::TerminalValue,
    ];
    let at = |growth: f64| {
        let mut inputs = large_cap_inputs();
        inputs.summary.growth_rate = growth;
        engine.evaluate(&inputs)
    };

    let rates = [-0.1, 0.0, 0.04, 0.08, 0.15, 0.3];
    for pair in rates.windows(2) {
        let (low, high) = (at(pair[0]), at(pair[1]));
        for method in family {
            let (l, h) = (low.get(method).unwrap().value, high.get(method).unwrap().value);
            assert!(h > l, "{method}: growth {} -> {} gave {l} -> {h}", pair[0], pair[1]);
        }
    }
}

#[test]
fn test_category_from_engine() {
    let engine = engine();
    let valuation = engine.evaluate(&large_cap_inputs());
    let category = engine.categorize(&valuation).unwrap();
    assert_eq!(category.fair_value, valuation.average_intrinsic_value);
    let expected = ValuationLevel::from_discount_premium(
        (150.0 - valuation.average_intrinsic_value) / valuation.average_intrinsic_value * 100.0,
    );
    assert_eq!(category.level, expected);
}

#[test]
fn test_zero_price_has_no_upside() {
    let mut inputs = large_cap_inputs();
    inputs.price = 0.0;
    let valuation = engine().evaluate(&inputs);
    assert_eq!(valuation.upside_percent, 0.0);
    assert_eq!(valuation.recommendation, Recommendation::Fair);
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn reconstructed() -> FinancialStatements {
    let mut statements = FinancialStatements::empty(12);
    for (i, year) in (2019..=2023).rev().enumerate() {
        let scale = 1.0 / 1.1_f64.powi(i as i32);
        statements.income.annual.push(
            StatementRecord::new(StatementKind::Income, date(year, 12, 31), year, None)
                .with(LineItem::Revenue, 1_000.0 * scale)
                .with(LineItem::NetIncome, 100.0 * scale),
        );
        statements.cash_flow.annual.push(
            StatementRecord::new(StatementKind::CashFlow, date(year, 12, 31), year, None)
                .with(LineItem::OperatingCashFlow, 150.0 * scale)
                .with(LineItem::CapitalExpenditures, 30.0 * scale)
                .with(LineItem::FreeCashFlow, 120.0 * scale),
        );
    }
    statements.balance.annual.push(
        StatementRecord::new(StatementKind::Balance, date(2023, 12, 31), 2023, None)
            .with(LineItem::LongTermDebt, 200.0)
            .with(LineItem::Cash, 50.0),
    );
    statements
}

#[test]
fn test_value_from_statements_with_overrides() {
    let engine = engine();
    let quote = Quote::new("ACME", 12.0, 100.0);

    let plain = engine.value(&reconstructed(), &quote, &ManualOverrides::default());
    let pb = plain.get(ValuationMethod::MeanPriceToBook).unwrap();
    assert!(!pb.is_usable());

    let overrides = ManualOverrides {
        shareholder_equity: Some(600.0),
        ..ManualOverrides::default()
    };
    let filled = engine.value(&reconstructed(), &quote, &overrides);
    let pb = filled.get(ValuationMethod::MeanPriceToBook).unwrap();
    assert!(pb.is_usable());
    assert_eq!(pb.confidence, Confidence::Medium);
    // Fallback P/B 3.0 x 600 / 100 shares
    assert_relative_eq!(pb.value, 18.0);

    // Four years of 10% revenue growth
    let dfcf = filled.get(ValuationMethod::DiscountedFreeCashFlow).unwrap();
    assert_relative_eq!(dfcf.inputs["growth_rate"], 0.1, epsilon = 1e-9);
    assert_relative_eq!(dfcf.inputs["total_debt"], 200.0);
}
