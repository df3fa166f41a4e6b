//! Fourth-quarter derivation by the residual method.
//!
//! Filers rarely report Q4 on its own: the annual report covers it. For flow
//! statements Q4 is the annual value minus the first three discrete quarters;
//! for the balance sheet the year-end snapshot already is the Q4 snapshot.

use crate::amount::Amount;
use crate::line_item::{Aggregation, LineItem};
use crate::record::{DataQualityWarning, RecordOrigin, StatementRecord};
use chrono::Days;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Derive Q4 records for annual periods that have Q1-Q3 but no Q4.
///
/// `quarterly` must already be discrete (see [`quarterize`](crate::quarterize())).
/// Returns the derived records and any data-quality warnings (negative
/// residuals on nominally non-negative items).
pub fn derive_q4(
    annual: &[StatementRecord],
    quarterly: &[StatementRecord],
) -> (Vec<StatementRecord>, Vec<DataQualityWarning>) {
    let by_period: BTreeMap<(i32, u8), &StatementRecord> = quarterly
        .iter()
        .filter_map(|r| r.fiscal_quarter.map(|q| ((r.fiscal_year, q), r)))
        .collect();

    let mut derived = Vec::new();
    let mut warnings = Vec::new();

    for year in annual {
        let fy = year.fiscal_year;
        if by_period.contains_key(&(fy, 4)) {
            continue;
        }
        let (Some(q1), Some(q2), Some(q3)) = (
            by_period.get(&(fy, 1)),
            by_period.get(&(fy, 2)),
            by_period.get(&(fy, 3)),
        ) else {
            debug!(kind = %year.kind, fiscal_year = fy, "skipping Q4 derivation: Q1-Q3 incomplete");
            continue;
        };

        let record = if year.kind.is_flow() {
            residual_q4(year, [*q1, *q2, *q3], &mut warnings)
        } else {
            snapshot_q4(year)
        };
        derived.push(record);
    }

    (derived, warnings)
}

/// Balance sheet: the annual record, relabelled as Q4.
fn snapshot_q4(annual: &StatementRecord) -> StatementRecord {
    let mut record = annual.clone();
    record.fiscal_quarter = Some(4);
    record.origin = RecordOrigin::DerivedQ4;
    record
}

fn residual_q4(
    annual: &StatementRecord,
    quarters: [&StatementRecord; 3],
    warnings: &mut Vec<DataQualityWarning>,
) -> StatementRecord {
    let q3 = quarters[2];
    let mut record = StatementRecord::new(annual.kind, annual.date, annual.fiscal_year, Some(4));
    record.origin = RecordOrigin::DerivedQ4;
    record.period_start = q3.date.checked_add_days(Days::new(1));

    for item in annual.kind.items() {
        if item.is_derived() {
            continue;
        }
        let value = match item.aggregation() {
            Aggregation::Flow => {
                annual.get(item) - quarters.iter().map(|q| q.get(item)).sum::<Amount>()
            }
            // Approximation: EPS is not additive when share counts change.
            Aggregation::PerShare => annual.get(item) / 4.0,
            Aggregation::Instant => annual.get(item),
            Aggregation::Opening => q3.get(LineItem::EndingCash),
        };
        record.set(item, value);

        if item.is_additive() {
            record.discrete.insert(item);
        }
        if item.aggregation() == Aggregation::Flow && item.is_non_negative() && value.is_negative() {
            let message = format!(
                "derived Q4 {} is negative ({}); Q1-Q3 may not be discrete",
                item.label(),
                value
            );
            warn!(
                kind = %annual.kind,
                fiscal_year = annual.fiscal_year,
                item = %item,
                value = value.or_zero(),
                "negative residual in derived Q4"
            );
            warnings.push(DataQualityWarning {
                kind: annual.kind,
                fiscal_year: annual.fiscal_year,
                fiscal_quarter: Some(4),
                item: Some(item),
                value: value.value(),
                message,
            });
        }
    }

    record.refresh_free_cash_flow();
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_item::StatementKind;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn income(end: NaiveDate, quarter: Option<u8>, revenue: f64, eps: f64) -> StatementRecord {
        StatementRecord::new(StatementKind::Income, end, 2023, quarter)
            .with(LineItem::Revenue, revenue)
            .with(LineItem::EpsDiluted, eps)
            .with(LineItem::WeightedSharesDiluted, 1000.0)
    }

    fn quarters() -> Vec<StatementRecord> {
        vec![
            income(date(2023, 3, 31), Some(1), 100.0, 0.2),
            income(date(2023, 6, 30), Some(2), 110.0, 0.25),
            income(date(2023, 9, 30), Some(3), 120.0, 0.3),
        ]
    }

    #[test]
    fn test_flow_residual() {
        let annual = vec![income(date(2023, 12, 31), None, 460.0, 1.2)];
        let (derived, warnings) = derive_q4(&annual, &quarters());

        assert_eq!(derived.len(), 1);
        assert!(warnings.is_empty());
        let q4 = &derived[0];
        assert_eq!(q4.fiscal_quarter, Some(4));
        assert_eq!(q4.date, date(2023, 12, 31));
        assert_eq!(q4.origin, RecordOrigin::DerivedQ4);
        assert_relative_eq!(q4.get(LineItem::Revenue).value().unwrap(), 130.0);
        assert_relative_eq!(q4.get(LineItem::EpsDiluted).value().unwrap(), 0.3);
        assert_eq!(q4.get(LineItem::WeightedSharesDiluted), Amount::new(1000.0));
        assert_eq!(q4.period_start, Some(date(2023, 10, 1)));
    }

    #[test]
    fn test_absent_operand_gives_absent_residual() {
        let annual = vec![
            StatementRecord::new(StatementKind::Income, date(2023, 12, 31), 2023, None)
                .with(LineItem::Revenue, 460.0)
                .with(LineItem::NetIncome, 40.0),
        ];
        let (derived, _) = derive_q4(&annual, &quarters());
        assert!(derived[0].get(LineItem::NetIncome).is_absent());
    }

    #[test]
    fn test_negative_residual_flagged() {
        let annual = vec![income(date(2023, 12, 31), None, 300.0, 1.0)];
        let (derived, warnings) = derive_q4(&annual, &quarters());

        assert_relative_eq!(derived[0].get(LineItem::Revenue).value().unwrap(), -30.0);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].item, Some(LineItem::Revenue));
        assert_eq!(warnings[0].fiscal_quarter, Some(4));
        assert_relative_eq!(warnings[0].value.unwrap(), -30.0);
    }

    #[test]
    fn test_skipped_when_quarter_missing() {
        let annual = vec![income(date(2023, 12, 31), None, 460.0, 1.2)];
        let partial: Vec<_> = quarters().into_iter().filter(|r| r.fiscal_quarter != Some(2)).collect();
        let (derived, _) = derive_q4(&annual, &partial);
        assert!(derived.is_empty());
    }

    #[test]
    fn test_skipped_when_q4_exists() {
        let annual = vec![income(date(2023, 12, 31), None, 460.0, 1.2)];
        let mut all = quarters();
        all.push(income(date(2023, 12, 31), Some(4), 130.0, 0.3));
        let (derived, _) = derive_q4(&annual, &all);
        assert!(derived.is_empty());
    }

    #[test]
    fn test_balance_sheet_copies_annual() {
        let bs = |end, quarter| {
            StatementRecord::new(StatementKind::Balance, end, 2023, quarter)
                .with(LineItem::TotalAssets, 1000.0)
                .with(LineItem::ShareholderEquity, 400.0)
        };
        let annual = vec![bs(date(2023, 12, 31), None).with(LineItem::Cash, 55.0)];
        let quarterly = vec![
            bs(date(2023, 3, 31), Some(1)),
            bs(date(2023, 6, 30), Some(2)),
            bs(date(2023, 9, 30), Some(3)),
        ];

        let (derived, warnings) = derive_q4(&annual, &quarterly);
        assert!(warnings.is_empty());
        let q4 = &derived[0];
        assert_eq!(q4.values, annual[0].values);
        assert_eq!(q4.fiscal_year, annual[0].fiscal_year);
        assert_eq!(q4.date, annual[0].date);
        assert_eq!(q4.fiscal_quarter, Some(4));
    }

    #[test]
    fn test_opening_cash_from_q3() {
        let cash = |end, quarter| StatementRecord::new(StatementKind::CashFlow, end, 2023, quarter);
        let annual = vec![
            cash(date(2023, 12, 31), None)
                .with(LineItem::OperatingCashFlow, 400.0)
                .with(LineItem::CapitalExpenditures, 100.0)
                .with(LineItem::EndingCash, 90.0),
        ];
        let quarterly = vec![
            cash(date(2023, 3, 31), Some(1))
                .with(LineItem::OperatingCashFlow, 100.0)
                .with(LineItem::CapitalExpenditures, 20.0),
            cash(date(2023, 6, 30), Some(2))
                .with(LineItem::OperatingCashFlow, 100.0)
                .with(LineItem::CapitalExpenditures, 20.0),
            cash(date(2023, 9, 30), Some(3))
                .with(LineItem::OperatingCashFlow, 100.0)
                .with(LineItem::CapitalExpenditures, 20.0)
                .with(LineItem::EndingCash, 70.0),
        ];

        let (derived, _) = derive_q4(&annual, &quarterly);
        let q4 = &derived[0];
        assert_eq!(q4.get(LineItem::BeginningCash), Amount::new(70.0));
        assert_eq!(q4.get(LineItem::EndingCash), Amount::new(90.0));
        assert_eq!(q4.get(LineItem::FreeCashFlow), Amount::new(60.0));
    }
}
