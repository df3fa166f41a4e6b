//! Trailing-twelve-month aggregation for flow statements.

use crate::amount::Amount;
use crate::line_item::Aggregation;
use crate::record::{DataQualityWarning, RecordOrigin, StatementRecord};
use tracing::warn;

/// Four quarter-ends of contiguous quarters lie within this many days.
const MAX_CONTIGUOUS_SPAN_DAYS: i64 = 300;

/// Sum the four most recent discrete quarters.
///
/// Returns `None` for balance sheets and when fewer than four quarters exist.
/// A warning is returned when the quarters used are not contiguous.
pub fn trailing_twelve_months(
    quarterly: &[StatementRecord],
) -> Option<(StatementRecord, Option<DataQualityWarning>)> {
    let mut recent: Vec<&StatementRecord> = quarterly.iter().filter(|r| r.is_quarterly()).collect();
    if recent.len() < 4 || !recent[0].kind.is_flow() {
        return None;
    }
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(4);

    let newest = recent[0];
    let oldest = recent[3];
    let kind = newest.kind;

    let mut record = StatementRecord::new(kind, newest.date, newest.fiscal_year, None);
    record.origin = RecordOrigin::TrailingTwelveMonths;
    record.period_start = oldest.period_start;

    for item in kind.items() {
        if item.is_derived() {
            continue;
        }
        let value = match item.aggregation() {
            Aggregation::Flow | Aggregation::PerShare => {
                recent.iter().map(|r| r.get(item)).sum::<Amount>()
            }
            Aggregation::Instant => newest.get(item),
            Aggregation::Opening => oldest.get(item),
        };
        record.set(item, value);
    }
    record.refresh_free_cash_flow();

    let span = newest.date.signed_duration_since(oldest.date).num_days();
    let warning = (span > MAX_CONTIGUOUS_SPAN_DAYS).then(|| {
        warn!(
            %kind,
            newest = %newest.date,
            oldest = %oldest.date,
            "trailing twelve months built from non-contiguous quarters"
        );
        DataQualityWarning {
            kind,
            fiscal_year: newest.fiscal_year,
            fiscal_quarter: None,
            item: None,
            value: None,
            message: format!(
                "TTM quarters span more than a year ({} to {})",
                oldest.date, newest.date
            ),
        }
    });

    Some((record, warning))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_item::{LineItem, StatementKind};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn q(end: NaiveDate, fy: i32, quarter: u8, revenue: f64) -> StatementRecord {
        StatementRecord::new(StatementKind::Income, end, fy, Some(quarter))
            .with(LineItem::Revenue, revenue)
            .with(LineItem::EpsDiluted, revenue / 100.0)
            .with(LineItem::WeightedSharesDiluted, revenue * 10.0)
    }

    #[test]
    fn test_sums_four_most_recent() {
        let quarters = vec![
            q(date(2023, 3, 31), 2023, 1, 90.0),
            q(date(2023, 6, 30), 2023, 2, 100.0),
            q(date(2023, 9, 30), 2023, 3, 110.0),
            q(date(2023, 12, 31), 2023, 4, 120.0),
            q(date(2024, 3, 31), 2024, 1, 130.0),
        ];

        let (ttm, warning) = trailing_twelve_months(&quarters).unwrap();
        assert!(warning.is_none());
        assert_eq!(ttm.origin, RecordOrigin::TrailingTwelveMonths);
        assert_eq!(ttm.fiscal_quarter, None);
        assert_eq!(ttm.date, date(2024, 3, 31));
        assert_eq!(ttm.fiscal_year, 2024);
        assert_relative_eq!(ttm.get(LineItem::Revenue).value().unwrap(), 460.0);
        assert_relative_eq!(ttm.get(LineItem::EpsDiluted).value().unwrap(), 4.6);
        assert_relative_eq!(ttm.get(LineItem::WeightedSharesDiluted).value().unwrap(), 1300.0);
    }

    #[test]
    fn test_requires_four_quarters() {
        let quarters = vec![
            q(date(2023, 6, 30), 2023, 2, 100.0),
            q(date(2023, 9, 30), 2023, 3, 110.0),
            q(date(2023, 12, 31), 2023, 4, 120.0),
        ];
        assert!(trailing_twelve_months(&quarters).is_none());
    }

    #[test]
    fn test_gap_produces_warning() {
        let quarters = vec![
            q(date(2023, 3, 31), 2023, 1, 90.0),
            q(date(2023, 9, 30), 2023, 3, 110.0),
            q(date(2023, 12, 31), 2023, 4, 120.0),
            q(date(2024, 3, 31), 2024, 1, 130.0),
        ];
        let (_, warning) = trailing_twelve_months(&quarters).unwrap();
        assert!(warning.is_some());
    }

    #[test]
    fn test_cash_positions_not_summed() {
        let cash = |end, fy, quarter, begin: f64, finish: f64| {
            StatementRecord::new(StatementKind::CashFlow, end, fy, Some(quarter))
                .with(LineItem::OperatingCashFlow, 10.0)
                .with(LineItem::CapitalExpenditures, 4.0)
                .with(LineItem::BeginningCash, begin)
                .with(LineItem::EndingCash, finish)
        };
        let quarters = vec![
            cash(date(2023, 3, 31), 2023, 1, 100.0, 110.0),
            cash(date(2023, 6, 30), 2023, 2, 110.0, 120.0),
            cash(date(2023, 9, 30), 2023, 3, 120.0, 130.0),
            cash(date(2023, 12, 31), 2023, 4, 130.0, 140.0),
        ];

        let (ttm, _) = trailing_twelve_months(&quarters).unwrap();
        assert_eq!(ttm.get(LineItem::BeginningCash), Amount::new(100.0));
        assert_eq!(ttm.get(LineItem::EndingCash), Amount::new(140.0));
        assert_eq!(ttm.get(LineItem::OperatingCashFlow), Amount::new(40.0));
        assert_eq!(ttm.get(LineItem::FreeCashFlow), Amount::new(24.0));
    }

    #[test]
    fn test_balance_sheet_has_no_ttm() {
        let quarters: Vec<_> = (1..=4u8)
            .map(|quarter| {
                StatementRecord::new(StatementKind::Balance, date(2023, 3 * u32::from(quarter), 28), 2023, Some(quarter))
            })
            .collect();
        assert!(trailing_twelve_months(&quarters).is_none());
    }
}
