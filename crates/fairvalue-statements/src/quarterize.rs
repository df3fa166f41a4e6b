//! Quarterizer: year-to-date quarterly figures → single-quarter figures.
//!
//! Records arrive with a per-item `discrete` marker set by the builder. For
//! each fiscal year the quarterizer walks quarters in order keeping a
//! running year-to-date total per item:
//!
//! - a discrete value passes through and extends the running total;
//! - a cumulative value becomes `value - ytd_before` and resets the running
//!   total to `value`;
//! - a cumulative value whose preceding quarter is missing becomes absent.
//!
//! Q1 year-to-date equals Q1, so Q1 values always pass through.

use crate::amount::Amount;
use crate::line_item::{LineItem, StatementKind};
use crate::record::StatementRecord;
use std::collections::BTreeMap;

/// Convert quarterly flow records of one statement kind to discrete values.
///
/// Balance sheet records are returned unchanged. Output is ordered by date.
pub fn quarterize(records: Vec<StatementRecord>) -> Vec<StatementRecord> {
    let Some(kind) = records.first().map(|r| r.kind) else {
        return records;
    };
    if !kind.is_flow() {
        return records;
    }

    let mut by_year: BTreeMap<i32, Vec<StatementRecord>> = BTreeMap::new();
    for record in records {
        by_year.entry(record.fiscal_year).or_default().push(record);
    }

    let mut out = Vec::new();
    for (_, mut year) in by_year {
        year.sort_by_key(|r| r.fiscal_quarter);
        quarterize_year(kind, &mut year);
        out.extend(year);
    }
    out.sort_by(|a, b| a.date.cmp(&b.date));
    out
}

fn quarterize_year(kind: StatementKind, year: &mut [StatementRecord]) {
    let additive: Vec<LineItem> = kind.items().filter(LineItem::is_additive).collect();
    // Year-to-date total through the previous record, per item.
    let mut ytd: BTreeMap<LineItem, Amount> = BTreeMap::new();
    let mut previous: Option<(u8, Amount)> = None;

    for record in year.iter_mut() {
        let Some(quarter) = record.fiscal_quarter else {
            continue;
        };
        let contiguous = previous.is_some_and(|(q, _)| q + 1 == quarter);

        for item in &additive {
            let value = record.get(*item);
            let before = if contiguous {
                ytd.get(item).copied().unwrap_or_default()
            } else {
                Amount::ABSENT
            };

            let (discrete, through) = if quarter == 1 {
                (value, value)
            } else if record.is_discrete(*item) {
                (value, before + value)
            } else {
                (value - before, value)
            };

            record.set(*item, discrete);
            ytd.insert(*item, through);
        }
        record.discrete.extend(additive.iter().copied());

        if let (true, Some((_, closing))) = (contiguous, previous)
            && closing.is_present()
        {
            record.set(LineItem::BeginningCash, closing);
        }
        previous = Some((quarter, record.get(LineItem::EndingCash)));
        record.refresh_free_cash_flow();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn q(end: NaiveDate, quarter: u8) -> StatementRecord {
        StatementRecord::new(StatementKind::Income, end, 2023, Some(quarter))
    }

    fn discrete(mut record: StatementRecord, item: LineItem, value: f64) -> StatementRecord {
        record.set(item, Amount::new(value));
        record.discrete.insert(item);
        record
    }

    #[test]
    fn test_cumulative_to_discrete() {
        let records = vec![
            q(date(2023, 3, 31), 1).with(LineItem::Revenue, 100.0),
            q(date(2023, 6, 30), 2).with(LineItem::Revenue, 210.0),
            q(date(2023, 9, 30), 3).with(LineItem::Revenue, 330.0),
        ];
        let out = quarterize(records);
        let revenue: Vec<_> = out.iter().map(|r| r.get(LineItem::Revenue)).collect();
        assert_eq!(
            revenue,
            vec![Amount::new(100.0), Amount::new(110.0), Amount::new(120.0)]
        );
        assert!(out.iter().all(|r| r.is_discrete(LineItem::Revenue)));
    }

    #[test]
    fn test_mixed_discrete_and_cumulative() {
        let records = vec![
            q(date(2023, 3, 31), 1).with(LineItem::Revenue, 100.0),
            discrete(q(date(2023, 6, 30), 2), LineItem::Revenue, 110.0),
            q(date(2023, 9, 30), 3).with(LineItem::Revenue, 330.0),
        ];
        let out = quarterize(records);
        assert_eq!(out[1].get(LineItem::Revenue), Amount::new(110.0));
        assert_eq!(out[2].get(LineItem::Revenue), Amount::new(120.0));
    }

    #[test]
    fn test_missing_previous_quarter_makes_cumulative_absent() {
        let records = vec![
            q(date(2023, 3, 31), 1).with(LineItem::Revenue, 100.0),
            q(date(2023, 9, 30), 3).with(LineItem::Revenue, 330.0),
        ];
        let out = quarterize(records);
        assert!(out[1].get(LineItem::Revenue).is_absent());
    }

    #[test]
    fn test_missing_previous_quarter_keeps_discrete() {
        let records = vec![
            q(date(2023, 3, 31), 1).with(LineItem::Revenue, 100.0),
            discrete(q(date(2023, 9, 30), 3), LineItem::Revenue, 120.0),
        ];
        let out = quarterize(records);
        assert_eq!(out[1].get(LineItem::Revenue), Amount::new(120.0));
    }

    #[test]
    fn test_null_operand_propagates() {
        let records = vec![
            q(date(2023, 3, 31), 1),
            q(date(2023, 6, 30), 2).with(LineItem::Revenue, 210.0),
        ];
        let out = quarterize(records);
        assert!(out[1].get(LineItem::Revenue).is_absent());
    }

    #[test]
    fn test_instant_items_untouched() {
        let records = vec![
            q(date(2023, 3, 31), 1).with(LineItem::WeightedSharesBasic, 1000.0),
            q(date(2023, 6, 30), 2).with(LineItem::WeightedSharesBasic, 1010.0),
        ];
        let out = quarterize(records);
        assert_eq!(out[1].get(LineItem::WeightedSharesBasic), Amount::new(1010.0));
    }

    #[test]
    fn test_opening_cash_from_previous_quarter() {
        let cash = |end, quarter| StatementRecord::new(StatementKind::CashFlow, end, 2023, Some(quarter));
        let records = vec![
            cash(date(2023, 3, 31), 1)
                .with(LineItem::OperatingCashFlow, 50.0)
                .with(LineItem::CapitalExpenditures, 10.0)
                .with(LineItem::BeginningCash, 100.0)
                .with(LineItem::EndingCash, 130.0),
            cash(date(2023, 6, 30), 2)
                .with(LineItem::OperatingCashFlow, 120.0)
                .with(LineItem::CapitalExpenditures, 25.0)
                .with(LineItem::BeginningCash, 100.0)
                .with(LineItem::EndingCash, 170.0),
        ];
        let out = quarterize(records);
        assert_eq!(out[1].get(LineItem::BeginningCash), Amount::new(130.0));
        assert_eq!(out[1].get(LineItem::EndingCash), Amount::new(170.0));
        assert_eq!(out[1].get(LineItem::OperatingCashFlow), Amount::new(70.0));
        assert_eq!(out[1].get(LineItem::FreeCashFlow), Amount::new(55.0));
    }

    #[test]
    fn test_years_are_independent() {
        let records = vec![
            StatementRecord::new(StatementKind::Income, date(2022, 12, 31), 2022, Some(4))
                .with(LineItem::Revenue, 400.0),
            q(date(2023, 3, 31), 1).with(LineItem::Revenue, 100.0),
        ];
        let out = quarterize(records);
        assert_eq!(out[1].get(LineItem::Revenue), Amount::new(100.0));
    }

    #[test]
    fn test_balance_sheet_passthrough() {
        let records = vec![
            StatementRecord::new(StatementKind::Balance, date(2023, 6, 30), 2023, Some(2))
                .with(LineItem::TotalAssets, 10.0),
        ];
        let out = quarterize(records.clone());
        assert_eq!(out, records);
    }
}
