//! Period Reconciler: mislabeled-quarter filter and same-period deduplication.

use crate::fiscal::fiscal_quarter;
use crate::record::StatementRecord;
use std::collections::BTreeMap;
use tracing::debug;

/// Drop quarterly records whose fiscal quarter label disagrees with the
/// quarter implied by their period-end date. Annual records pass through.
pub fn filter_mislabeled(records: Vec<StatementRecord>, fye_month: u32) -> Vec<StatementRecord> {
    records
        .into_iter()
        .filter(|record| match record.fiscal_quarter {
            Some(label) => {
                let expected = fiscal_quarter(record.date, fye_month);
                if label == expected {
                    true
                } else {
                    debug!(
                        kind = %record.kind,
                        date = %record.date,
                        label,
                        expected,
                        "dropping mislabeled quarterly record"
                    );
                    false
                }
            }
            None => true,
        })
        .collect()
}

/// Keep one record per `(fiscal_year, fiscal_quarter)`: the one with the most
/// populated items (ties: later date, then larger values).
///
/// Output is ordered by date, oldest first.
pub fn deduplicate(records: Vec<StatementRecord>) -> Vec<StatementRecord> {
    let mut best: BTreeMap<(i32, Option<u8>), StatementRecord> = BTreeMap::new();

    for record in records {
        let key = (record.fiscal_year, record.fiscal_quarter);
        match best.get_mut(&key) {
            Some(current) => {
                if record.completeness_cmp(current).is_gt() {
                    debug!(
                        kind = %record.kind,
                        fiscal_year = record.fiscal_year,
                        fiscal_quarter = ?record.fiscal_quarter,
                        kept = %record.date,
                        dropped = %current.date,
                        "replacing duplicate period"
                    );
                    *current = record;
                }
            }
            None => {
                best.insert(key, record);
            }
        }
    }

    let mut out: Vec<StatementRecord> = best.into_values().collect();
    out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.fiscal_quarter.cmp(&b.fiscal_quarter)));
    out
}

/// Filter mislabeled quarters, then deduplicate.
pub fn reconcile(records: Vec<StatementRecord>, fye_month: u32) -> Vec<StatementRecord> {
    deduplicate(filter_mislabeled(records, fye_month))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use crate::line_item::{LineItem, StatementKind};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn quarter(end: NaiveDate, q: u8) -> StatementRecord {
        StatementRecord::new(StatementKind::Income, end, 2023, Some(q))
    }

    #[test]
    fn test_mislabeled_quarter_dropped() {
        let records = vec![
            quarter(date(2023, 3, 31), 1).with(LineItem::Revenue, 1.0),
            quarter(date(2023, 6, 30), 3).with(LineItem::Revenue, 2.0),
        ];
        let kept = filter_mislabeled(records, 12);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].fiscal_quarter, Some(1));
    }

    #[test]
    fn test_non_december_year_end() {
        // September year end: December is Q1.
        let records = vec![
            quarter(date(2022, 12, 31), 1),
            quarter(date(2022, 12, 31), 4),
        ];
        let kept = filter_mislabeled(records, 9);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].fiscal_quarter, Some(1));
    }

    #[test]
    fn test_dedupe_keeps_most_complete() {
        let sparse = quarter(date(2023, 3, 31), 1).with(LineItem::Revenue, 100.0);
        let full = quarter(date(2023, 3, 31), 1)
            .with(LineItem::Revenue, 100.0)
            .with(LineItem::NetIncome, 10.0);

        let out = deduplicate(vec![sparse.clone(), full.clone()]);
        assert_eq!(out, vec![full.clone()]);
        let out = deduplicate(vec![full.clone(), sparse]);
        assert_eq!(out, vec![full]);
    }

    #[test]
    fn test_dedupe_is_order_independent_on_ties() {
        let a = quarter(date(2023, 3, 31), 1).with(LineItem::Revenue, 100.0);
        let b = quarter(date(2023, 3, 31), 1).with(LineItem::Revenue, 101.0);

        let forward = deduplicate(vec![a.clone(), b.clone()]);
        let backward = deduplicate(vec![b.clone(), a]);
        assert_eq!(forward, backward);
        assert_eq!(forward[0].get(LineItem::Revenue), Amount::new(101.0));
    }

    #[test]
    fn test_annual_records_keyed_by_fiscal_year() {
        let fy22 = StatementRecord::new(StatementKind::Income, date(2022, 12, 31), 2022, None)
            .with(LineItem::Revenue, 1.0);
        let fy23 = StatementRecord::new(StatementKind::Income, date(2023, 12, 31), 2023, None)
            .with(LineItem::Revenue, 2.0);
        let out = reconcile(vec![fy23, fy22], 12);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].fiscal_year, 2022);
    }

    #[test]
    fn test_reconcile_idempotent() {
        let records = vec![
            quarter(date(2023, 3, 31), 1).with(LineItem::Revenue, 100.0),
            quarter(date(2023, 3, 31), 1),
            quarter(date(2023, 6, 30), 2).with(LineItem::Revenue, 200.0),
            quarter(date(2022, 12, 31), 2),
        ];
        let once = reconcile(records, 12);
        let twice = reconcile(once.clone(), 12);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }
}
