//! Reconstructed statement records and their containers.

use crate::amount::Amount;
use crate::line_item::{LineItem, StatementKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Where a record's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    /// Built directly from reported facts
    Reported,
    /// Fourth quarter derived from the annual record
    DerivedQ4,
    /// Sum of the four most recent quarters
    TrailingTwelveMonths,
}

/// One statement for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRecord {
    /// Statement type
    pub kind: StatementKind,
    /// Period end date
    pub date: NaiveDate,
    /// Period start date (None for balance sheets)
    pub period_start: Option<NaiveDate>,
    /// Fiscal year the period belongs to
    pub fiscal_year: i32,
    /// Fiscal quarter (None for annual and TTM records)
    pub fiscal_quarter: Option<u8>,
    /// Provenance
    pub origin: RecordOrigin,
    /// Line item values; every item of `kind` is present as a key
    pub values: BTreeMap<LineItem, Amount>,
    /// Items whose value already covers only this quarter
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub discrete: BTreeSet<LineItem>,
}

impl StatementRecord {
    /// Create a reported record with every line item absent.
    pub fn new(
        kind: StatementKind,
        date: NaiveDate,
        fiscal_year: i32,
        fiscal_quarter: Option<u8>,
    ) -> Self {
        Self {
            kind,
            date,
            period_start: None,
            fiscal_year,
            fiscal_quarter,
            origin: RecordOrigin::Reported,
            values: kind.items().map(|item| (item, Amount::ABSENT)).collect(),
            discrete: BTreeSet::new(),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, item: LineItem, value: impl Into<Amount>) -> Self {
        self.set(item, value.into());
        self
    }

    /// Set the period start.
    pub fn with_period_start(mut self, start: NaiveDate) -> Self {
        self.period_start = Some(start);
        self
    }

    /// Value of a line item (absent when it does not belong to this statement).
    pub fn get(&self, item: LineItem) -> Amount {
        self.values.get(&item).copied().unwrap_or_default()
    }

    /// Set a line item. Items of another statement kind are ignored.
    pub fn set(&mut self, item: LineItem, value: Amount) {
        if item.kind() == self.kind {
            self.values.insert(item, value);
        }
    }

    /// Returns true for annual records.
    pub const fn is_annual(&self) -> bool {
        self.fiscal_quarter.is_none() && !matches!(self.origin, RecordOrigin::TrailingTwelveMonths)
    }

    /// Returns true for quarterly records.
    pub const fn is_quarterly(&self) -> bool {
        self.fiscal_quarter.is_some()
    }

    /// Number of present line items.
    pub fn populated_count(&self) -> usize {
        self.values.values().filter(|v| v.is_present()).count()
    }

    /// Returns true if `item` holds a single-quarter figure.
    pub fn is_discrete(&self, item: LineItem) -> bool {
        self.discrete.contains(&item)
    }

    /// Recompute free cash flow from operating cash flow and capital expenditures.
    pub fn refresh_free_cash_flow(&mut self) {
        if self.kind == StatementKind::CashFlow {
            let fcf = self.get(LineItem::OperatingCashFlow) - self.get(LineItem::CapitalExpenditures);
            self.set(LineItem::FreeCashFlow, fcf);
        }
    }

    /// Recompute derived items: free cash flow always, gross profit only when absent.
    pub fn refresh_derived(&mut self) {
        self.refresh_free_cash_flow();
        if self.kind == StatementKind::Income && self.get(LineItem::GrossProfit).is_absent() {
            let gp = self.get(LineItem::Revenue) - self.get(LineItem::CostOfRevenue);
            self.set(LineItem::GrossProfit, gp);
        }
    }

    /// Period label, e.g. `FY2023`, `Q2 2023` or `TTM 2024-03-31`.
    pub fn period_label(&self) -> String {
        match (self.origin, self.fiscal_quarter) {
            (RecordOrigin::TrailingTwelveMonths, _) => format!("TTM {}", self.date),
            (_, Some(q)) => format!("Q{q} {}", self.fiscal_year),
            (_, None) => format!("FY{}", self.fiscal_year),
        }
    }

    /// Total order used to pick between two records for the same period:
    /// more populated items wins, then the later date, then the larger values.
    pub(crate) fn completeness_cmp(&self, other: &Self) -> Ordering {
        self.populated_count()
            .cmp(&other.populated_count())
            .then_with(|| self.date.cmp(&other.date))
            .then_with(|| {
                LineItem::ALL
                    .iter()
                    .map(|item| cmp_amount(self.get(*item), other.get(*item)))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| self.period_start.cmp(&other.period_start))
            .then_with(|| self.discrete.cmp(&other.discrete))
    }
}

fn cmp_amount(a: Amount, b: Amount) -> Ordering {
    match (a.value(), b.value()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// A data-quality problem found during reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityWarning {
    /// Statement type
    pub kind: StatementKind,
    /// Fiscal year of the affected record
    pub fiscal_year: i32,
    /// Fiscal quarter of the affected record
    pub fiscal_quarter: Option<u8>,
    /// Affected line item, when the problem is item-specific
    pub item: Option<LineItem>,
    /// Offending value
    pub value: Option<f64>,
    /// Description
    pub message: String,
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} FY{}", self.kind, self.fiscal_year)?;
        if let Some(q) = self.fiscal_quarter {
            write!(f, " Q{q}")?;
        }
        if let Some(item) = self.item {
            write!(f, " {item}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Annual, quarterly and TTM records for one statement type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementSet {
    /// Statement type
    pub kind: StatementKind,
    /// Annual records, newest first
    pub annual: Vec<StatementRecord>,
    /// Quarterly records (discrete), newest first
    pub quarterly: Vec<StatementRecord>,
    /// Trailing twelve months (flow statements only)
    pub ttm: Option<StatementRecord>,
    /// Data-quality warnings found while building this set
    pub warnings: Vec<DataQualityWarning>,
}

impl StatementSet {
    /// An empty set.
    pub const fn empty(kind: StatementKind) -> Self {
        Self {
            kind,
            annual: Vec::new(),
            quarterly: Vec::new(),
            ttm: None,
            warnings: Vec::new(),
        }
    }

    /// Most recent annual record.
    pub fn latest_annual(&self) -> Option<&StatementRecord> {
        self.annual.first()
    }

    /// Most recent quarterly record.
    pub fn latest_quarterly(&self) -> Option<&StatementRecord> {
        self.quarterly.first()
    }

    /// TTM value of `item`, else its value in the latest annual record.
    ///
    /// Resolved per item: a TTM sum is absent when any quarter lacks the item.
    pub fn trailing_value(&self, item: LineItem) -> Amount {
        let ttm = self.ttm.as_ref().map_or(Amount::ABSENT, |record| record.get(item));
        ttm.or(self.latest_annual().map_or(Amount::ABSENT, |record| record.get(item)))
    }

    /// Returns true if no records were reconstructed.
    pub fn is_empty(&self) -> bool {
        self.annual.is_empty() && self.quarterly.is_empty() && self.ttm.is_none()
    }
}

/// The three reconstructed statements for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatements {
    /// Fiscal-year-end month used for the reconstruction
    pub fiscal_year_end_month: u32,
    /// Income statement
    pub income: StatementSet,
    /// Balance sheet
    pub balance: StatementSet,
    /// Cash-flow statement
    pub cash_flow: StatementSet,
}

impl FinancialStatements {
    /// Statements with no records.
    pub const fn empty(fiscal_year_end_month: u32) -> Self {
        Self {
            fiscal_year_end_month,
            income: StatementSet::empty(StatementKind::Income),
            balance: StatementSet::empty(StatementKind::Balance),
            cash_flow: StatementSet::empty(StatementKind::CashFlow),
        }
    }

    /// Set for a statement kind.
    pub const fn get(&self, kind: StatementKind) -> &StatementSet {
        match kind {
            StatementKind::Income => &self.income,
            StatementKind::Balance => &self.balance,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }

    /// All warnings across the three statements.
    pub fn warnings(&self) -> impl Iterator<Item = &DataQualityWarning> {
        self.income
            .warnings
            .iter()
            .chain(&self.balance.warnings)
            .chain(&self.cash_flow.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_record_has_all_items_absent() {
        let record = StatementRecord::new(StatementKind::Balance, date(2023, 12, 31), 2023, None);
        assert_eq!(record.values.len(), 17);
        assert_eq!(record.populated_count(), 0);
        assert!(record.is_annual());
    }

    #[test]
    fn test_set_ignores_foreign_items() {
        let record = StatementRecord::new(StatementKind::Income, date(2023, 12, 31), 2023, None)
            .with(LineItem::TotalAssets, 5.0);
        assert!(record.get(LineItem::TotalAssets).is_absent());
        assert!(!record.values.contains_key(&LineItem::TotalAssets));
    }

    #[test]
    fn test_refresh_derived() {
        let mut cash = StatementRecord::new(StatementKind::CashFlow, date(2023, 12, 31), 2023, None)
            .with(LineItem::OperatingCashFlow, 100.0)
            .with(LineItem::CapitalExpenditures, 30.0);
        cash.refresh_derived();
        assert_eq!(cash.get(LineItem::FreeCashFlow), Amount::new(70.0));

        let mut income = StatementRecord::new(StatementKind::Income, date(2023, 12, 31), 2023, None)
            .with(LineItem::Revenue, 100.0)
            .with(LineItem::CostOfRevenue, 60.0);
        income.refresh_derived();
        assert_eq!(income.get(LineItem::GrossProfit), Amount::new(40.0));

        let mut reported = income.clone().with(LineItem::GrossProfit, 45.0);
        reported.refresh_derived();
        assert_eq!(reported.get(LineItem::GrossProfit), Amount::new(45.0));
    }

    #[test]
    fn test_free_cash_flow_absent_without_capex() {
        let mut cash = StatementRecord::new(StatementKind::CashFlow, date(2023, 12, 31), 2023, None)
            .with(LineItem::OperatingCashFlow, 100.0);
        cash.refresh_derived();
        assert!(cash.get(LineItem::FreeCashFlow).is_absent());
    }

    #[test]
    fn test_completeness_order() {
        let sparse = StatementRecord::new(StatementKind::Income, date(2023, 3, 31), 2023, Some(1))
            .with(LineItem::Revenue, 10.0);
        let fuller = sparse.clone().with(LineItem::NetIncome, 1.0);
        assert_eq!(fuller.completeness_cmp(&sparse), Ordering::Greater);
        assert_eq!(sparse.completeness_cmp(&sparse.clone()), Ordering::Equal);
    }

    #[test]
    fn test_trailing_value_per_item() {
        let mut set = StatementSet::empty(StatementKind::Income);
        assert!(set.trailing_value(LineItem::Revenue).is_absent());

        set.annual.push(
            StatementRecord::new(StatementKind::Income, date(2023, 12, 31), 2023, None)
                .with(LineItem::Revenue, 400.0)
                .with(LineItem::NetIncome, 40.0),
        );
        set.ttm = Some(
            StatementRecord::new(StatementKind::Income, date(2024, 6, 30), 2024, None)
                .with(LineItem::Revenue, 450.0),
        );
        assert_eq!(set.trailing_value(LineItem::Revenue), Amount::new(450.0));
        assert_eq!(set.trailing_value(LineItem::NetIncome), Amount::new(40.0));
    }

    #[test]
    fn test_period_label() {
        let q = StatementRecord::new(StatementKind::Income, date(2023, 6, 30), 2023, Some(2));
        assert_eq!(q.period_label(), "Q2 2023");
        let fy = StatementRecord::new(StatementKind::Income, date(2023, 12, 31), 2023, None);
        assert_eq!(fy.period_label(), "FY2023");
    }
}
