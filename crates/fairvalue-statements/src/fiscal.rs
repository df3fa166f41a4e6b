//! Fiscal calendar arithmetic.
//!
//! Filers on 52/53-week calendars end periods on the last weekday of a month,
//! which can fall in the first days of the next month (e.g. 2023-10-01 for
//! a September year end). Dates in the first seven days of a month therefore
//! count toward the previous month.

use chrono::{Datelike, NaiveDate};
use fairvalue_data::FactEntry;
use std::collections::BTreeMap;

const SPILLOVER_DAYS: u32 = 7;

/// Fiscal-year-end month used when none can be inferred.
pub const DEFAULT_FISCAL_YEAR_END_MONTH: u32 = 12;

/// Calendar (year, month) a period-end date belongs to.
pub fn effective_month(date: NaiveDate) -> (i32, u32) {
    if date.day() <= SPILLOVER_DAYS {
        if date.month() == 1 {
            (date.year() - 1, 12)
        } else {
            (date.year(), date.month() - 1)
        }
    } else {
        (date.year(), date.month())
    }
}

/// Fiscal year of a period ending on `date`.
///
/// A fiscal year is named after the calendar year it ends in.
pub fn fiscal_year(date: NaiveDate, fye_month: u32) -> i32 {
    let (year, month) = effective_month(date);
    if month > fye_month { year + 1 } else { year }
}

/// Fiscal quarter (1-4) of a period ending on `date`.
///
/// With a December year end this is `ceil(month / 3)`.
pub fn fiscal_quarter(date: NaiveDate, fye_month: u32) -> u8 {
    let (_, month) = effective_month(date);
    let offset = (i64::from(month) - i64::from(fye_month) - 1).rem_euclid(12);
    // offset is in 0..12; the quotient is in 0..4.
    (offset / 3) as u8 + 1
}

/// SEC calendar frame for a quarter ending on `date`, e.g. `CY2023Q2`,
/// with an `I` suffix for instant facts.
pub fn calendar_frame(date: NaiveDate, instant: bool) -> String {
    let (year, month) = effective_month(date);
    let quarter = month.div_ceil(3);
    if instant {
        format!("CY{year}Q{quarter}I")
    } else {
        format!("CY{year}Q{quarter}")
    }
}

/// Returns true for a fact covering a full fiscal year.
pub fn is_annual_span(entry: &FactEntry) -> bool {
    entry
        .duration_days()
        .is_none_or(|days| (300..=400).contains(&days))
}

/// Returns true for a fact shorter than a fiscal year.
pub fn is_sub_annual_span(entry: &FactEntry) -> bool {
    entry.duration_days().is_none_or(|days| days < 300)
}

/// Returns true for a fact spanning roughly three months.
pub fn is_quarter_span(entry: &FactEntry) -> bool {
    entry
        .duration_days()
        .is_some_and(|days| (70..=110).contains(&days))
}

/// Most common period-end month of full-year annual facts.
///
/// Ties go to December, then to the later month.
pub fn infer_fiscal_year_end_month<'a>(entries: impl IntoIterator<Item = &'a FactEntry>) -> u32 {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for entry in entries {
        if entry.is_annual_form()
            && entry.fiscal_period.is_full_year()
            && entry.duration_days().is_some()
            && is_annual_span(entry)
        {
            *counts.entry(effective_month(entry.period_end).1).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .max_by_key(|(month, count)| (*count, *month == DEFAULT_FISCAL_YEAR_END_MONTH, *month))
        .map_or(DEFAULT_FISCAL_YEAR_END_MONTH, |(month, _)| month)
}
