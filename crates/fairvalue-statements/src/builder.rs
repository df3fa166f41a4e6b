//! Statement Builder: facts → one raw record per reported period.

use crate::amount::Amount;
use crate::fiscal::{
    calendar_frame, fiscal_year, is_annual_span, is_quarter_span, is_sub_annual_span,
};
use crate::line_item::{Aggregation, LineItem, StatementKind};
use crate::record::StatementRecord;
use crate::tags::ConceptTable;
use chrono::{Days, NaiveDate};
use fairvalue_data::{FactEntry, FactMap, FiscalPeriod};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Reporting cadence of a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// Annual reports (10-K family)
    Annual,
    /// Quarterly reports (10-Q family)
    Quarterly,
}

impl Cadence {
    /// Returns true if a fact was reported in a filing of this cadence over a
    /// compatible span.
    pub fn accepts(&self, entry: &FactEntry) -> bool {
        match self {
            Self::Annual => entry.is_annual_form() && is_annual_span(entry),
            Self::Quarterly => entry.is_quarterly_form() && is_sub_annual_span(entry),
        }
    }

    /// Returns true if a fiscal period label belongs to this cadence.
    pub const fn accepts_period(&self, period: FiscalPeriod) -> bool {
        match self {
            Self::Annual => period.is_full_year(),
            Self::Quarterly => !period.is_full_year(),
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        })
    }
}

/// A fact chosen for one line item of one period.
#[derive(Debug, Clone, Copy)]
struct Resolved<'a> {
    entry: &'a FactEntry,
    discrete: bool,
}

/// Builds raw statement records from a fact map.
#[derive(Debug, Clone, Copy)]
pub struct StatementBuilder<'a> {
    facts: &'a FactMap,
    table: &'a ConceptTable,
    fye_month: u32,
}

impl<'a> StatementBuilder<'a> {
    /// Create a builder.
    pub const fn new(facts: &'a FactMap, table: &'a ConceptTable, fye_month: u32) -> Self {
        Self {
            facts,
            table,
            fye_month,
        }
    }

    /// One record per distinct (period end, fiscal period label) among the
    /// anchor concepts' facts, oldest first.
    ///
    /// Records are not yet reconciled: duplicates and mislabeled quarters remain.
    pub fn build(&self, kind: StatementKind, cadence: Cadence) -> Vec<StatementRecord> {
        let mut periods: BTreeSet<(NaiveDate, FiscalPeriod)> = BTreeSet::new();
        for concept in self.table.anchor_concepts(kind) {
            for entry in self.facts.entries(concept) {
                if cadence.accepts(entry) && cadence.accepts_period(entry.fiscal_period) {
                    periods.insert((entry.period_end, entry.fiscal_period));
                }
            }
        }

        let records: Vec<StatementRecord> = periods
            .into_iter()
            .map(|(end, period)| self.build_record(kind, cadence, end, period))
            .collect();

        debug!(%kind, %cadence, records = records.len(), "built raw statement records");
        records
    }

    fn build_record(
        &self,
        kind: StatementKind,
        cadence: Cadence,
        end: NaiveDate,
        period: FiscalPeriod,
    ) -> StatementRecord {
        let quarter = match cadence {
            Cadence::Annual => None,
            Cadence::Quarterly => period.quarter(),
        };
        let mut record = StatementRecord::new(kind, end, fiscal_year(end, self.fye_month), quarter);

        for item in kind.items() {
            if item.is_derived() || item.aggregation() == Aggregation::Opening {
                continue;
            }
            if let Some(resolved) = self.resolve(item, end, cadence) {
                record.set(item, Amount::new(resolved.entry.value));
                if resolved.discrete {
                    record.discrete.insert(item);
                }
                if record.period_start.is_none()
                    && ConceptTable::anchor_items(kind).contains(&item)
                {
                    record.period_start = resolved.entry.period_start;
                }
            }
        }

        if let Some(start) = record.period_start {
            for item in kind
                .items()
                .filter(|item| item.aggregation() == Aggregation::Opening)
            {
                if let Some(entry) = self.resolve_opening(item, start) {
                    record.set(item, Amount::new(entry.value));
                }
            }
        }

        record.refresh_free_cash_flow();
        record
    }

    /// First concept in the chain with a fact for this period end.
    fn resolve(&self, item: LineItem, end: NaiveDate, cadence: Cadence) -> Option<Resolved<'a>> {
        let point_in_time = item.is_point_in_time();

        for concept in self.table.concepts(item) {
            let candidates: Vec<&'a FactEntry> = self
                .facts
                .entries(concept)
                .iter()
                .filter(|e| {
                    e.period_end == end && e.is_instant() == point_in_time && cadence.accepts(e)
                })
                .collect();
            if candidates.is_empty() {
                continue;
            }

            if cadence == Cadence::Annual || point_in_time {
                return latest_filed(&candidates).map(|entry| Resolved {
                    entry,
                    discrete: false,
                });
            }

            let frame = calendar_frame(end, false);
            let framed: Vec<&'a FactEntry> = candidates
                .iter()
                .copied()
                .filter(|e| e.frame.as_deref() == Some(frame.as_str()))
                .collect();
            if let Some(entry) = latest_filed(&framed) {
                return Some(Resolved {
                    entry,
                    discrete: true,
                });
            }

            let quarter_span: Vec<&'a FactEntry> = candidates
                .iter()
                .copied()
                .filter(|e| is_quarter_span(e))
                .collect();
            if let Some(entry) = latest_filed(&quarter_span) {
                return Some(Resolved {
                    entry,
                    discrete: true,
                });
            }

            // Only year-to-date figures: keep the longest span as the cumulative value.
            let longest = candidates.iter().filter_map(|e| e.duration_days()).max();
            let cumulative: Vec<&'a FactEntry> = candidates
                .iter()
                .copied()
                .filter(|e| e.duration_days() == longest)
                .collect();
            return latest_filed(&cumulative).map(|entry| Resolved {
                entry,
                discrete: false,
            });
        }

        None
    }

    /// Instant fact closest to (and not after) the period start.
    fn resolve_opening(&self, item: LineItem, start: NaiveDate) -> Option<&'a FactEntry> {
        let earliest = start.checked_sub_days(Days::new(7))?;

        for concept in self.table.concepts(item) {
            let candidates: Vec<&'a FactEntry> = self
                .facts
                .entries(concept)
                .iter()
                .filter(|e| {
                    e.is_instant()
                        && (e.is_annual_form() || e.is_quarterly_form())
                        && e.period_end >= earliest
                        && e.period_end <= start
                })
                .collect();

            let Some(latest_end) = candidates.iter().map(|e| e.period_end).max() else {
                continue;
            };
            let closest: Vec<&'a FactEntry> = candidates
                .into_iter()
                .filter(|e| e.period_end == latest_end)
                .collect();
            return latest_filed(&closest);
        }

        None
    }
}

/// Most recently filed fact; ties go to the last one listed.
fn latest_filed<'a>(candidates: &[&'a FactEntry]) -> Option<&'a FactEntry> {
    candidates.iter().copied().max_by(|a, b| a.filed.cmp(&b.filed))
}
