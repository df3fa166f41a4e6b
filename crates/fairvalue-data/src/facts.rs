//! Reported XBRL facts keyed by concept name.
//!
//! The SEC publishes every fact a company has tagged in its filings through the
//! company-facts API (`https://data.sec.gov/api/xbrl/companyfacts/CIK##########.json`).
//! [`FactMap::from_company_facts_json`] flattens that document into
//! concept name → list of [`FactEntry`] values, which is the only shape the
//! statement engines read.
//!
//! # Example
//!
//! ```
//! use fairvalue_data::FactMap;
//!
//! let json = r#"{
//!     "cik": 1,
//!     "entityName": "Example Corp",
//!     "facts": {
//!         "us-gaap": {
//!             "Assets": {
//!                 "label": "Assets",
//!                 "units": {
//!                     "USD": [
//!                         {"end": "2023-12-31", "val": 1000.0, "fy": 2023, "fp": "FY", "form": "10-K", "frame": "CY2023Q4I"}
//!                     ]
//!                 }
//!             }
//!         }
//!     }
//! }"#;
//!
//! let facts = FactMap::from_company_facts_json(json).unwrap();
//! assert_eq!(facts.entries("Assets").len(), 1);
//! ```

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::debug;

/// Taxonomies in precedence order when two define the same concept name.
const TAXONOMY_PRECEDENCE: [&str; 4] = ["us-gaap", "ifrs-full", "srt", "dei"];

/// Units in preference order when a concept reports several.
const UNIT_PREFERENCE: [&str; 4] = ["USD", "USD/shares", "shares", "pure"];

/// Fiscal period label attached to a fact by the filer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FiscalPeriod {
    /// Full fiscal year
    #[serde(rename = "FY")]
    FullYear,
    /// First fiscal quarter
    Q1,
    /// Second fiscal quarter
    Q2,
    /// Third fiscal quarter
    Q3,
    /// Fourth fiscal quarter
    Q4,
}

impl FiscalPeriod {
    /// Parse a filer label (`FY`, `Q1`..`Q4`). Other labels (`H1`, `CY`, ...) yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "FY" => Some(Self::FullYear),
            "Q1" => Some(Self::Q1),
            "Q2" => Some(Self::Q2),
            "Q3" => Some(Self::Q3),
            "Q4" => Some(Self::Q4),
            _ => None,
        }
    }

    /// Quarter number (1-4), or `None` for the full year.
    pub const fn quarter(&self) -> Option<u8> {
        match self {
            Self::FullYear => None,
            Self::Q1 => Some(1),
            Self::Q2 => Some(2),
            Self::Q3 => Some(3),
            Self::Q4 => Some(4),
        }
    }

    /// Returns true for the `FY` label.
    pub const fn is_full_year(&self) -> bool {
        matches!(self, Self::FullYear)
    }
}

impl fmt::Display for FiscalPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quarter() {
            Some(q) => write!(f, "Q{q}"),
            None => f.write_str("FY"),
        }
    }
}

/// A single reported value for one concept over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactEntry {
    /// Start of the reporting period (None for instant facts like balance sheet items)
    pub period_start: Option<NaiveDate>,
    /// End of the reporting period
    pub period_end: NaiveDate,
    /// Reported value
    pub value: f64,
    /// Fiscal year of the filing that reported the value
    pub fiscal_year: i32,
    /// Fiscal period label of the filing
    pub fiscal_period: FiscalPeriod,
    /// Form type (e.g., "10-K", "10-Q")
    pub form: String,
    /// Calendar frame assigned by the SEC (e.g., "CY2023Q2", "CY2023Q4I")
    #[serde(default)]
    pub frame: Option<String>,
    /// Date the filing was accepted
    #[serde(default)]
    pub filed: Option<NaiveDate>,
    /// Unit of measure (e.g., "USD", "USD/shares")
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "USD".to_string()
}

impl FactEntry {
    /// Create a duration fact with no frame, filing date or explicit unit.
    pub fn duration(
        start: NaiveDate,
        end: NaiveDate,
        value: f64,
        fiscal_year: i32,
        fiscal_period: FiscalPeriod,
        form: &str,
    ) -> Self {
        Self {
            period_start: Some(start),
            period_end: end,
            value,
            fiscal_year,
            fiscal_period,
            form: form.to_string(),
            frame: None,
            filed: None,
            unit: default_unit(),
        }
    }

    /// Create an instant (point-in-time) fact.
    pub fn instant(
        end: NaiveDate,
        value: f64,
        fiscal_year: i32,
        fiscal_period: FiscalPeriod,
        form: &str,
    ) -> Self {
        Self {
            period_start: None,
            period_end: end,
            value,
            fiscal_year,
            fiscal_period,
            form: form.to_string(),
            frame: None,
            filed: None,
            unit: default_unit(),
        }
    }

    /// Attach a frame identifier.
    pub fn with_frame(mut self, frame: &str) -> Self {
        self.frame = Some(frame.to_string());
        self
    }

    /// Attach a filing date.
    pub fn with_filed(mut self, filed: NaiveDate) -> Self {
        self.filed = Some(filed);
        self
    }

    /// Returns true if this is an instant fact (point-in-time, like balance sheet items)
    pub const fn is_instant(&self) -> bool {
        self.period_start.is_none()
    }

    /// Returns the duration in days if this is a duration fact
    pub fn duration_days(&self) -> Option<i64> {
        self.period_start
            .map(|start| self.period_end.signed_duration_since(start).num_days())
    }

    /// Returns true if the fact comes from an annual report (10-K family, 20-F, 40-F).
    pub fn is_annual_form(&self) -> bool {
        matches!(
            self.form.trim_end_matches("/A"),
            "10-K" | "10-KT" | "10-K405" | "20-F" | "40-F"
        )
    }

    /// Returns true if the fact comes from a quarterly report (10-Q family).
    pub fn is_quarterly_form(&self) -> bool {
        matches!(self.form.trim_end_matches("/A"), "10-Q" | "10-QT")
    }
}

/// All reported facts of one company, keyed by concept name without taxonomy prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactMap {
    /// Company name, when the source document carries one
    pub entity_name: Option<String>,
    facts: BTreeMap<String, Vec<FactEntry>>,
}

impl FactMap {
    /// Creates an empty fact map
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fact to a concept's list.
    pub fn insert(&mut self, concept: &str, entry: FactEntry) {
        self.facts.entry(concept.to_string()).or_default().push(entry);
    }

    /// Builder-style variant of [`FactMap::insert`].
    pub fn with(mut self, concept: &str, entry: FactEntry) -> Self {
        self.insert(concept, entry);
        self
    }

    /// All facts for a concept (empty when the concept was never reported).
    pub fn entries(&self, concept: &str) -> &[FactEntry] {
        self.facts.get(concept).map_or(&[], Vec::as_slice)
    }

    /// Returns true if at least one fact exists for the concept.
    pub fn contains(&self, concept: &str) -> bool {
        !self.entries(concept).is_empty()
    }

    /// Concept names in sorted order.
    pub fn concepts(&self) -> impl Iterator<Item = &str> {
        self.facts.keys().map(String::as_str)
    }

    /// Number of concepts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if no facts were loaded.
    pub fn is_empty(&self) -> bool {
        self.facts.values().all(Vec::is_empty)
    }

    /// Total number of facts across all concepts.
    pub fn fact_count(&self) -> usize {
        self.facts.values().map(Vec::len).sum()
    }

    /// Parses the SEC company-facts JSON document.
    ///
    /// Entries without a fiscal year, a recognised fiscal period label or a form
    /// type are skipped, as are entries with unparseable dates.
    pub fn from_company_facts_json(json: &str) -> Result<Self> {
        let response: CompanyFactsResponse = serde_json::from_str(json)
            .map_err(|e| DataError::Parse(format!("Failed to parse company facts JSON: {e}")))?;

        let mut map = Self {
            entity_name: response.entity_name,
            facts: BTreeMap::new(),
        };
        let mut skipped = 0_usize;

        let mut taxonomies: Vec<(&String, &HashMap<String, ConceptData>)> =
            response.facts.iter().collect();
        taxonomies.sort_by_key(|(name, _)| {
            let rank = TAXONOMY_PRECEDENCE
                .iter()
                .position(|t| t == name)
                .unwrap_or(TAXONOMY_PRECEDENCE.len());
            (rank, (*name).clone())
        });

        for (taxonomy, concepts) in taxonomies {
            for (concept, data) in concepts {
                if map.facts.contains_key(concept) {
                    debug!(%taxonomy, %concept, "concept already defined by a preferred taxonomy");
                    continue;
                }
                let Some((unit, values)) = select_unit(&data.units) else {
                    continue;
                };

                let mut entries = Vec::with_capacity(values.len());
                for raw in values {
                    match raw.to_entry(unit) {
                        Some(entry) => entries.push(entry),
                        None => skipped += 1,
                    }
                }
                if !entries.is_empty() {
                    map.facts.insert(concept.clone(), entries);
                }
            }
        }

        debug!(
            entity = map.entity_name.as_deref().unwrap_or("unknown"),
            concepts = map.len(),
            facts = map.fact_count(),
            skipped,
            "parsed company facts"
        );

        Ok(map)
    }
}

fn select_unit(units: &HashMap<String, Vec<RawFact>>) -> Option<(&str, &[RawFact])> {
    UNIT_PREFERENCE
        .iter()
        .find_map(|unit| units.get_key_value(*unit))
        .or_else(|| units.iter().min_by(|a, b| a.0.cmp(b.0)))
        .map(|(unit, values)| (unit.as_str(), values.as_slice()))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

// SEC company-facts JSON structure
// Based on: https://www.sec.gov/edgar/sec-api-documentation

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompanyFactsResponse {
    #[serde(default)]
    entity_name: Option<String>,
    #[serde(default)]
    facts: HashMap<String, HashMap<String, ConceptData>>,
}

#[derive(Debug, Deserialize)]
struct ConceptData {
    #[serde(default)]
    units: HashMap<String, Vec<RawFact>>,
}

#[derive(Debug, Deserialize)]
struct RawFact {
    end: String,
    val: f64,
    #[serde(default)]
    start: Option<String>,
    #[serde(default)]
    fy: Option<i32>,
    #[serde(default)]
    fp: Option<String>,
    #[serde(default)]
    form: Option<String>,
    #[serde(default)]
    filed: Option<String>,
    #[serde(default)]
    frame: Option<String>,
}

impl RawFact {
    fn to_entry(&self, unit: &str) -> Option<FactEntry> {
        let period_end = parse_date(&self.end)?;
        let period_start = match &self.start {
            Some(start) => Some(parse_date(start)?),
            None => None,
        };

        Some(FactEntry {
            period_start,
            period_end,
            value: self.val,
            fiscal_year: self.fy?,
            fiscal_period: FiscalPeriod::parse(self.fp.as_deref()?)?,
            form: self.form.clone()?,
            frame: self.frame.clone(),
            filed: self.filed.as_deref().and_then(parse_date),
            unit: unit.to_string(),
        })
    }
}
