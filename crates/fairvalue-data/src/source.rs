//! Collaborators that supply facts and quotes.
//!
//! The engines never fetch anything themselves. Callers hand them a
//! [`FactSource`] and a [`QuoteSource`]; this module ships file-backed and
//! in-memory implementations.

use crate::error::{DataError, Result};
use crate::facts::FactMap;
use crate::quote::Quote;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supplies the reported facts for a company.
#[async_trait]
pub trait FactSource: Send + Sync {
    /// Load every reported fact for `symbol`.
    async fn company_facts(&self, symbol: &str) -> Result<FactMap>;
}

/// Supplies current market data for a security.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Load the current quote for `symbol`.
    async fn quote(&self, symbol: &str) -> Result<Quote>;
}

/// Validate and upper-case a ticker symbol.
///
/// Accepts ASCII letters, digits, `.` and `-` (e.g. `BRK.B`, `RDS-A`).
pub fn normalize_symbol(symbol: &str) -> Result<String> {
    let trimmed = symbol.trim();
    if trimmed.is_empty()
        || !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(DataError::InvalidSymbol(symbol.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Reads `{dir}/{SYMBOL}.json` company-facts documents.
#[derive(Debug, Clone)]
pub struct JsonFileFactSource {
    dir: PathBuf,
}

impl JsonFileFactSource {
    /// Create a source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the source reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{symbol}.json"))
    }
}

#[async_trait]
impl FactSource for JsonFileFactSource {
    async fn company_facts(&self, symbol: &str) -> Result<FactMap> {
        let symbol = normalize_symbol(symbol)?;
        let path = self.path_for(&symbol);
        debug!(%symbol, path = %path.display(), "reading company facts");

        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DataError::MissingData {
                    symbol,
                    reason: format!("no facts file at {}", path.display()),
                });
            }
            Err(e) => return Err(e.into()),
        };

        FactMap::from_company_facts_json(&json)
    }
}

/// Reads quotes from one JSON object mapping symbol to [`Quote`].
#[derive(Debug, Clone)]
pub struct JsonFileQuoteSource {
    path: PathBuf,
}

impl JsonFileQuoteSource {
    /// Create a source for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuoteSource for JsonFileQuoteSource {
    async fn quote(&self, symbol: &str) -> Result<Quote> {
        let symbol = normalize_symbol(symbol)?;
        let json = tokio::fs::read_to_string(&self.path).await?;
        let quotes: HashMap<String, Quote> = serde_json::from_str(&json)?;

        quotes
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(&symbol))
            .map(|(_, quote)| quote)
            .ok_or_else(|| DataError::MissingData {
                symbol,
                reason: format!("not listed in {}", self.path.display()),
            })
    }
}

/// In-memory fact source.
#[derive(Debug, Clone, Default)]
pub struct StaticFactSource {
    facts: HashMap<String, FactMap>,
}

impl StaticFactSource {
    /// Creates an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register facts for a symbol.
    pub fn with(mut self, symbol: &str, facts: FactMap) -> Self {
        self.facts.insert(symbol.to_ascii_uppercase(), facts);
        self
    }
}

#[async_trait]
impl FactSource for StaticFactSource {
    async fn company_facts(&self, symbol: &str) -> Result<FactMap> {
        let symbol = normalize_symbol(symbol)?;
        self.facts
            .get(&symbol)
            .cloned()
            .ok_or_else(|| DataError::MissingData {
                symbol,
                reason: "no facts registered".to_string(),
            })
    }
}

/// In-memory quote source.
#[derive(Debug, Clone, Default)]
pub struct StaticQuoteSource {
    quotes: HashMap<String, Quote>,
}

impl StaticQuoteSource {
    /// Creates an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a quote under its own symbol.
    pub fn with(mut self, quote: Quote) -> Self {
        self.quotes.insert(quote.symbol.to_ascii_uppercase(), quote);
        self
    }
}

#[async_trait]
impl QuoteSource for StaticQuoteSource {
    async fn quote(&self, symbol: &str) -> Result<Quote> {
        let symbol = normalize_symbol(symbol)?;
        self.quotes
            .get(&symbol)
            .cloned()
            .ok_or_else(|| DataError::MissingData {
                symbol,
                reason: "no quote registered".to_string(),
            })
    }
}
