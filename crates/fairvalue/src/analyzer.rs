//! End-to-end analysis of one or more symbols.
//!
//! The [`Analyzer`] asks its collaborators for facts and a quote exactly once
//! per symbol, reconstructs the statements and values the company. A
//! collaborator failure is logged and replaced by a neutral default so that
//! the remaining stages still run.

use crate::error::Result;
use fairvalue_data::{FactMap, FactSource, Quote, QuoteSource, normalize_symbol};
use fairvalue_statements::{ConceptTable, FinancialStatements, ReconstructionConfig, reconstruct};
use fairvalue_valuation::{
    ComprehensiveValuation, ManualOverrides, ValuationCategory, ValuationConfig, ValuationEngine,
};
use futures::future::{join, join_all};
use serde::Serialize;
use tracing::{info, warn};

/// Everything produced for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Normalized symbol
    pub symbol: String,
    /// Quote the valuation used (zero when unavailable)
    pub quote: Quote,
    /// Reconstructed statements
    pub statements: FinancialStatements,
    /// Multi-method valuation
    pub valuation: ComprehensiveValuation,
    /// Five-level category, when the fair value is positive
    pub category: Option<ValuationCategory>,
}

impl Analysis {
    /// Whether the quote came back empty.
    pub fn quote_unavailable(&self) -> bool {
        !self.quote.is_usable()
    }
}

/// Runs reconstruction and valuation over pluggable fact and quote sources.
#[derive(Debug)]
pub struct Analyzer<F, Q> {
    facts: F,
    quotes: Q,
    reconstruction: ReconstructionConfig,
    concepts: ConceptTable,
    engine: ValuationEngine,
}

impl<F: FactSource, Q: QuoteSource> Analyzer<F, Q> {
    /// Analyzer with default configuration.
    pub fn new(facts: F, quotes: Q) -> Result<Self> {
        Self::with_config(facts, quotes, ReconstructionConfig::default(), ValuationConfig::default())
    }

    /// Analyzer with explicit configuration; both configs are validated.
    pub fn with_config(
        facts: F,
        quotes: Q,
        reconstruction: ReconstructionConfig,
        valuation: ValuationConfig,
    ) -> Result<Self> {
        reconstruction.validate()?;
        Ok(Self {
            facts,
            quotes,
            reconstruction,
            concepts: ConceptTable::standard(),
            engine: ValuationEngine::new(valuation)?,
        })
    }

    /// Replace the concept fallback table.
    pub fn with_concepts(mut self, concepts: ConceptTable) -> Self {
        self.concepts = concepts;
        self
    }

    /// Valuation engine in use.
    pub const fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    /// Analyze one symbol without overrides.
    pub async fn analyze(&self, symbol: &str) -> Result<Analysis> {
        self.analyze_with(symbol, &ManualOverrides::default()).await
    }

    /// Analyze one symbol, filling absent inputs from `overrides`.
    pub async fn analyze_with(&self, symbol: &str, overrides: &ManualOverrides) -> Result<Analysis> {
        let symbol = normalize_symbol(symbol)?;
        let (facts, quote) = join(self.facts.company_facts(&symbol), self.quotes.quote(&symbol)).await;

        let facts = facts.unwrap_or_else(|e| {
            warn!(%symbol, error = %e, fallback = "empty fact map", "company facts unavailable");
            FactMap::new()
        });
        let quote = quote.unwrap_or_else(|e| {
            warn!(%symbol, error = %e, fallback = "zero quote", "quote unavailable");
            Quote::unavailable(symbol.as_str())
        });

        let statements = reconstruct(&facts, &self.reconstruction, &self.concepts)?;
        let valuation = self.engine.value(&statements, &quote, overrides);
        let category = self.engine.categorize(&valuation);

        info!(
            %symbol,
            fair_value = valuation.average_intrinsic_value,
            recommendation = %valuation.recommendation,
            level = ?category.as_ref().map(|c| c.level),
            "analysis complete"
        );

        Ok(Analysis {
            symbol,
            quote,
            statements,
            valuation,
            category,
        })
    }

    /// Analyze several symbols concurrently, keeping input order.
    pub async fn analyze_many<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<Result<Analysis>> {
        join_all(symbols.iter().map(|symbol| self.analyze(symbol.as_ref()))).await
    }
}
