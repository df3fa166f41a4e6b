//! Historical valuation multiples.

use crate::config::ValuationConfig;
use fairvalue_data::Quote;
use fairvalue_statements::{FinancialStatements, LineItem, StatementRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where a multiple came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultipleSource {
    /// Mean over this many annual periods
    Historical(usize),
    /// The quote's current ratio
    CurrentQuote,
    /// The configured fallback
    Fallback,
}

/// A resolved multiple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multiple {
    /// Ratio value
    pub value: f64,
    /// Origin of the value
    pub source: MultipleSource,
}

impl Multiple {
    fn resolve(observations: &[f64], current: Option<f64>, fallback: f64) -> Self {
        if !observations.is_empty() {
            let mean = observations.iter().sum::<f64>() / observations.len() as f64;
            return Self {
                value: mean,
                source: MultipleSource::Historical(observations.len()),
            };
        }
        match current.filter(|v| v.is_finite() && *v > 0.0) {
            Some(value) => Self {
                value,
                source: MultipleSource::CurrentQuote,
            },
            None => Self {
                value: fallback,
                source: MultipleSource::Fallback,
            },
        }
    }
}

/// Mean price/sales, price/earnings and price/book.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalMultiples {
    /// Price/sales
    pub price_to_sales: Multiple,
    /// Price/earnings
    pub price_to_earnings: Multiple,
    /// Price/book
    pub price_to_book: Multiple,
}

impl HistoricalMultiples {
    /// Multiples from the configured fallbacks only.
    pub const fn fallback(config: &ValuationConfig) -> Self {
        Self {
            price_to_sales: Multiple {
                value: config.fallback_price_to_sales,
                source: MultipleSource::Fallback,
            },
            price_to_earnings: Multiple {
                value: config.fallback_price_to_earnings,
                source: MultipleSource::Fallback,
            },
            price_to_book: Multiple {
                value: config.fallback_price_to_book,
                source: MultipleSource::Fallback,
            },
        }
    }

    /// Compute the mean multiple of every annual period with a known
    /// year-end price, falling back to the quote and then the config.
    ///
    /// Only positive metrics contribute; P/E observations above
    /// [`ValuationConfig::max_historical_pe`] are dropped.
    pub fn from_statements(statements: &FinancialStatements, quote: &Quote, config: &ValuationConfig) -> Self {
        let mut sales = Vec::new();
        let mut earnings = Vec::new();
        let mut book = Vec::new();

        for income in &statements.income.annual {
            let Some(price) = quote.price_at(income.date).filter(|p| *p > 0.0) else {
                continue;
            };
            let balance = statements
                .balance
                .annual
                .iter()
                .find(|b| b.fiscal_year == income.fiscal_year);
            let Some(shares) = period_shares(income, balance, quote) else {
                continue;
            };
            let market_cap = price * shares;

            if let Some(revenue) = income.get(LineItem::Revenue).positive() {
                sales.push(market_cap / revenue);
            }
            if let Some(net_income) = income.get(LineItem::NetIncome).positive() {
                let pe = market_cap / net_income;
                if pe <= config.max_historical_pe {
                    earnings.push(pe);
                }
            }
            if let Some(equity) = balance.and_then(|b| b.get(LineItem::ShareholderEquity).positive()) {
                book.push(market_cap / equity);
            }
        }

        let multiples = Self {
            price_to_sales: Multiple::resolve(&sales, quote.price_to_sales, config.fallback_price_to_sales),
            price_to_earnings: Multiple::resolve(&earnings, quote.pe_ratio, config.fallback_price_to_earnings),
            price_to_book: Multiple::resolve(&book, quote.price_to_book, config.fallback_price_to_book),
        };
        debug!(
            symbol = %quote.symbol,
            price_to_sales = multiples.price_to_sales.value,
            price_to_earnings = multiples.price_to_earnings.value,
            price_to_book = multiples.price_to_book.value,
            "resolved historical multiples"
        );
        multiples
    }
}

/// Share count for a period: balance sheet, then diluted weighted, then quote.
fn period_shares(income: &StatementRecord, balance: Option<&StatementRecord>, quote: &Quote) -> Option<f64> {
    balance
        .and_then(|b| b.get(LineItem::SharesOutstanding).positive())
        .or_else(|| income.get(LineItem::WeightedSharesDiluted).positive())
        .or_else(|| Some(quote.shares_outstanding).filter(|s| *s > 0.0))
}
