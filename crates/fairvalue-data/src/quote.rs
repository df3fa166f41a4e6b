//! Market quote snapshot.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Oldest price [`Quote::price_at`] accepts, in days before the requested date.
pub const PRICE_LOOKBACK_DAYS: u64 = 366;

/// Current market data for one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker symbol
    pub symbol: String,
    /// Last traded price
    pub price: f64,
    /// Shares outstanding
    pub shares_outstanding: f64,
    /// Current price/earnings multiple
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    /// Current price/sales multiple
    #[serde(default)]
    pub price_to_sales: Option<f64>,
    /// Current price/book multiple
    #[serde(default)]
    pub price_to_book: Option<f64>,
    /// Closing prices at (or near) past fiscal year ends
    #[serde(default)]
    pub year_end_prices: BTreeMap<NaiveDate, f64>,
}

impl Quote {
    /// Create a quote with price and share count only.
    pub fn new(symbol: impl Into<String>, price: f64, shares_outstanding: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            shares_outstanding,
            pe_ratio: None,
            price_to_sales: None,
            price_to_book: None,
            year_end_prices: BTreeMap::new(),
        }
    }

    /// Placeholder used when no quote could be obtained.
    pub fn unavailable(symbol: impl Into<String>) -> Self {
        Self::new(symbol, 0.0, 0.0)
    }

    /// Set the current P/E ratio.
    pub fn with_pe_ratio(mut self, pe: f64) -> Self {
        self.pe_ratio = Some(pe);
        self
    }

    /// Set the current P/S ratio.
    pub fn with_price_to_sales(mut self, ps: f64) -> Self {
        self.price_to_sales = Some(ps);
        self
    }

    /// Set the current P/B ratio.
    pub fn with_price_to_book(mut self, pb: f64) -> Self {
        self.price_to_book = Some(pb);
        self
    }

    /// Record the closing price on a fiscal year end.
    pub fn with_year_end_price(mut self, date: NaiveDate, price: f64) -> Self {
        self.year_end_prices.insert(date, price);
        self
    }

    /// Market capitalization (price × shares outstanding).
    pub fn market_cap(&self) -> f64 {
        self.price * self.shares_outstanding
    }

    /// Returns true if both price and share count are positive.
    pub fn is_usable(&self) -> bool {
        self.price > 0.0 && self.shares_outstanding > 0.0
    }

    /// Price on the latest recorded date at or before `date`, looking back at
    /// most [`PRICE_LOOKBACK_DAYS`].
    pub fn price_at(&self, date: NaiveDate) -> Option<f64> {
        let earliest = date.checked_sub_days(Days::new(PRICE_LOOKBACK_DAYS))?;
        self.year_end_prices
            .range(earliest..=date)
            .next_back()
            .map(|(_, price)| *price)
    }
}
