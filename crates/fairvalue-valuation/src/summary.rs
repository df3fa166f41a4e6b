//! Point-in-time financial summary feeding the estimators.

use crate::config::ValuationConfig;
use fairvalue_statements::{Amount, FinancialStatements, LineItem, StatementRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Annual periods considered for the revenue CAGR.
const CAGR_MAX_YEARS: usize = 5;

/// Caller-supplied values for inputs the filings did not provide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManualOverrides {
    /// Annual operating cash flow
    pub operating_cash_flow: Option<f64>,
    /// Total shareholder equity
    pub shareholder_equity: Option<f64>,
    /// Current PEG ratio
    pub peg_ratio: Option<f64>,
    /// Earnings growth as a fraction (0.12 = 12%)
    pub earnings_growth: Option<f64>,
}

impl ManualOverrides {
    /// Returns true if no override is set.
    pub const fn is_empty(&self) -> bool {
        self.operating_cash_flow.is_none()
            && self.shareholder_equity.is_none()
            && self.peg_ratio.is_none()
            && self.earnings_growth.is_none()
    }
}

/// Where the headline growth rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthSource {
    /// Compound annual revenue growth over this many years
    RevenueCagr(i32),
    /// Latest year-over-year revenue growth
    RevenueYoy,
    /// Latest year-over-year net income growth
    EarningsYoy,
    /// [`ValuationConfig::default_growth_rate`]
    Default,
}

/// Trailing flows, latest balance sheet and growth rates for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialsSummary {
    /// Revenue (TTM, else latest annual)
    pub revenue: Amount,
    /// Net income (TTM, else latest annual)
    pub net_income: Amount,
    /// Operating cash flow (TTM, else latest annual)
    pub operating_cash_flow: Amount,
    /// Capital expenditures (TTM, else latest annual)
    pub capital_expenditures: Amount,
    /// Operating cash flow less capital expenditures
    pub free_cash_flow: Amount,
    /// Shareholder equity (latest quarter, else latest annual)
    pub shareholder_equity: Amount,
    /// Short-term plus long-term debt
    pub total_debt: Amount,
    /// Cash plus short-term investments
    pub cash_and_investments: Amount,
    /// Shares outstanding reported on the latest balance sheet
    pub shares_outstanding: Amount,
    /// Growth rate driving the discounted-cash-flow family
    pub growth_rate: f64,
    /// Origin of [`growth_rate`](Self::growth_rate)
    pub growth_source: GrowthSource,
    /// Year-over-year revenue growth
    pub revenue_growth: Option<f64>,
    /// Year-over-year net income growth
    pub earnings_growth: Option<f64>,
    /// Current PEG ratio, when supplied by the caller
    pub peg_ratio: Option<f64>,
}

impl FinancialsSummary {
    /// A summary with every input absent and the default growth rate.
    pub fn empty(config: &ValuationConfig) -> Self {
        Self {
            revenue: Amount::ABSENT,
            net_income: Amount::ABSENT,
            operating_cash_flow: Amount::ABSENT,
            capital_expenditures: Amount::ABSENT,
            free_cash_flow: Amount::ABSENT,
            shareholder_equity: Amount::ABSENT,
            total_debt: Amount::ABSENT,
            cash_and_investments: Amount::ABSENT,
            shares_outstanding: Amount::ABSENT,
            growth_rate: config.default_growth_rate,
            growth_source: GrowthSource::Default,
            revenue_growth: None,
            earnings_growth: None,
            peg_ratio: None,
        }
    }

    /// Summarize reconstructed statements.
    pub fn from_statements(statements: &FinancialStatements, config: &ValuationConfig) -> Self {
        let mut summary = Self::empty(config);

        let income = &statements.income;
        summary.revenue = income.trailing_value(LineItem::Revenue);
        summary.net_income = income.trailing_value(LineItem::NetIncome);
        let cash_flow = &statements.cash_flow;
        summary.operating_cash_flow = cash_flow.trailing_value(LineItem::OperatingCashFlow);
        summary.capital_expenditures = cash_flow.trailing_value(LineItem::CapitalExpenditures);
        summary.free_cash_flow = cash_flow.trailing_value(LineItem::FreeCashFlow);
        let balance = statements
            .balance
            .latest_quarterly()
            .or_else(|| statements.balance.latest_annual());
        if let Some(balance) = balance {
            summary.shareholder_equity = balance.get(LineItem::ShareholderEquity);
            summary.total_debt =
                partial_sum(balance.get(LineItem::ShortTermDebt), balance.get(LineItem::LongTermDebt));
            summary.cash_and_investments =
                partial_sum(balance.get(LineItem::Cash), balance.get(LineItem::ShortTermInvestments));
            summary.shares_outstanding = balance.get(LineItem::SharesOutstanding);
        }

        let annual = &statements.income.annual;
        summary.revenue_growth = year_over_year(annual, LineItem::Revenue);
        summary.earnings_growth = year_over_year(annual, LineItem::NetIncome);

        let (rate, source) = if let Some((cagr, years)) = revenue_cagr(annual) {
            (cagr, GrowthSource::RevenueCagr(years))
        } else if let Some(yoy) = summary.revenue_growth {
            (yoy, GrowthSource::RevenueYoy)
        } else if let Some(yoy) = summary.earnings_growth {
            (yoy, GrowthSource::EarningsYoy)
        } else {
            debug!(rate = config.default_growth_rate, "no growth history, using default growth rate");
            (config.default_growth_rate, GrowthSource::Default)
        };
        summary.growth_rate = rate;
        summary.growth_source = source;
        summary
    }

    /// Fill absent inputs from caller overrides; reported values win.
    pub fn with_overrides(mut self, overrides: &ManualOverrides) -> Self {
        if let Some(ocf) = overrides.operating_cash_flow
            && self.operating_cash_flow.is_absent()
        {
            self.operating_cash_flow = Amount::new(ocf);
            if self.free_cash_flow.is_absent() {
                self.free_cash_flow = self.operating_cash_flow - self.capital_expenditures;
            }
        }
        if let Some(equity) = overrides.shareholder_equity
            && self.shareholder_equity.is_absent()
        {
            self.shareholder_equity = Amount::new(equity);
        }
        if self.earnings_growth.is_none() {
            self.earnings_growth = overrides.earnings_growth;
        }
        if self.peg_ratio.is_none() {
            self.peg_ratio = overrides.peg_ratio;
        }
        self
    }

    /// Net debt bridge from enterprise to equity value: `cash - debt`.
    ///
    /// Unreported debt or cash lines contribute nothing.
    pub fn net_cash(&self) -> f64 {
        self.cash_and_investments.or_zero() - self.total_debt.or_zero()
    }
}

/// Sum of the present parts; absent only when both are.
fn partial_sum(a: Amount, b: Amount) -> Amount {
    if a.is_absent() && b.is_absent() {
        Amount::ABSENT
    } else {
        Amount::new(a.or_zero() + b.or_zero())
    }
}

/// Growth of `item` between the two newest annual records, positive base only.
fn year_over_year(annual: &[StatementRecord], item: LineItem) -> Option<f64> {
    let [current, prior, ..] = annual else {
        return None;
    };
    let now = current.get(item).value()?;
    let base = prior.get(item).positive()?;
    Some((now - base) / base)
}

/// Revenue CAGR across up to five annual periods, needing at least three
/// records so it differs from the year-over-year fallback.
fn revenue_cagr(annual: &[StatementRecord]) -> Option<(f64, i32)> {
    let window = &annual[..annual.len().min(CAGR_MAX_YEARS + 1)];
    let (newest, oldest) = (window.first()?, window.last()?);
    if window.len() < 3 {
        return None;
    }
    let years = newest.fiscal_year - oldest.fiscal_year;
    if years <= 0 {
        return None;
    }
    let end = newest.get(LineItem::Revenue).positive()?;
    let start = oldest.get(LineItem::Revenue).positive()?;
    Some(((end / start).powf(1.0 / f64::from(years)) - 1.0, years))
}
