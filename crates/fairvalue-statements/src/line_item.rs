//! Statement line items and how each one aggregates over time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three reconstructed statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Income statement
    Income,
    /// Balance sheet
    Balance,
    /// Cash-flow statement
    CashFlow,
}

impl StatementKind {
    /// All statement kinds.
    pub const ALL: [Self; 3] = [Self::Income, Self::Balance, Self::CashFlow];

    /// Flow statements report activity over a period; the balance sheet is a snapshot.
    pub const fn is_flow(&self) -> bool {
        !matches!(self, Self::Balance)
    }

    /// Line items belonging to this statement.
    pub fn items(self) -> impl Iterator<Item = LineItem> {
        LineItem::ALL.into_iter().filter(move |item| item.kind() == self)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Income => "income",
            Self::Balance => "balance",
            Self::CashFlow => "cash-flow",
        })
    }
}

/// How a line item combines across sub-periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Additive over time (revenue, cash flows)
    Flow,
    /// Per-share figure; subtracted like a flow within a year, approximated for Q4
    PerShare,
    /// Point-in-time or period-average level; never summed
    Instant,
    /// Level at the start of the period
    Opening,
}

/// Every field a reconstructed statement can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum LineItem {
    // Income statement
    Revenue,
    CostOfRevenue,
    GrossProfit,
    ResearchAndDevelopment,
    SellingGeneralAdministrative,
    OperatingExpenses,
    OperatingIncome,
    InterestExpense,
    IncomeBeforeTax,
    IncomeTax,
    NetIncome,
    EpsBasic,
    EpsDiluted,
    WeightedSharesBasic,
    WeightedSharesDiluted,

    // Balance sheet
    TotalAssets,
    CurrentAssets,
    Cash,
    ShortTermInvestments,
    Receivables,
    Inventory,
    PropertyPlantEquipment,
    Goodwill,
    IntangibleAssets,
    TotalLiabilities,
    CurrentLiabilities,
    AccountsPayable,
    ShortTermDebt,
    LongTermDebt,
    ShareholderEquity,
    RetainedEarnings,
    SharesOutstanding,

    // Cash-flow statement
    OperatingCashFlow,
    CapitalExpenditures,
    FreeCashFlow,
    DepreciationAmortization,
    StockBasedCompensation,
    InvestingCashFlow,
    FinancingCashFlow,
    DividendsPaid,
    ShareRepurchases,
    NetChangeInCash,
    BeginningCash,
    EndingCash,
}

impl LineItem {
    /// Every line item, grouped by statement.
    pub const ALL: [Self; 44] = [
        Self::Revenue,
        Self::CostOfRevenue,
        Self::GrossProfit,
        Self::ResearchAndDevelopment,
        Self::SellingGeneralAdministrative,
        Self::OperatingExpenses,
        Self::OperatingIncome,
        Self::InterestExpense,
        Self::IncomeBeforeTax,
        Self::IncomeTax,
        Self::NetIncome,
        Self::EpsBasic,
        Self::EpsDiluted,
        Self::WeightedSharesBasic,
        Self::WeightedSharesDiluted,
        Self::TotalAssets,
        Self::CurrentAssets,
        Self::Cash,
        Self::ShortTermInvestments,
        Self::Receivables,
        Self::Inventory,
        Self::PropertyPlantEquipment,
        Self::Goodwill,
        Self::IntangibleAssets,
        Self::TotalLiabilities,
        Self::CurrentLiabilities,
        Self::AccountsPayable,
        Self::ShortTermDebt,
        Self::LongTermDebt,
        Self::ShareholderEquity,
        Self::RetainedEarnings,
        Self::SharesOutstanding,
        Self::OperatingCashFlow,
        Self::CapitalExpenditures,
        Self::FreeCashFlow,
        Self::DepreciationAmortization,
        Self::StockBasedCompensation,
        Self::InvestingCashFlow,
        Self::FinancingCashFlow,
        Self::DividendsPaid,
        Self::ShareRepurchases,
        Self::NetChangeInCash,
        Self::BeginningCash,
        Self::EndingCash,
    ];

    /// Statement this item belongs to.
    pub const fn kind(&self) -> StatementKind {
        match self {
            Self::Revenue
            | Self::CostOfRevenue
            | Self::GrossProfit
            | Self::ResearchAndDevelopment
            | Self::SellingGeneralAdministrative
            | Self::OperatingExpenses
            | Self::OperatingIncome
            | Self::InterestExpense
            | Self::IncomeBeforeTax
            | Self::IncomeTax
            | Self::NetIncome
            | Self::EpsBasic
            | Self::EpsDiluted
            | Self::WeightedSharesBasic
            | Self::WeightedSharesDiluted => StatementKind::Income,
            Self::TotalAssets
            | Self::CurrentAssets
            | Self::Cash
            | Self::ShortTermInvestments
            | Self::Receivables
            | Self::Inventory
            | Self::PropertyPlantEquipment
            | Self::Goodwill
            | Self::IntangibleAssets
            | Self::TotalLiabilities
            | Self::CurrentLiabilities
            | Self::AccountsPayable
            | Self::ShortTermDebt
            | Self::LongTermDebt
            | Self::ShareholderEquity
            | Self::RetainedEarnings
            | Self::SharesOutstanding => StatementKind::Balance,
            Self::OperatingCashFlow
            | Self::CapitalExpenditures
            | Self::FreeCashFlow
            | Self::DepreciationAmortization
            | Self::StockBasedCompensation
            | Self::InvestingCashFlow
            | Self::FinancingCashFlow
            | Self::DividendsPaid
            | Self::ShareRepurchases
            | Self::NetChangeInCash
            | Self::BeginningCash
            | Self::EndingCash => StatementKind::CashFlow,
        }
    }

    /// How the item combines across quarters.
    pub const fn aggregation(&self) -> Aggregation {
        match self {
            Self::EpsBasic | Self::EpsDiluted => Aggregation::PerShare,
            Self::WeightedSharesBasic | Self::WeightedSharesDiluted | Self::EndingCash => {
                Aggregation::Instant
            }
            Self::BeginningCash => Aggregation::Opening,
            _ if matches!(self.kind(), StatementKind::Balance) => Aggregation::Instant,
            _ => Aggregation::Flow,
        }
    }

    /// Returns true for items that are quarter-over-quarter arithmetic targets.
    pub const fn is_additive(&self) -> bool {
        matches!(self.aggregation(), Aggregation::Flow | Aggregation::PerShare) && !self.is_derived()
    }

    /// Items computed from other items rather than read from facts.
    pub const fn is_derived(&self) -> bool {
        matches!(self, Self::FreeCashFlow)
    }

    /// Items whose facts are point-in-time values (no period start).
    pub const fn is_point_in_time(&self) -> bool {
        matches!(self.kind(), StatementKind::Balance)
            || matches!(self, Self::EndingCash | Self::BeginningCash)
    }

    /// Items that cannot be negative in a correctly reported period.
    pub const fn is_non_negative(&self) -> bool {
        matches!(
            self,
            Self::Revenue
                | Self::CostOfRevenue
                | Self::ResearchAndDevelopment
                | Self::SellingGeneralAdministrative
                | Self::OperatingExpenses
                | Self::InterestExpense
                | Self::WeightedSharesBasic
                | Self::WeightedSharesDiluted
                | Self::TotalAssets
                | Self::CurrentAssets
                | Self::Cash
                | Self::ShortTermInvestments
                | Self::Receivables
                | Self::Inventory
                | Self::PropertyPlantEquipment
                | Self::Goodwill
                | Self::IntangibleAssets
                | Self::TotalLiabilities
                | Self::CurrentLiabilities
                | Self::AccountsPayable
                | Self::ShortTermDebt
                | Self::LongTermDebt
                | Self::SharesOutstanding
                | Self::CapitalExpenditures
                | Self::DepreciationAmortization
                | Self::StockBasedCompensation
                | Self::DividendsPaid
                | Self::ShareRepurchases
                | Self::BeginningCash
                | Self::EndingCash
        )
    }

    /// Human-readable name.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::CostOfRevenue => "Cost of Revenue",
            Self::GrossProfit => "Gross Profit",
            Self::ResearchAndDevelopment => "Research & Development",
            Self::SellingGeneralAdministrative => "SG&A",
            Self::OperatingExpenses => "Operating Expenses",
            Self::OperatingIncome => "Operating Income",
            Self::InterestExpense => "Interest Expense",
            Self::IncomeBeforeTax => "Income Before Tax",
            Self::IncomeTax => "Income Tax",
            Self::NetIncome => "Net Income",
            Self::EpsBasic => "EPS (Basic)",
            Self::EpsDiluted => "EPS (Diluted)",
            Self::WeightedSharesBasic => "Weighted Shares (Basic)",
            Self::WeightedSharesDiluted => "Weighted Shares (Diluted)",
            Self::TotalAssets => "Total Assets",
            Self::CurrentAssets => "Current Assets",
            Self::Cash => "Cash & Equivalents",
            Self::ShortTermInvestments => "Short-term Investments",
            Self::Receivables => "Receivables",
            Self::Inventory => "Inventory",
            Self::PropertyPlantEquipment => "PP&E",
            Self::Goodwill => "Goodwill",
            Self::IntangibleAssets => "Intangible Assets",
            Self::TotalLiabilities => "Total Liabilities",
            Self::CurrentLiabilities => "Current Liabilities",
            Self::AccountsPayable => "Accounts Payable",
            Self::ShortTermDebt => "Short-term Debt",
            Self::LongTermDebt => "Long-term Debt",
            Self::ShareholderEquity => "Shareholder Equity",
            Self::RetainedEarnings => "Retained Earnings",
            Self::SharesOutstanding => "Shares Outstanding",
            Self::OperatingCashFlow => "Operating Cash Flow",
            Self::CapitalExpenditures => "Capital Expenditures",
            Self::FreeCashFlow => "Free Cash Flow",
            Self::DepreciationAmortization => "Depreciation & Amortization",
            Self::StockBasedCompensation => "Stock-based Compensation",
            Self::InvestingCashFlow => "Investing Cash Flow",
            Self::FinancingCashFlow => "Financing Cash Flow",
            Self::DividendsPaid => "Dividends Paid",
            Self::ShareRepurchases => "Share Repurchases",
            Self::NetChangeInCash => "Net Change in Cash",
            Self::BeginningCash => "Beginning Cash",
            Self::EndingCash => "Ending Cash",
        }
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
