//! Line item → ordered concept fallback table.
//!
//! Each line item resolves through the first concept in its chain that has a
//! fact for the period. Industry-specific concepts (bank interest income and
//! similar) sit at the end of the chain so that standard tags win.

use crate::line_item::{LineItem, StatementKind};
use fairvalue_data::concepts::{balance_sheet, banking, cash_flow, income_statement, per_share};
use std::collections::BTreeMap;

/// Ordered fallback concepts per line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptTable {
    chains: BTreeMap<LineItem, Vec<String>>,
}

impl Default for ConceptTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ConceptTable {
    /// An empty table.
    pub const fn empty() -> Self {
        Self { chains: BTreeMap::new() }
    }

    /// The standard US-GAAP table with bank fallbacks.
    pub fn standard() -> Self {
        use LineItem::*;

        let table: &[(LineItem, &[&str])] = &[
            (
                Revenue,
                &[
                    income_statement::REVENUES,
                    income_statement::REVENUE_FROM_CONTRACT,
                    income_statement::REVENUE_FROM_CONTRACT_INCL_TAX,
                    income_statement::SALES_REVENUE_NET,
                    banking::REVENUES_NET_OF_INTEREST_EXPENSE,
                    banking::INTEREST_AND_DIVIDEND_INCOME,
                ],
            ),
            (
                CostOfRevenue,
                &[
                    income_statement::COST_OF_REVENUE,
                    income_statement::COST_OF_GOODS_AND_SERVICES,
                ],
            ),
            (GrossProfit, &[income_statement::GROSS_PROFIT]),
            (ResearchAndDevelopment, &[income_statement::RESEARCH_AND_DEVELOPMENT]),
            (SellingGeneralAdministrative, &[income_statement::SGA]),
            (
                OperatingExpenses,
                &[
                    income_statement::OPERATING_EXPENSES,
                    income_statement::COSTS_AND_EXPENSES,
                    banking::NONINTEREST_EXPENSE,
                ],
            ),
            (OperatingIncome, &[income_statement::OPERATING_INCOME]),
            (
                InterestExpense,
                &[
                    income_statement::INTEREST_EXPENSE,
                    income_statement::INTEREST_EXPENSE_NONOPERATING,
                ],
            ),
            (
                IncomeBeforeTax,
                &[
                    income_statement::INCOME_BEFORE_TAX,
                    income_statement::INCOME_BEFORE_TAX_ALT,
                ],
            ),
            (IncomeTax, &[income_statement::INCOME_TAX]),
            (
                NetIncome,
                &[
                    income_statement::NET_INCOME,
                    income_statement::PROFIT_LOSS,
                    income_statement::NET_INCOME_TO_COMMON,
                ],
            ),
            (EpsBasic, &[per_share::EPS_BASIC, per_share::EPS_BASIC_AND_DILUTED]),
            (EpsDiluted, &[per_share::EPS_DILUTED, per_share::EPS_BASIC_AND_DILUTED]),
            (WeightedSharesBasic, &[per_share::WEIGHTED_SHARES_BASIC]),
            (WeightedSharesDiluted, &[per_share::WEIGHTED_SHARES_DILUTED]),
            (TotalAssets, &[balance_sheet::ASSETS]),
            (CurrentAssets, &[balance_sheet::CURRENT_ASSETS]),
            (
                Cash,
                &[
                    balance_sheet::CASH,
                    balance_sheet::CASH_ALT,
                    balance_sheet::CASH_AND_RESTRICTED,
                ],
            ),
            (
                ShortTermInvestments,
                &[
                    balance_sheet::SHORT_TERM_INVESTMENTS,
                    balance_sheet::MARKETABLE_SECURITIES_CURRENT,
                    balance_sheet::AVAILABLE_FOR_SALE_CURRENT,
                ],
            ),
            (Receivables, &[balance_sheet::RECEIVABLES, balance_sheet::RECEIVABLES_ALT]),
            (Inventory, &[balance_sheet::INVENTORY]),
            (PropertyPlantEquipment, &[balance_sheet::PPE]),
            (Goodwill, &[balance_sheet::GOODWILL]),
            (
                IntangibleAssets,
                &[balance_sheet::INTANGIBLES, balance_sheet::INTANGIBLES_FINITE],
            ),
            (TotalLiabilities, &[balance_sheet::LIABILITIES]),
            (CurrentLiabilities, &[balance_sheet::CURRENT_LIABILITIES]),
            (AccountsPayable, &[balance_sheet::ACCOUNTS_PAYABLE]),
            (
                ShortTermDebt,
                &[
                    balance_sheet::SHORT_TERM_DEBT,
                    balance_sheet::LONG_TERM_DEBT_CURRENT,
                    balance_sheet::COMMERCIAL_PAPER,
                ],
            ),
            (
                LongTermDebt,
                &[balance_sheet::LONG_TERM_DEBT, balance_sheet::LONG_TERM_DEBT_ALT],
            ),
            (
                ShareholderEquity,
                &[
                    balance_sheet::STOCKHOLDERS_EQUITY,
                    balance_sheet::STOCKHOLDERS_EQUITY_INCL_NCI,
                ],
            ),
            (RetainedEarnings, &[balance_sheet::RETAINED_EARNINGS]),
            (
                SharesOutstanding,
                &[
                    balance_sheet::SHARES_OUTSTANDING,
                    balance_sheet::ENTITY_SHARES_OUTSTANDING,
                ],
            ),
            (
                OperatingCashFlow,
                &[
                    cash_flow::OPERATING_CASH_FLOW,
                    cash_flow::OPERATING_CASH_FLOW_CONTINUING,
                ],
            ),
            (
                CapitalExpenditures,
                &[cash_flow::CAPEX, cash_flow::CAPEX_PRODUCTIVE_ASSETS],
            ),
            (
                DepreciationAmortization,
                &[
                    cash_flow::DEPRECIATION_AND_AMORTIZATION,
                    cash_flow::DEPRECIATION_AND_AMORTIZATION_ALT,
                    cash_flow::DEPRECIATION_AMORTIZATION_ACCRETION,
                ],
            ),
            (
                StockBasedCompensation,
                &[
                    cash_flow::STOCK_BASED_COMPENSATION,
                    cash_flow::STOCK_BASED_COMPENSATION_ALT,
                ],
            ),
            (InvestingCashFlow, &[cash_flow::INVESTING_CASH_FLOW]),
            (FinancingCashFlow, &[cash_flow::FINANCING_CASH_FLOW]),
            (
                DividendsPaid,
                &[cash_flow::DIVIDENDS_PAID, cash_flow::DIVIDENDS_PAID_ALT],
            ),
            (ShareRepurchases, &[cash_flow::SHARE_REPURCHASES]),
            (
                NetChangeInCash,
                &[cash_flow::NET_CHANGE_IN_CASH, cash_flow::NET_CHANGE_IN_CASH_ALT],
            ),
            (
                BeginningCash,
                &[balance_sheet::CASH_AND_RESTRICTED, balance_sheet::CASH],
            ),
            (
                EndingCash,
                &[balance_sheet::CASH_AND_RESTRICTED, balance_sheet::CASH],
            ),
        ];

        let mut chains = BTreeMap::new();
        for (item, concepts) in table {
            chains.insert(*item, concepts.iter().map(|c| (*c).to_string()).collect());
        }

        Self { chains }
    }

    /// Append a fallback concept to an item's chain (no-op if already present).
    pub fn with_fallback(mut self, item: LineItem, concept: &str) -> Self {
        let chain = self.chains.entry(item).or_default();
        if !chain.iter().any(|c| c == concept) {
            chain.push(concept.to_string());
        }
        self
    }

    /// Replace an item's chain.
    pub fn with_chain(mut self, item: LineItem, concepts: &[&str]) -> Self {
        self.chains
            .insert(item, concepts.iter().map(|c| (*c).to_string()).collect());
        self
    }

    /// Concepts for an item, in priority order.
    pub fn concepts(&self, item: LineItem) -> &[String] {
        self.chains.get(&item).map_or(&[], Vec::as_slice)
    }

    /// Items whose reported periods define a statement's records.
    pub const fn anchor_items(kind: StatementKind) -> &'static [LineItem] {
        match kind {
            StatementKind::Income => &[LineItem::Revenue, LineItem::NetIncome],
            StatementKind::Balance => &[LineItem::TotalAssets],
            StatementKind::CashFlow => &[LineItem::OperatingCashFlow],
        }
    }

    /// Concepts whose facts define a statement's periods.
    pub fn anchor_concepts(&self, kind: StatementKind) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for item in Self::anchor_items(kind) {
            for concept in self.concepts(*item) {
                if !out.contains(&concept.as_str()) {
                    out.push(concept);
                }
            }
        }
        out
    }
}
