//! Common US-GAAP concept names, as keyed in a [`FactMap`](crate::FactMap).
//!
//! Names carry no taxonomy prefix: `Assets`, not `us-gaap:Assets`.

/// Balance Sheet concepts
pub mod balance_sheet {
    /// Total Assets
    pub const ASSETS: &str = "Assets";

    /// Current Assets
    pub const CURRENT_ASSETS: &str = "AssetsCurrent";

    /// Cash and Cash Equivalents
    pub const CASH: &str = "CashAndCashEquivalentsAtCarryingValue";

    /// Alternative: Cash including restricted cash
    pub const CASH_AND_RESTRICTED: &str =
        "CashCashEquivalentsRestrictedCashAndRestrictedCashEquivalents";

    /// Alternative: Cash
    pub const CASH_ALT: &str = "Cash";

    /// Short-term Investments
    pub const SHORT_TERM_INVESTMENTS: &str = "ShortTermInvestments";

    /// Alternative: Marketable Securities (current)
    pub const MARKETABLE_SECURITIES_CURRENT: &str = "MarketableSecuritiesCurrent";

    /// Alternative: Available-for-sale debt securities (current)
    pub const AVAILABLE_FOR_SALE_CURRENT: &str = "AvailableForSaleSecuritiesDebtSecuritiesCurrent";

    /// Accounts Receivable (net, current)
    pub const RECEIVABLES: &str = "AccountsReceivableNetCurrent";

    /// Alternative: Receivables
    pub const RECEIVABLES_ALT: &str = "ReceivablesNetCurrent";

    /// Inventory
    pub const INVENTORY: &str = "InventoryNet";

    /// Property, Plant and Equipment (net)
    pub const PPE: &str = "PropertyPlantAndEquipmentNet";

    /// Goodwill
    pub const GOODWILL: &str = "Goodwill";

    /// Intangible Assets excluding Goodwill
    pub const INTANGIBLES: &str = "IntangibleAssetsNetExcludingGoodwill";

    /// Alternative: Finite-lived Intangible Assets
    pub const INTANGIBLES_FINITE: &str = "FiniteLivedIntangibleAssetsNet";

    /// Total Liabilities
    pub const LIABILITIES: &str = "Liabilities";

    /// Current Liabilities
    pub const CURRENT_LIABILITIES: &str = "LiabilitiesCurrent";

    /// Accounts Payable (current)
    pub const ACCOUNTS_PAYABLE: &str = "AccountsPayableCurrent";

    /// Short-term Debt
    pub const SHORT_TERM_DEBT: &str = "ShortTermBorrowings";

    /// Alternative: Current portion of long-term debt
    pub const LONG_TERM_DEBT_CURRENT: &str = "LongTermDebtCurrent";

    /// Alternative: Commercial Paper
    pub const COMMERCIAL_PAPER: &str = "CommercialPaper";

    /// Long-term Debt (non-current)
    pub const LONG_TERM_DEBT: &str = "LongTermDebtNoncurrent";

    /// Alternative: Long-term Debt
    pub const LONG_TERM_DEBT_ALT: &str = "LongTermDebt";

    /// Stockholders' Equity
    pub const STOCKHOLDERS_EQUITY: &str = "StockholdersEquity";

    /// Alternative: Equity including noncontrolling interest
    pub const STOCKHOLDERS_EQUITY_INCL_NCI: &str =
        "StockholdersEquityIncludingPortionAttributableToNoncontrollingInterest";

    /// Retained Earnings (accumulated deficit)
    pub const RETAINED_EARNINGS: &str = "RetainedEarningsAccumulatedDeficit";

    /// Common Stock Shares Outstanding
    pub const SHARES_OUTSTANDING: &str = "CommonStockSharesOutstanding";

    /// Alternative: Cover-page shares outstanding
    pub const ENTITY_SHARES_OUTSTANDING: &str = "EntityCommonStockSharesOutstanding";
}

/// Income Statement concepts
pub mod income_statement {
    /// Total Revenue
    pub const REVENUES: &str = "Revenues";

    /// Alternative: Revenue from Contract with Customer
    pub const REVENUE_FROM_CONTRACT: &str = "RevenueFromContractWithCustomerExcludingAssessedTax";

    /// Alternative: Revenue from Contract with Customer including assessed tax
    pub const REVENUE_FROM_CONTRACT_INCL_TAX: &str =
        "RevenueFromContractWithCustomerIncludingAssessedTax";

    /// Alternative: Net Sales
    pub const SALES_REVENUE_NET: &str = "SalesRevenueNet";

    /// Cost of Revenue
    pub const COST_OF_REVENUE: &str = "CostOfRevenue";

    /// Alternative: Cost of Goods and Services Sold
    pub const COST_OF_GOODS_AND_SERVICES: &str = "CostOfGoodsAndServicesSold";

    /// Gross Profit
    pub const GROSS_PROFIT: &str = "GrossProfit";

    /// Research and Development Expense
    pub const RESEARCH_AND_DEVELOPMENT: &str = "ResearchAndDevelopmentExpense";

    /// Selling, General and Administrative Expense
    pub const SGA: &str = "SellingGeneralAndAdministrativeExpense";

    /// Operating Expenses
    pub const OPERATING_EXPENSES: &str = "OperatingExpenses";

    /// Alternative: Costs and Expenses
    pub const COSTS_AND_EXPENSES: &str = "CostsAndExpenses";

    /// Operating Income (Loss)
    pub const OPERATING_INCOME: &str = "OperatingIncomeLoss";

    /// Interest Expense
    pub const INTEREST_EXPENSE: &str = "InterestExpense";

    /// Alternative: Interest Expense (non-operating)
    pub const INTEREST_EXPENSE_NONOPERATING: &str = "InterestExpenseNonoperating";

    /// Income before income taxes
    pub const INCOME_BEFORE_TAX: &str =
        "IncomeLossFromContinuingOperationsBeforeIncomeTaxesExtraordinaryItemsNoncontrollingInterest";

    /// Alternative: Income before income taxes (domestic and foreign)
    pub const INCOME_BEFORE_TAX_ALT: &str =
        "IncomeLossFromContinuingOperationsBeforeIncomeTaxesMinorityInterestAndIncomeLossFromEquityMethodInvestments";

    /// Income Tax Expense (Benefit)
    pub const INCOME_TAX: &str = "IncomeTaxExpenseBenefit";

    /// Net Income (Loss)
    pub const NET_INCOME: &str = "NetIncomeLoss";

    /// Alternative: Profit or loss including noncontrolling interest
    pub const PROFIT_LOSS: &str = "ProfitLoss";

    /// Alternative: Net income available to common stockholders
    pub const NET_INCOME_TO_COMMON: &str = "NetIncomeLossAvailableToCommonStockholdersBasic";
}

/// Bank and financial-institution concepts used as fallbacks
pub mod banking {
    /// Revenues net of interest expense
    pub const REVENUES_NET_OF_INTEREST_EXPENSE: &str = "RevenuesNetOfInterestExpense";

    /// Interest and dividend income (operating)
    pub const INTEREST_AND_DIVIDEND_INCOME: &str = "InterestAndDividendIncomeOperating";

    /// Net interest income
    pub const NET_INTEREST_INCOME: &str = "InterestIncomeExpenseNet";

    /// Noninterest expense
    pub const NONINTEREST_EXPENSE: &str = "NoninterestExpense";

    /// Provision for loan losses
    pub const PROVISION_FOR_LOAN_LOSSES: &str = "ProvisionForLoanLeaseAndOtherLosses";

    /// Deposits
    pub const DEPOSITS: &str = "Deposits";
}

/// Cash Flow Statement concepts
pub mod cash_flow {
    /// Operating Cash Flows
    pub const OPERATING_CASH_FLOW: &str = "NetCashProvidedByUsedInOperatingActivities";

    /// Alternative: Operating Cash Flows from continuing operations
    pub const OPERATING_CASH_FLOW_CONTINUING: &str =
        "NetCashProvidedByUsedInOperatingActivitiesContinuingOperations";

    /// Capital Expenditures
    pub const CAPEX: &str = "PaymentsToAcquirePropertyPlantAndEquipment";

    /// Alternative: Capital Expenditures (productive assets)
    pub const CAPEX_PRODUCTIVE_ASSETS: &str = "PaymentsToAcquireProductiveAssets";

    /// Depreciation, Depletion and Amortization
    pub const DEPRECIATION_AND_AMORTIZATION: &str = "DepreciationDepletionAndAmortization";

    /// Alternative: Depreciation and Amortization
    pub const DEPRECIATION_AND_AMORTIZATION_ALT: &str = "DepreciationAndAmortization";

    /// Alternative: Depreciation, Amortization and Accretion
    pub const DEPRECIATION_AMORTIZATION_ACCRETION: &str = "DepreciationAmortizationAndAccretionNet";

    /// Share-based Compensation
    pub const STOCK_BASED_COMPENSATION: &str = "ShareBasedCompensation";

    /// Alternative: Allocated Share-based Compensation Expense
    pub const STOCK_BASED_COMPENSATION_ALT: &str = "AllocatedShareBasedCompensationExpense";

    /// Investing Cash Flows
    pub const INVESTING_CASH_FLOW: &str = "NetCashProvidedByUsedInInvestingActivities";

    /// Financing Cash Flows
    pub const FINANCING_CASH_FLOW: &str = "NetCashProvidedByUsedInFinancingActivities";

    /// Dividends paid to common stockholders
    pub const DIVIDENDS_PAID: &str = "PaymentsOfDividendsCommonStock";

    /// Alternative: Dividends paid
    pub const DIVIDENDS_PAID_ALT: &str = "PaymentsOfDividends";

    /// Share repurchases
    pub const SHARE_REPURCHASES: &str = "PaymentsForRepurchaseOfCommonStock";

    /// Net change in cash including restricted cash
    pub const NET_CHANGE_IN_CASH: &str =
        "CashCashEquivalentsRestrictedCashAndRestrictedCashEquivalentsPeriodIncreaseDecreaseIncludingExchangeRateEffect";

    /// Alternative: Net change in cash
    pub const NET_CHANGE_IN_CASH_ALT: &str = "CashAndCashEquivalentsPeriodIncreaseDecrease";
}

/// Per-Share concepts
pub mod per_share {
    /// Earnings Per Share - Basic
    pub const EPS_BASIC: &str = "EarningsPerShareBasic";

    /// Earnings Per Share - Diluted
    pub const EPS_DILUTED: &str = "EarningsPerShareDiluted";

    /// Alternative: Earnings Per Share - Basic and Diluted
    pub const EPS_BASIC_AND_DILUTED: &str = "EarningsPerShareBasicAndDiluted";

    /// Weighted Average Shares Outstanding - Basic
    pub const WEIGHTED_SHARES_BASIC: &str = "WeightedAverageNumberOfSharesOutstandingBasic";

    /// Weighted Average Shares Outstanding - Diluted
    pub const WEIGHTED_SHARES_DILUTED: &str = "WeightedAverageNumberOfDilutedSharesOutstanding";
}
