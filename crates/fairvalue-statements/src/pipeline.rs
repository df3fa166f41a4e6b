//! End-to-end reconstruction: builder → reconciler → quarterizer → Q4 → TTM.

use crate::builder::{Cadence, StatementBuilder};
use crate::config::ReconstructionConfig;
use crate::error::Result;
use crate::fiscal::infer_fiscal_year_end_month;
use crate::line_item::StatementKind;
use crate::q4::derive_q4;
use crate::quarterize::quarterize;
use crate::reconcile::reconcile;
use crate::record::{DataQualityWarning, FinancialStatements, StatementRecord, StatementSet};
use crate::tags::ConceptTable;
use crate::ttm::trailing_twelve_months;
use fairvalue_data::FactMap;
use tracing::{debug, info};

/// Reconstruct the income statement, balance sheet and cash-flow statement.
///
/// Fails only on invalid configuration; missing facts produce empty sets
/// or absent line items.
pub fn reconstruct(
    facts: &FactMap,
    config: &ReconstructionConfig,
    table: &ConceptTable,
) -> Result<FinancialStatements> {
    config.validate()?;

    let fye_month = config.fiscal_year_end_month.unwrap_or_else(|| {
        let anchors = StatementKind::ALL
            .iter()
            .flat_map(|kind| table.anchor_concepts(*kind))
            .flat_map(|concept| facts.entries(concept));
        let inferred = infer_fiscal_year_end_month(anchors);
        debug!(fiscal_year_end_month = inferred, "inferred fiscal year end");
        inferred
    });

    let builder = StatementBuilder::new(facts, table, fye_month);
    let statements = FinancialStatements {
        fiscal_year_end_month: fye_month,
        income: build_set(&builder, StatementKind::Income, fye_month, config),
        balance: build_set(&builder, StatementKind::Balance, fye_month, config),
        cash_flow: build_set(&builder, StatementKind::CashFlow, fye_month, config),
    };

    info!(
        entity = facts.entity_name.as_deref().unwrap_or("unknown"),
        fiscal_year_end_month = fye_month,
        income_annual = statements.income.annual.len(),
        income_quarterly = statements.income.quarterly.len(),
        balance_annual = statements.balance.annual.len(),
        cash_flow_annual = statements.cash_flow.annual.len(),
        warnings = statements.warnings().count(),
        "reconstructed statements"
    );

    Ok(statements)
}

/// Run the full pipeline for one statement kind.
pub fn build_set(
    builder: &StatementBuilder<'_>,
    kind: StatementKind,
    fye_month: u32,
    config: &ReconstructionConfig,
) -> StatementSet {
    let mut annual = reconcile(builder.build(kind, Cadence::Annual), fye_month);
    let mut quarterly = reconcile(builder.build(kind, Cadence::Quarterly), fye_month);

    if kind.is_flow() {
        quarterly = quarterize(quarterly);
    }

    let (derived, mut warnings) = derive_q4(&annual, &quarterly);
    quarterly.extend(derived);

    let ttm = if kind.is_flow() {
        trailing(&quarterly, &mut warnings)
    } else {
        None
    };

    finish(&mut annual, config.annual_limit);
    finish(&mut quarterly, config.quarterly_limit);

    StatementSet {
        kind,
        annual,
        quarterly,
        ttm,
        warnings,
    }
}

fn trailing(
    quarterly: &[StatementRecord],
    warnings: &mut Vec<DataQualityWarning>,
) -> Option<StatementRecord> {
    let (mut record, warning) = trailing_twelve_months(quarterly)?;
    record.refresh_derived();
    warnings.extend(warning);
    Some(record)
}

/// Fill derived items, order newest first and cap.
fn finish(records: &mut Vec<StatementRecord>, limit: usize) {
    for record in records.iter_mut() {
        record.refresh_derived();
    }
    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.fiscal_quarter.cmp(&a.fiscal_quarter))
    });
    records.truncate(limit);
}
