
use log::{debug, info};

use crate::data_types::g2p_table::G2pTable;
use crate::data_types::match_report::MatchReport;
use crate::evaluator::errors::RowError;
use crate::evaluator::rule_evaluator::RuleEvaluator;

/// Everything produced by a matching run
#[derive(Debug)]
pub struct MatchResults {
    /// The input table, reduced to the matching rows
    pub table: G2pTable,
    /// Per-row, per-clause details
    pub report: MatchReport
}

/// This is the main function to match every rule in a table against the person.
/// Rows are evaluated in order and the first broken row stops the run, there is no partial output.
/// # Arguments
/// * `table` - the loaded rule table
/// * `rule_evaluator` - evaluator wired to the person's variants and the reference
/// # Errors
/// * if any row is malformed or touches malformed variant data
pub fn match_rules(table: &G2pTable, rule_evaluator: &mut RuleEvaluator) -> Result<MatchResults, RowError> {
    let mut report = MatchReport::new();
    for (row, fields) in table.rule_fields().enumerate() {
        debug!("Matching G2P row {row}...");
        let outcome = rule_evaluator.evaluate_row(row, &fields)?;
        debug!("Row {row} => {}", outcome.matched());
        report.push(outcome);
    }

    let matched = report.matched_indices();
    info!("Matched {} of {} rules.", matched.len(), table.len());
    let advisory_count = report.advisory_count();
    if advisory_count > 0 {
        info!("{advisory_count} variants were skipped as gene evidence, see warnings for details.");
    }

    Ok(MatchResults {
        table: table.subset(&matched),
        report
    })
}
