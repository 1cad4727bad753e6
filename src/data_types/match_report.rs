
use serde::Serialize;

use crate::evaluator::rule_evaluator::RowOutcome;

/// Intended to be serialized to JSON as an audit trail of every decision
#[derive(Debug, Serialize)]
pub struct MatchReport {
    /// Version of the tool that generated the report
    g2pmatch_version: String,
    /// Number of rows evaluated
    total_rows: usize,
    /// Number of rows retained
    matched_rows: usize,
    /// Per-row verdicts in table order
    rows: Vec<RowOutcome>
}

impl MatchReport {
    /// Basic constructor
    pub fn new() -> MatchReport {
        MatchReport {
            g2pmatch_version: crate::cli::core::FULL_VERSION.to_string(),
            total_rows: 0,
            matched_rows: 0,
            rows: vec![]
        }
    }

    /// Records the outcome of the next row
    pub fn push(&mut self, outcome: RowOutcome) {
        self.total_rows += 1;
        if outcome.matched() {
            self.matched_rows += 1;
        }
        self.rows.push(outcome);
    }

    /// Indices of the rows that matched, in table order
    pub fn matched_indices(&self) -> Vec<usize> {
        self.rows.iter()
            .filter(|r| r.matched())
            .map(|r| r.row())
            .collect()
    }

    /// Total number of advisories across every clause
    pub fn advisory_count(&self) -> usize {
        self.rows.iter()
            .flat_map(|r| r.clauses().iter())
            .map(|c| c.outcome().advisories().len())
            .sum()
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn matched_rows(&self) -> usize {
        self.matched_rows
    }

    pub fn rows(&self) -> &[RowOutcome] {
        &self.rows
    }
}

impl Default for MatchReport {
    fn default() -> Self {
        Self::new()
    }
}
