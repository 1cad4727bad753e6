
use log::{debug, trace};
use serde::Serialize;

use crate::data_types::clause::{Clause, RuleFields};
use crate::evaluator::clause_evaluator::{ClauseEvaluator, ClauseOutcome};
use crate::evaluator::errors::{EvaluationError, RowError};
use crate::sources::VariantSource;

/// A clause paired with how it was decided
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClauseReport {
    clause: Clause,
    outcome: ClauseOutcome
}

impl ClauseReport {
    pub fn clause(&self) -> &Clause {
        &self.clause
    }

    pub fn outcome(&self) -> &ClauseOutcome {
        &self.outcome
    }
}

/// The verdict for a single rule row
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowOutcome {
    /// 0-based index of the data row
    row: usize,
    /// True if every clause matched
    matched: bool,
    clauses: Vec<ClauseReport>
}

impl RowOutcome {
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn matched(&self) -> bool {
        self.matched
    }

    pub fn clauses(&self) -> &[ClauseReport] {
        &self.clauses
    }
}

/// Evaluates whole rule rows: splits the clause lists, gathers variants per clause, and ANDs the results
pub struct RuleEvaluator<'a> {
    /// Interval index over the person's variant calls
    variant_source: &'a mut dyn VariantSource,
    clause_evaluator: ClauseEvaluator<'a>
}

impl<'a> RuleEvaluator<'a> {
    /// Constructor
    pub fn new(variant_source: &'a mut dyn VariantSource, clause_evaluator: ClauseEvaluator<'a>) -> Self {
        Self {
            variant_source, clause_evaluator
        }
    }

    /// Evaluates every clause of a row; the row matches only if all of them do.
    /// Clauses are all evaluated even after a miss so the report is complete.
    /// # Arguments
    /// * `row` - the 0-based row index, used for error reporting
    /// * `fields` - the TYPE, FEATURE, REGION, and STATE text of the row
    /// # Errors
    /// * any structural problem with the row or the variants it touches, tagged with the row index
    pub fn evaluate_row(&mut self, row: usize, fields: &RuleFields) -> Result<RowOutcome, RowError> {
        self.evaluate_clauses(fields)
            .map(|clauses| {
                let matched = clauses.iter().all(|c| c.outcome.matched());
                RowOutcome { row, matched, clauses }
            })
            .map_err(|source| RowError { row, source })
    }

    /// Does the work for `evaluate_row()`, without the row tagging
    fn evaluate_clauses(&mut self, fields: &RuleFields) -> Result<Vec<ClauseReport>, EvaluationError> {
        let clauses: Vec<Clause> = fields.clauses()?;
        let mut reports: Vec<ClauseReport> = Vec::with_capacity(clauses.len());
        for clause in clauses.into_iter() {
            let variants = self.variant_source.query(clause.region())
                .map_err(|e| EvaluationError::VariantQuery {
                    region: clause.region().to_string(),
                    reason: e.to_string()
                })?;
            trace!("\t{} {} {}: {} overlapping records", clause.kind(), clause.feature(), clause.region(), variants.len());

            let outcome = self.clause_evaluator.evaluate(&clause, &variants)?;
            debug!("\t{} {} {} {:?} => {}", clause.kind(), clause.feature(), clause.region(), clause.expected_state(), outcome.matched());
            reports.push(ClauseReport { clause, outcome });
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_lib_reference_genome::reference_genome::ReferenceGenome;
    use std::path::PathBuf;

    use crate::data_types::impact::ImpactRanking;
    use crate::data_types::region::RegionSpec;
    use crate::data_types::variant_record::VariantRecord;
    use crate::sources::memory_source::InMemoryVariantSource;

    fn load_test_reference() -> ReferenceGenome {
        let ref_fn = PathBuf::from("test_data/test_reference.fa");
        ReferenceGenome::from_fasta(&ref_fn).unwrap()
    }

    fn load_test_variants() -> InMemoryVariantSource {
        InMemoryVariantSource::from_path(&PathBuf::from("test_data/single_sample.vcf")).unwrap()
    }

    /// Evaluates one row against the shared test data
    fn evaluate(fields: RuleFields) -> Result<RowOutcome, RowError> {
        let reference = load_test_reference();
        let ranking = ImpactRanking::default();
        let mut variants = load_test_variants();
        let mut evaluator = RuleEvaluator::new(&mut variants, ClauseEvaluator::new(&reference, &ranking));
        evaluator.evaluate_row(7, &fields)
    }

    #[test]
    fn test_single_variant_clause() {
        // chr1:5 is C>T with 0/1
        let outcome = evaluate(RuleFields::new("variant", "rs5", "chr1:5-5", "T|C")).unwrap();
        assert!(outcome.matched());
        assert_eq!(outcome.row(), 7);
        assert_eq!(outcome.clauses().len(), 1);

        // chr1:10 is G>A,C with 1|2
        let outcome = evaluate(RuleFields::new("variant", "rs10", "chr1:10-10", "C|A")).unwrap();
        assert!(outcome.matched());
        let outcome = evaluate(RuleFields::new("variant", "rs10", "chr1:10-10", "G|A")).unwrap();
        assert!(!outcome.matched());
    }

    #[test]
    fn test_reference_fallback() {
        // no records at chr1:17-20, reference is ACGT
        let outcome = evaluate(RuleFields::new("variant", "x", "chr1:17-20", "ACGT|ACGT")).unwrap();
        assert!(outcome.matched());
        let outcome = evaluate(RuleFields::new("variant", "x", "chr1:17-20", "ACGT|ACGA")).unwrap();
        assert!(!outcome.matched());
    }

    #[test]
    fn test_and_semantics() {
        // variant clause true; GENE2 only has LOW and an unrecognized label, so HIGH is false
        let outcome = evaluate(RuleFields::new("variant;gene", "rs5;GENE2", "chr1:5-5;chr1:33-44", "C|T;HIGH")).unwrap();
        assert!(!outcome.matched());
        assert!(outcome.clauses()[0].outcome().matched());
        assert!(!outcome.clauses()[1].outcome().matched());
        assert_eq!(outcome.clauses()[1].outcome().advisories().len(), 1);

        // both true, rs10 carries a HIGH first annotation
        let outcome = evaluate(RuleFields::new("variant;gene", "rs5;GENE1", "chr1:5-5;chr1:1-12", "C|T;HIGH")).unwrap();
        assert!(outcome.matched());
        assert!(outcome.clauses().iter().all(|c| c.outcome().matched()));

        // gene true, variant false
        let outcome = evaluate(RuleFields::new("variant;gene", "rs5;GENE1", "chr1:5-5;chr1:1-12", "T|T;MODERATE")).unwrap();
        assert!(!outcome.matched());
        assert!(outcome.clauses()[1].outcome().matched());
    }

    #[test]
    fn test_gene_unannotated_region() {
        // chr1:30 only has an unannotated record
        let outcome = evaluate(RuleFields::new("gene", "GENE3", "chr1:28-32", "MODIFIER")).unwrap();
        assert!(!outcome.matched());
    }

    #[test]
    fn test_row_errors() {
        let error = evaluate(RuleFields::new("variant;gene", "rs5", "chr1:5-5", "C|T")).unwrap_err();
        assert_eq!(error.row, 7);
        assert!(matches!(error.source, EvaluationError::ClauseCountMismatch { types: 2, features: 1, regions: 1, states: 1 }));

        let error = evaluate(RuleFields::new("exon", "rs5", "chr1:5-5", "C|T")).unwrap_err();
        assert_eq!(error.source, EvaluationError::UnknownClauseKind { text: "exon".to_string() });

        let error = evaluate(RuleFields::new("variant", "rs5", "chr1:5-5", "C,T")).unwrap_err();
        assert_eq!(error.source, EvaluationError::InvalidStateFormat { text: "C,T".to_string() });

        let error = evaluate(RuleFields::new("variant", "rs5", "chr1:9-5", "C|T")).unwrap_err();
        assert!(matches!(error.source, EvaluationError::RegionFormat { .. }));
        assert!(error.to_string().starts_with("input G2P row 7: "));
    }

    /// Fails every query, standing in for a broken index
    struct BrokenSource;

    impl VariantSource for BrokenSource {
        fn query(&mut self, _region: &RegionSpec) -> Result<Vec<VariantRecord>, Box<dyn std::error::Error>> {
            Err("index is corrupt".into())
        }
    }

    #[test]
    fn test_query_failure() {
        let reference = load_test_reference();
        let ranking = ImpactRanking::default();
        let mut variants = BrokenSource;
        let mut evaluator = RuleEvaluator::new(&mut variants, ClauseEvaluator::new(&reference, &ranking));
        let error = evaluator.evaluate_row(0, &RuleFields::new("gene", "GENE1", "chr1:1-10", "HIGH")).unwrap_err();
        assert_eq!(error.source, EvaluationError::VariantQuery {
            region: "chr1:1-10".to_string(),
            reason: "index is corrupt".to_string()
        });
    }

    #[test]
    fn test_multi_sample_aborts() {
        let reference = load_test_reference();
        let ranking = ImpactRanking::default();
        let mut variants = InMemoryVariantSource::from_path(&PathBuf::from("test_data/multi_sample.vcf")).unwrap();
        let mut evaluator = RuleEvaluator::new(&mut variants, ClauseEvaluator::new(&reference, &ranking));
        let error = evaluator.evaluate_row(0, &RuleFields::new("variant", "rs5", "chr1:5-5", "C|T")).unwrap_err();
        assert!(matches!(error.source, EvaluationError::UnsupportedMultiSample { samples: 2, .. }));
    }
}
