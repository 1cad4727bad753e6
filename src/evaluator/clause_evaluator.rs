
use log::{trace, warn};
use rustc_hash::FxHashSet as HashSet;
use serde::Serialize;

use crate::data_types::clause::{Clause, ClauseKind};
use crate::data_types::impact::ImpactRanking;
use crate::data_types::variant_record::VariantRecord;
use crate::evaluator::errors::{Advisory, EvaluationError};
use crate::sources::ReferenceSource;
use crate::util::sequence::clean_fetched_sequence;

/// The INFO key carrying functional annotations
pub const ANNOTATION_KEY: &str = "ANN";
/// Position of the impact label within a '|'-delimited annotation entry
pub const IMPACT_FIELD_INDEX: usize = 2;

/// What a clause decision was based on
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ClauseEvidence {
    /// Genotype decoded from the first overlapping record
    Genotype { variant: String, alleles: (String, String) },
    /// Nothing overlapped a variant clause, so the person is treated as homozygous reference
    Reference { alleles: (String, String) },
    /// Impact ranks of every annotated record in a gene clause
    Impact { ranks: Vec<u8>, expected_rank: u8 },
    /// Nothing overlapped a gene clause
    NoVariants
}

/// Result of evaluating one clause
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClauseOutcome {
    matched: bool,
    evidence: ClauseEvidence,
    /// Variants that were skipped while gathering evidence
    advisories: Vec<Advisory>
}

impl ClauseOutcome {
    pub fn new(matched: bool, evidence: ClauseEvidence, advisories: Vec<Advisory>) -> Self {
        Self {
            matched, evidence, advisories
        }
    }

    pub fn matched(&self) -> bool {
        self.matched
    }

    pub fn evidence(&self) -> &ClauseEvidence {
        &self.evidence
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }
}

/// Decides whether a single clause holds for the person.
/// Holds only read-only collaborators, so one evaluator can serve every row.
pub struct ClauseEvaluator<'a> {
    /// Fallback source of bases when a variant clause has no overlapping records
    reference: &'a dyn ReferenceSource,
    /// Severity table for gene clauses
    ranking: &'a ImpactRanking
}

impl<'a> ClauseEvaluator<'a> {
    /// Constructor
    pub fn new(reference: &'a dyn ReferenceSource, ranking: &'a ImpactRanking) -> Self {
        Self {
            reference, ranking
        }
    }

    /// Evaluates a clause against the records overlapping its region.
    /// # Arguments
    /// * `clause` - the clause to test
    /// * `variants` - every record overlapping the clause region, in index order
    /// # Errors
    /// * if a variant STATE is malformed
    /// * if any consulted record has the wrong shape or an undecodable genotype
    /// * if the reference fetch fails
    pub fn evaluate(&self, clause: &Clause, variants: &[VariantRecord]) -> Result<ClauseOutcome, EvaluationError> {
        match clause.kind() {
            ClauseKind::Variant => self.evaluate_variant(clause, variants),
            ClauseKind::Gene => self.evaluate_gene(clause, variants)
        }
    }

    /// Set comparison between the person's alleles and the expected STATE
    fn evaluate_variant(&self, clause: &Clause, variants: &[VariantRecord]) -> Result<ClauseOutcome, EvaluationError> {
        // parse first so a bad STATE fails regardless of what the data holds
        let (expected1, expected2) = clause.expected_alleles()?;

        let (alleles, evidence) = match variants.first() {
            Some(variant) => {
                variant.validate()?;
                let alleles = variant.genotype_alleles()?;
                trace!("\t{} => {alleles:?}", variant.description());
                (alleles.clone(), ClauseEvidence::Genotype { variant: variant.description(), alleles })
            },
            None => {
                let raw = self.reference.fetch(clause.region())
                    .map_err(|e| EvaluationError::ReferenceFetch {
                        region: clause.region().to_string(),
                        reason: e.to_string()
                    })?;
                let sequence = clean_fetched_sequence(&raw);
                trace!("\tno variants in {}, reference is {sequence:?}", clause.region());
                let alleles = (sequence.clone(), sequence);
                (alleles.clone(), ClauseEvidence::Reference { alleles })
            }
        };

        let observed: HashSet<&str> = [alleles.0.as_str(), alleles.1.as_str()].into_iter().collect();
        let expected: HashSet<&str> = [expected1, expected2].into_iter().collect();
        Ok(ClauseOutcome::new(observed == expected, evidence, vec![]))
    }

    /// Compares the most severe annotated impact in the region against the expected STATE
    fn evaluate_gene(&self, clause: &Clause, variants: &[VariantRecord]) -> Result<ClauseOutcome, EvaluationError> {
        if variants.is_empty() {
            return Ok(ClauseOutcome::new(false, ClauseEvidence::NoVariants, vec![]));
        }

        let mut ranks: Vec<u8> = vec![];
        let mut advisories: Vec<Advisory> = vec![];
        for variant in variants.iter() {
            variant.validate()?;
            match self.impact_rank(variant) {
                Ok(rank) => ranks.push(rank),
                Err(advisory) => {
                    warn!("Skipping evidence for {}: {advisory}", clause.feature());
                    advisories.push(advisory);
                }
            };
        }

        let expected_rank = self.ranking.expected_rank(clause.expected_state());
        let matched = self.ranking.meets_threshold(clause.expected_state(), &ranks);
        Ok(ClauseOutcome::new(matched, ClauseEvidence::Impact { ranks, expected_rank }, advisories))
    }

    /// Pulls the impact label from the first ANN entry and ranks it
    /// # Errors
    /// * an `Advisory` describing why the variant cannot contribute evidence
    fn impact_rank(&self, variant: &VariantRecord) -> Result<u8, Advisory> {
        let annotations = variant.info_value(ANNOTATION_KEY)
            .ok_or_else(|| Advisory::UnannotatedVariant { variant: variant.description() })?;

        // only the first annotation entry is consulted
        let first_annotation = annotations.split(',').next().unwrap_or_default();
        let label = first_annotation.split('|').nth(IMPACT_FIELD_INDEX)
            .ok_or_else(|| Advisory::MalformedAnnotation {
                variant: variant.description(),
                annotation: first_annotation.to_string()
            })?;

        self.ranking.rank(label)
            .ok_or_else(|| Advisory::UnrecognizedImpactLabel {
                variant: variant.description(),
                label: label.to_string()
            })
    }
}
