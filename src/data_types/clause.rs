
use itertools::izip;
use serde::Serialize;
use std::str::FromStr;

use crate::data_types::region::RegionSpec;
use crate::evaluator::errors::EvaluationError;

/// Delimiter between the parallel clause entries of a rule row
pub const CLAUSE_DELIMITER: char = ';';
/// Delimiter between the two alleles of a variant STATE
pub const STATE_DELIMITER: char = '|';

/// The TYPE of a clause
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, strum_macros::Display, strum_macros::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ClauseKind {
    /// Compares the genotype at a site against an expected allele pair
    Variant,
    /// Compares the most severe annotated impact in a region against an expected label
    Gene
}

/// One (TYPE, FEATURE, REGION, STATE) unit of a rule row
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Clause {
    kind: ClauseKind,
    /// Gene or variant name, only used for reporting
    feature: String,
    region: RegionSpec,
    expected_state: String
}

impl Clause {
    /// Constructor
    pub fn new(kind: ClauseKind, feature: String, region: RegionSpec, expected_state: String) -> Self {
        Self {
            kind, feature, region, expected_state
        }
    }

    /// Builds a clause from the raw text entries of a row.
    /// # Errors
    /// * `UnknownClauseKind` if TYPE is not "variant" or "gene"
    /// * `RegionFormat` if REGION does not parse
    pub fn from_text(kind: &str, feature: &str, region: &str, expected_state: &str) -> Result<Self, EvaluationError> {
        let kind = ClauseKind::from_str(kind)
            .map_err(|_| EvaluationError::UnknownClauseKind { text: kind.to_string() })?;
        let region = RegionSpec::parse(region)?;
        Ok(Self::new(kind, feature.to_string(), region, expected_state.to_string()))
    }

    /// Parses the STATE of a variant clause into its two expected alleles.
    /// # Errors
    /// * `InvalidStateFormat` if there is not exactly one '|' or either allele is empty
    pub fn expected_alleles(&self) -> Result<(&str, &str), EvaluationError> {
        let invalid = || EvaluationError::InvalidStateFormat { text: self.expected_state.clone() };
        let (allele1, allele2) = self.expected_state.split_once(STATE_DELIMITER).ok_or_else(invalid)?;
        if allele2.contains(STATE_DELIMITER) || allele1.is_empty() || allele2.is_empty() {
            return Err(invalid());
        }
        Ok((allele1, allele2))
    }

    // getters
    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn region(&self) -> &RegionSpec {
        &self.region
    }

    pub fn expected_state(&self) -> &str {
        &self.expected_state
    }
}

/// The first four text fields of a rule row; each is a ';'-delimited list with one entry per clause
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RuleFields {
    pub types: String,
    pub features: String,
    pub regions: String,
    pub states: String
}

impl RuleFields {
    /// Constructor
    pub fn new(types: &str, features: &str, regions: &str, states: &str) -> Self {
        Self {
            types: types.to_string(),
            features: features.to_string(),
            regions: regions.to_string(),
            states: states.to_string()
        }
    }

    /// Splits the four parallel lists and zips them into clauses.
    /// The lists must line up exactly, a length mismatch is an error rather than a silent truncation.
    /// # Errors
    /// * `ClauseCountMismatch` if the four lists have different lengths
    /// * any error from `Clause::from_text`
    pub fn clauses(&self) -> Result<Vec<Clause>, EvaluationError> {
        let types: Vec<&str> = self.types.split(CLAUSE_DELIMITER).collect();
        let features: Vec<&str> = self.features.split(CLAUSE_DELIMITER).collect();
        let regions: Vec<&str> = self.regions.split(CLAUSE_DELIMITER).collect();
        let states: Vec<&str> = self.states.split(CLAUSE_DELIMITER).collect();

        let count = types.len();
        if features.len() != count || regions.len() != count || states.len() != count {
            return Err(EvaluationError::ClauseCountMismatch {
                types: types.len(),
                features: features.len(),
                regions: regions.len(),
                states: states.len()
            });
        }

        izip!(types, features, regions, states)
            .map(|(t, f, r, s)| Clause::from_text(t, f, r, s))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_kind() {
        assert_eq!(ClauseKind::from_str("variant").unwrap(), ClauseKind::Variant);
        assert_eq!(ClauseKind::from_str("gene").unwrap(), ClauseKind::Gene);
        assert!(ClauseKind::from_str("Gene").is_err());
        assert_eq!(ClauseKind::Variant.to_string(), "variant");
    }

    #[test]
    fn test_from_text() {
        let clause = Clause::from_text("variant", "rs334", "chr11:5227002-5227002", "T|A").unwrap();
        assert_eq!(clause.kind(), ClauseKind::Variant);
        assert_eq!(clause.feature(), "rs334");
        assert_eq!(clause.region().to_string(), "chr11:5227002-5227002");
        assert_eq!(clause.expected_alleles().unwrap(), ("T", "A"));

        let error = Clause::from_text("exon", "BRCA1", "chr17:1-10", "HIGH").unwrap_err();
        assert_eq!(error, EvaluationError::UnknownClauseKind { text: "exon".to_string() });

        let error = Clause::from_text("gene", "BRCA1", "chr17-1-10", "HIGH").unwrap_err();
        assert!(matches!(error, EvaluationError::RegionFormat { .. }));
    }

    #[test]
    fn test_expected_alleles_invalid() {
        for state in ["A/G", "AG", "A|G|T", "|G", "A|", ""] {
            let clause = Clause::from_text("variant", "x", "chr1:1-1", state).unwrap();
            assert_eq!(clause.expected_alleles(), Err(EvaluationError::InvalidStateFormat { text: state.to_string() }));
        }
    }

    #[test]
    fn test_rule_fields() {
        let fields = RuleFields::new("variant;gene", "rs1;BRCA2", "chr1:10-10;chr13:100-200", "A|G;HIGH");
        let clauses = fields.clauses().unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].kind(), ClauseKind::Variant);
        assert_eq!(clauses[1].kind(), ClauseKind::Gene);
        assert_eq!(clauses[1].feature(), "BRCA2");
        assert_eq!(clauses[1].expected_state(), "HIGH");
    }

    #[test]
    fn test_rule_fields_mismatch() {
        let fields = RuleFields::new("variant;gene", "rs1;BRCA2", "chr1:10-10", "A|G;HIGH");
        assert_eq!(fields.clauses(), Err(EvaluationError::ClauseCountMismatch {
            types: 2, features: 2, regions: 1, states: 2
        }));
    }
}
