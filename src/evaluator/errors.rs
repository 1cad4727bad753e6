
/// Errors that stop the evaluation of a rule row; any one of these ends the whole run
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EvaluationError {
    #[error("REGION {text:?} is invalid ({reason}); REGION should be written as <chromosome>:<start_position>-<end_position> with 1 <= start_position <= end_position")]
    RegionFormat { text: String, reason: String },
    #[error("TYPE, FEATURE, REGION, and STATE must list the same number of ';'-delimited entries, found {types}, {features}, {regions}, and {states}")]
    ClauseCountMismatch { types: usize, features: usize, regions: usize, states: usize },
    #[error("VCF record has {columns} columns, expected CHROM, POS, ID, REF, ALT, QUAL, FILTER, INFO, FORMAT, and 1 sample: {record}")]
    IncompleteVcfRecord { columns: usize, record: String },
    #[error("multi-sample VCF records are not supported, found {samples} sample columns: {record}")]
    UnsupportedMultiSample { samples: usize, record: String },
    #[error("cannot determine genotype because FORMAT does not have a GT field: {record}")]
    MissingGenotypeField { record: String },
    #[error("GT value {gt:?} is malformed ({reason}), expected two allele indices separated by '/' or '|': {record}")]
    MalformedGenotype { gt: String, reason: String, record: String },
    #[error("variant STATE {text:?} is invalid; variant STATE should be written as <allele_1>|<allele_2>")]
    InvalidStateFormat { text: String },
    #[error("unknown TYPE {text:?}; TYPE should be \"variant\" or \"gene\"")]
    UnknownClauseKind { text: String },
    #[error("variant query for {region} failed: {reason}")]
    VariantQuery { region: String, reason: String },
    #[error("reference fetch for {region} failed: {reason}")]
    ReferenceFetch { region: String, reason: String }
}

/// Wraps an evaluation error with the row that produced it
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("input G2P row {row}: {source}")]
pub struct RowError {
    /// 0-based index of the data row in the rule table
    pub row: usize,
    /// The underlying failure
    pub source: EvaluationError
}

/// Advisories produced while gathering gene evidence; these never stop evaluation
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// The variant does not carry an ANN entry in INFO
    UnannotatedVariant { variant: String },
    /// The ANN entry was present but could not be split into an impact label
    MalformedAnnotation { variant: String, annotation: String },
    /// The impact label is not part of the ranking table
    UnrecognizedImpactLabel { variant: String, label: String }
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::UnannotatedVariant { variant } => write!(f, "variant {variant} is not annotated, INFO is missing ANN"),
            Advisory::MalformedAnnotation { variant, annotation } => write!(f, "variant {variant} has a malformed ANN entry: {annotation:?}"),
            Advisory::UnrecognizedImpactLabel { variant, label } => write!(f, "variant {variant} has an unrecognized impact label: {label:?}")
        }
    }
}
