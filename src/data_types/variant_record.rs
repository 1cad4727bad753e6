
use simple_error::{bail, SimpleError};

use crate::evaluator::errors::EvaluationError;

/// Number of fixed VCF columns: CHROM, POS, ID, REF, ALT, QUAL, FILTER, INFO, FORMAT
pub const FIXED_VCF_COLUMNS: usize = 9;
/// The only sample count we support
pub const SUPPORTED_SAMPLE_COLUMNS: usize = 1;

/// A single VCF data line, split into its columns.
/// Records are built from whatever the interval index hands back, so shape checks are deferred to `validate()`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VariantRecord {
    /// Chromosome string
    chrom: String,
    /// 1-based position
    position: u64,
    /// ID column, typically an rsID or "."
    id: String,
    /// Reference allele
    reference_allele: String,
    /// Ordered ALT alleles, split on ','
    alt_alleles: Vec<String>,
    /// QUAL column, left unparsed
    quality: String,
    /// FILTER column
    filter: String,
    /// INFO column, semicolon delimited key=value pairs
    info: String,
    /// FORMAT keys, split on ':'
    format_fields: Vec<String>,
    /// Each sample column, split on ':'
    sample_fields: Vec<Vec<String>>,
    /// Total number of tab-delimited columns on the line
    num_columns: usize
}

impl VariantRecord {
    /// Parses a tab-delimited VCF data line.
    /// Missing trailing columns are left empty, the column count is retained for `validate()`.
    /// # Arguments
    /// * `line` - a single VCF line without the trailing newline
    /// # Errors
    /// * if the line has fewer than two columns
    /// * if POS is not an integer
    pub fn from_vcf_line(line: &str) -> Result<VariantRecord, SimpleError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() < 2 {
            bail!("VCF line is missing CHROM and POS: {line:?}");
        }

        let column = |i: usize| columns.get(i).copied().unwrap_or_default();
        let position: u64 = match column(1).parse() {
            Ok(p) => p,
            Err(e) => bail!("Failed to parse POS {:?} as an integer: {e}", column(1))
        };

        let alt_alleles: Vec<String> = if column(4).is_empty() {
            vec![]
        } else {
            column(4).split(',').map(|s| s.to_string()).collect()
        };
        let format_fields: Vec<String> = if column(8).is_empty() {
            vec![]
        } else {
            column(8).split(':').map(|s| s.to_string()).collect()
        };
        let sample_fields: Vec<Vec<String>> = columns.iter()
            .skip(FIXED_VCF_COLUMNS)
            .map(|sample| sample.split(':').map(|s| s.to_string()).collect())
            .collect();

        Ok(VariantRecord {
            chrom: column(0).to_string(),
            position,
            id: column(2).to_string(),
            reference_allele: column(3).to_string(),
            alt_alleles,
            quality: column(5).to_string(),
            filter: column(6).to_string(),
            info: column(7).to_string(),
            format_fields,
            sample_fields,
            num_columns: columns.len()
        })
    }

    /// Checks that the record has the nine fixed columns and exactly one sample column.
    /// # Errors
    /// * `IncompleteVcfRecord` if there are fewer than ten columns
    /// * `UnsupportedMultiSample` if there is more than one sample column
    pub fn validate(&self) -> Result<(), EvaluationError> {
        let expected = FIXED_VCF_COLUMNS + SUPPORTED_SAMPLE_COLUMNS;
        if self.num_columns < expected {
            Err(EvaluationError::IncompleteVcfRecord {
                columns: self.num_columns,
                record: self.description()
            })
        } else if self.num_columns > expected {
            Err(EvaluationError::UnsupportedMultiSample {
                samples: self.num_columns - FIXED_VCF_COLUMNS,
                record: self.description()
            })
        } else {
            Ok(())
        }
    }

    /// All alleles for the site, reference first
    pub fn alleles(&self) -> Vec<&str> {
        std::iter::once(self.reference_allele.as_str())
            .chain(self.alt_alleles.iter().map(|a| a.as_str()))
            .collect()
    }

    /// Decodes the GT field of the single sample into the pair of alleles it selects.
    /// Phasing is accepted but not preserved, `0|1` and `0/1` decode identically.
    /// # Errors
    /// * `MissingGenotypeField` if FORMAT has no GT key
    /// * `MalformedGenotype` if GT is absent from the sample, is not exactly two indices, or an index is out of range
    pub fn genotype_alleles(&self) -> Result<(String, String), EvaluationError> {
        let gt_index: usize = self.format_fields.iter()
            .position(|f| f == "GT")
            .ok_or_else(|| EvaluationError::MissingGenotypeField { record: self.description() })?;

        let malformed = |gt: &str, reason: String| EvaluationError::MalformedGenotype {
            gt: gt.to_string(),
            reason,
            record: self.description()
        };

        let sample = self.sample_fields.first()
            .ok_or_else(|| malformed("", "no sample column".to_string()))?;
        let gt: &str = sample.get(gt_index)
            .ok_or_else(|| malformed("", "sample column is shorter than FORMAT".to_string()))?;

        let alleles = self.alleles();
        let indices: Vec<usize> = gt.split(['/', '|'])
            .map(|v| v.parse::<usize>().map_err(|_| malformed(gt, format!("{v:?} is not an allele index"))))
            .collect::<Result<Vec<usize>, EvaluationError>>()?;
        if indices.len() != 2 {
            return Err(malformed(gt, format!("found {} allele indices", indices.len())));
        }

        let lookup = |i: usize| -> Result<String, EvaluationError> {
            alleles.get(i)
                .map(|a| a.to_string())
                .ok_or_else(|| malformed(gt, format!("allele index {i} is out of range for {} alleles", alleles.len())))
        };
        let first = lookup(indices[0])?;
        let second = lookup(indices[1])?;
        Ok((first, second))
    }

    /// Looks up a raw INFO value by key; flags and missing keys return None
    pub fn info_value(&self, key: &str) -> Option<&str> {
        self.info.split(';')
            .find_map(|entry| {
                entry.split_once('=')
                    .filter(|(k, _v)| *k == key)
                    .map(|(_k, v)| v)
            })
    }

    /// Short user-facing label, e.g. `chr1:100 A>G,T`
    pub fn description(&self) -> String {
        format!("{}:{} {}>{}", self.chrom, self.position, self.reference_allele, self.alt_alleles.join(","))
    }

    // getters
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn reference_allele(&self) -> &str {
        &self.reference_allele
    }

    pub fn alt_alleles(&self) -> &[String] {
        &self.alt_alleles
    }

    pub fn quality(&self) -> &str {
        &self.quality
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn format_fields(&self) -> &[String] {
        &self.format_fields
    }

    pub fn sample_fields(&self) -> &[Vec<String>] {
        &self.sample_fields
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// 0-based, half-open span this record covers, matching how tabix indexes VCF records.
    /// An INFO `END` (gVCF blocks, symbolic SVs) takes precedence over the REF length when it parses and does not precede POS.
    pub fn reference_span(&self) -> (u64, u64) {
        let start = self.position.saturating_sub(1);
        let ref_end = start + (self.reference_allele.len() as u64).max(1);
        let end = self.info_value("END")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&info_end| info_end > start)
            .unwrap_or(ref_end);
        (start, end)
    }
}
