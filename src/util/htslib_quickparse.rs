
use std::path::Path;

use crate::data_types::variant_record::FIXED_VCF_COLUMNS;
use crate::evaluator::errors::EvaluationError;

/// Gets a list of sample names from a given VCF file
/// # Arguments
/// * `filename` - the VCF file to load, plain or bgzipped; no index is required
/// # Errors
/// * if the filename fails to load as a VCF
/// * if the sample name fails to parse from utf8
pub fn get_vcf_samples(filename: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    use rust_htslib::bcf;
    use rust_htslib::bcf::Read;
    let vcf_reader: bcf::Reader = bcf::Reader::from_path(filename)?;
    let vcf_header: &bcf::header::HeaderView = vcf_reader.header();
    let mut sample_names = vec![];
    for sv in vcf_header.samples().iter() {
        let vcf_sample_string: String = std::str::from_utf8(sv)?.to_string();
        sample_names.push(vcf_sample_string);
    }
    Ok(sample_names)
}

/// Confirms a VCF header declares exactly one sample and returns that sample name
/// # Arguments
/// * `samples` - sample names from the header, see `get_vcf_samples`
/// * `filename` - the VCF the samples came from, only used for error messages
/// # Errors
/// * `IncompleteVcfRecord` if there are no samples (sites-only VCF)
/// * `UnsupportedMultiSample` if there is more than one sample
pub fn check_single_sample<'a>(samples: &'a [String], filename: &Path) -> Result<&'a str, EvaluationError> {
    match samples {
        [sample] => Ok(sample.as_str()),
        [] => Err(EvaluationError::IncompleteVcfRecord {
            columns: FIXED_VCF_COLUMNS,
            record: format!("VCF header of {filename:?} declares no samples")
        }),
        _ => Err(EvaluationError::UnsupportedMultiSample {
            samples: samples.len(),
            record: format!("VCF header of {filename:?}")
        })
    }
}
