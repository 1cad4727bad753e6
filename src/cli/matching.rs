
use clap::Args;
use log::{info, warn};
use simple_error::bail;
use std::path::{Path, PathBuf};

use crate::cli::core::{AFTER_HELP, check_optional_filename, check_required_filename};

#[derive(Args, Clone, Default)]
#[clap(author, about, 
    after_help = &**AFTER_HELP)]
pub struct MatchSettings {
    /// Input G2P rule table (TSV)
    #[clap(required = true)]
    #[clap(short = 'g')]
    #[clap(long = "rules")]
    #[clap(value_name = "G2P")]
    #[clap(help_heading = Some("Input/Output"))]
    pub rules_filename: PathBuf,

    /// Input single-sample variant file in VCF format; bgzipped with a tabix index is preferred
    #[clap(required = true)]
    #[clap(short = 'c')]
    #[clap(long = "vcf")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub vcf_filename: PathBuf,

    /// Reference FASTA file, indexed automatically if needed
    #[clap(required = true)]
    #[clap(short = 'r')]
    #[clap(long = "reference")]
    #[clap(value_name = "FASTA")]
    #[clap(help_heading = Some("Input/Output"))]
    pub reference_filename: PathBuf,

    /// Output G2P rule table containing only the matching rows
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "G2P")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_filename: PathBuf,

    /// Optional output report with every clause decision (JSON)
    #[clap(long = "output-report")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Input/Output"))]
    pub report_filename: Option<PathBuf>,

    /// Optional impact ranking table overriding HIGH > MODERATE > LOW > MODIFIER (JSON)
    #[clap(long = "impact-ranking")]
    #[clap(value_name = "JSON")]
    #[clap(help_heading = Some("Matching"))]
    pub impact_ranking: Option<PathBuf>,

    /// Loads the full reference into memory instead of reading regions from the index
    #[clap(long = "preload-reference")]
    #[clap(help_heading = Some("Matching"))]
    pub preload_reference: bool,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

/// Returns true if a tabix or CSI index sits next to the VCF
pub fn has_vcf_index(vcf_filename: &Path) -> bool {
    ["tbi", "csi"].iter().any(|suffix| {
        let mut os_string = vcf_filename.as_os_str().to_os_string();
        os_string.push(format!(".{suffix}"));
        PathBuf::from(os_string).exists()
    })
}

pub fn check_match_settings(settings: MatchSettings) -> Result<MatchSettings, Box<dyn std::error::Error>> {
    info!("Inputs:");

    // check for all the required input files
    check_required_filename(&settings.rules_filename, "G2P rule table");
    check_required_filename(&settings.vcf_filename, "VCF file");
    check_required_filename(&settings.reference_filename, "Reference FASTA");
    check_optional_filename(settings.impact_ranking.as_deref(), "Impact ranking JSON");

    // dump stuff to the logger
    info!("\tRules: {:?}", settings.rules_filename);
    info!("\tVCF: {:?}", settings.vcf_filename);
    if !has_vcf_index(&settings.vcf_filename) {
        warn!("\tVCF: No tabix index found, all records will be loaded into memory");
    }
    info!("\tReference: {:?}", settings.reference_filename);
    if let Some(ranking_fn) = settings.impact_ranking.as_ref() {
        info!("\tImpact ranking: {ranking_fn:?}");
    }

    // outputs
    info!("Outputs:");
    if settings.output_filename == settings.rules_filename {
        bail!("--output cannot overwrite the input rule table");
    }
    info!("\tMatched rules: {:?}", settings.output_filename);
    if let Some(filename) = settings.report_filename.as_ref() {
        info!("\tReport: {filename:?}");
    }

    info!("Matching settings:");
    info!("\tPreload reference: {}", if settings.preload_reference { "ENABLED" } else { "DISABLED" });

    Ok(settings)
}
