use log::{LevelFilter, error, info, warn};
use rust_lib_reference_genome::reference_genome::ReferenceGenome;

use g2pmatch::cli::core::{Commands, get_cli};
use g2pmatch::cli::matching::{MatchSettings, check_match_settings, has_vcf_index};
use g2pmatch::data_types::g2p_table::G2pTable;
use g2pmatch::data_types::impact::ImpactRanking;
use g2pmatch::evaluator::clause_evaluator::ClauseEvaluator;
use g2pmatch::evaluator::rule_evaluator::RuleEvaluator;
use g2pmatch::matcher::MatchResults;
use g2pmatch::sources::{ReferenceSource, VariantSource};
use g2pmatch::sources::memory_source::InMemoryVariantSource;
use g2pmatch::sources::reference::IndexedFastaReference;
use g2pmatch::sources::tabix_source::TabixVariantSource;
use g2pmatch::util::file_io::{load_json, save_json};
use g2pmatch::util::htslib_quickparse::{check_single_sample, get_vcf_samples};

/// This will run the "match" mode of the tool
/// # Arguments
/// * `settings` - the MatchSettings object
fn run_match(settings: MatchSettings) {
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };

    // immediately setup logging first
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    // okay, now we can check all the other settings
    let cli_settings: MatchSettings = match check_match_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while processing CLI settings: {e}");
            std::process::exit(exitcode::USAGE);
        }
    };

    // the ranking is either the standard one or user provided
    let ranking: ImpactRanking = if let Some(ranking_fn) = cli_settings.impact_ranking.as_ref() {
        match load_json(ranking_fn) {
            Ok(r) => r,
            Err(e) => {
                error!("Error while loading impact ranking: {e}");
                std::process::exit(exitcode::IOERR);
            }
        }
    } else {
        ImpactRanking::default()
    };
    info!("Impact ranking: {:?} (default threshold {})", ranking.ranks(), ranking.default_threshold());

    // load the rules
    info!("Loading G2P rules from {:?}...", cli_settings.rules_filename);
    let table: G2pTable = match G2pTable::from_path(&cli_settings.rules_filename) {
        Ok(t) => t,
        Err(e) => {
            error!("Error while loading G2P rule table: {e}");
            std::process::exit(exitcode::DATAERR);
        }
    };
    info!("Loaded {} rules.", table.len());

    // we only support one person per VCF, reject anything else before doing any work
    match get_vcf_samples(&cli_settings.vcf_filename) {
        Ok(samples) => {
            match check_single_sample(&samples, &cli_settings.vcf_filename) {
                Ok(sample) => info!("Sample: {sample}"),
                Err(e) => {
                    error!("Error while checking VCF samples: {e}");
                    std::process::exit(exitcode::DATAERR);
                }
            };
        },
        Err(e) => {
            error!("Error while reading VCF header: {e}");
            std::process::exit(exitcode::IOERR);
        }
    };

    // open the variant calls
    let variant_result: Result<Box<dyn VariantSource>, Box<dyn std::error::Error>> = if has_vcf_index(&cli_settings.vcf_filename) {
        info!("Opening indexed VCF {:?}...", cli_settings.vcf_filename);
        TabixVariantSource::from_path(&cli_settings.vcf_filename)
            .map(|s| Box::new(s) as Box<dyn VariantSource>)
    } else {
        info!("Loading VCF {:?} into memory...", cli_settings.vcf_filename);
        InMemoryVariantSource::from_path(&cli_settings.vcf_filename)
            .map(|s| Box::new(s) as Box<dyn VariantSource>)
    };
    let mut variant_source: Box<dyn VariantSource> = match variant_result {
        Ok(vs) => vs,
        Err(e) => {
            error!("Error while opening VCF file: {e}");
            std::process::exit(exitcode::IOERR);
        }
    };

    // open the reference, either fully loaded or via the index
    let reference_result: Result<Box<dyn ReferenceSource>, Box<dyn std::error::Error>> = if cli_settings.preload_reference {
        info!("Loading reference genome from {:?}...", cli_settings.reference_filename);
        ReferenceGenome::from_fasta(&cli_settings.reference_filename)
            .map(|rg| Box::new(rg) as Box<dyn ReferenceSource>)
            .map_err(|e| e.into())
    } else {
        info!("Opening indexed reference {:?}...", cli_settings.reference_filename);
        IndexedFastaReference::from_path(&cli_settings.reference_filename)
            .map(|r| Box::new(r) as Box<dyn ReferenceSource>)
    };
    let reference: Box<dyn ReferenceSource> = match reference_result {
        Ok(r) => r,
        Err(e) => {
            error!("Error while loading reference genome file: {e}");
            std::process::exit(exitcode::IOERR);
        }
    };

    // all the work
    let clause_evaluator = ClauseEvaluator::new(&*reference, &ranking);
    let mut rule_evaluator = RuleEvaluator::new(&mut *variant_source, clause_evaluator);
    let results: MatchResults = match g2pmatch::matcher::match_rules(&table, &mut rule_evaluator) {
        Ok(r) => r,
        Err(e) => {
            error!("Error while matching G2P rules: {e}");
            std::process::exit(exitcode::DATAERR);
        }
    };
    if results.report.advisory_count() > 0 {
        warn!("{} advisories were raised, see the report for details.", results.report.advisory_count());
    }

    info!("Saving matched rules to {:?}", cli_settings.output_filename);
    if let Err(e) = results.table.save(&cli_settings.output_filename) {
        error!("Error while writing matched rules to file: {e}");
        std::process::exit(exitcode::IOERR);
    }

    if let Some(filename) = cli_settings.report_filename.as_ref() {
        info!("Saving match report to {:?}", filename);
        match save_json(&results.report, filename) {
            Ok(()) => {},
            Err(e) => {
                error!("Error while writing match report to file: {e}");
                std::process::exit(exitcode::IOERR);
            }
        };
    }
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Match(settings) => {
            run_match(*settings);
        }
    }

    info!("Process finished successfully.");
}
