
use clap::{Parser, Subcommand};
use chrono::Datelike;
use lazy_static::lazy_static;
use log::error;
use simple_error::{SimpleError, bail};
use std::path::Path;

use crate::cli::matching::MatchSettings;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.3.0-6bb9635-dirty` - while on a dirty branch
    /// * `0.3.0-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// Shared after help string containing the legalese.
    pub static ref AFTER_HELP: String = format!("Copyright (C) 2023-{}     g2pmatch contributors
This program comes with ABSOLUTELY NO WARRANTY; it is intended for
Research Use Only and not for use in diagnostic procedures.", chrono::Utc::now().year());
}

#[derive(Parser)]
#[clap(author, 
    version = &**FULL_VERSION, 
    about, 
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// g2pmatch, a tool for matching genotype-to-phenotype rules against one person's variant calls.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Keep the rules from a G2P table that match a person's VCF
    Match(Box<MatchSettings>),
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Verifies an input path is present on disk
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - names the input in the error, e.g. "--vcf"
/// # Errors
/// * if nothing exists at `filename`
pub fn verify_input_path(filename: &Path, label: &str) -> Result<(), SimpleError> {
    if filename.exists() {
        Ok(())
    } else {
        bail!("{label} does not exist: \"{}\"", filename.display())
    }
}

/// Exits with NOINPUT if a required input is missing
pub fn check_required_filename(filename: &Path, label: &str) {
    if let Err(e) = verify_input_path(filename, label) {
        error!("{e}");
        std::process::exit(exitcode::NOINPUT);
    }
}

/// Same as `check_required_filename`, but an absent option is fine
pub fn check_optional_filename(opt_filename: Option<&Path>, label: &str) {
    if let Some(filename) = opt_filename {
        check_required_filename(filename, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_verify_input_path() {
        assert!(verify_input_path(&PathBuf::from("test_data/input.g2p"), "--rules").is_ok());

        let err = verify_input_path(&PathBuf::from("test_data/no_such.vcf"), "--vcf").unwrap_err();
        assert_eq!(err.to_string(), "--vcf does not exist: \"test_data/no_such.vcf\"");
    }

    #[test]
    fn test_full_version() {
        assert!(FULL_VERSION.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(AFTER_HELP.contains("g2pmatch contributors"));
    }
}
