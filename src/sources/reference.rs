
use log::info;
use rust_htslib::faidx;
use rust_lib_reference_genome::reference_genome::ReferenceGenome;
use simple_error::bail;
use std::path::Path;

use crate::data_types::region::RegionSpec;
use crate::sources::ReferenceSource;
use crate::util::file_io::{fasta_index_exists, index_fasta};
use crate::util::sequence::clean_fetched_sequence;

/// Random access to an indexed FASTA, plain or bgzipped; only the requested bases are read
pub struct IndexedFastaReference {
    reader: faidx::Reader
}

impl IndexedFastaReference {
    /// Opens the FASTA, building the index first if it is missing
    /// # Errors
    /// * if indexing fails
    /// * if the FASTA cannot be opened
    pub fn from_path(filename: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !fasta_index_exists(filename) {
            info!("Indexing {filename:?}...");
            index_fasta(filename)?;
        }
        let reader = faidx::Reader::from_path(filename)?;
        Ok(Self {
            reader
        })
    }
}

impl ReferenceSource for IndexedFastaReference {
    fn fetch(&self, region: &RegionSpec) -> Result<String, Box<dyn std::error::Error>> {
        // faidx is 0-based with an inclusive end
        let begin = (region.start() - 1) as usize;
        let end = (region.end() - 1) as usize;
        let raw = self.reader.fetch_seq_string(region.chrom(), begin, end)?;
        let sequence = clean_fetched_sequence(&raw);
        if sequence.len() as u64 != region.len() {
            // htslib truncates at the contig end instead of failing
            bail!("expected {} bases but the reference returned {}", region.len(), sequence.len());
        }
        Ok(sequence)
    }
}

impl ReferenceSource for ReferenceGenome {
    fn fetch(&self, region: &RegionSpec) -> Result<String, Box<dyn std::error::Error>> {
        let chrom = region.chrom().to_string();
        if !self.contig_keys().contains(&chrom) {
            bail!("Reference genome does not contain contig {chrom:?}");
        }

        let (_chrom, start, end) = region.interval_query();
        let chrom_seq = self.get_full_chromosome(&chrom);
        if end as usize > chrom_seq.len() {
            bail!("{region} runs past the end of {chrom:?} ({} bp)", chrom_seq.len());
        }
        let raw = std::str::from_utf8(&chrom_seq[start as usize..end as usize])?;
        Ok(clean_fetched_sequence(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Utility that loads our tiny reference for us
    fn load_test_reference() -> ReferenceGenome {
        let ref_fn = PathBuf::from("test_data/test_reference.fa");
        ReferenceGenome::from_fasta(&ref_fn).unwrap()
    }

    /// Copies the tiny reference somewhere writable so the index can be built
    fn copy_test_reference(temp_dir: &tempfile::TempDir) -> PathBuf {
        let ref_fn = temp_dir.path().join("test_reference.fa");
        std::fs::copy("test_data/test_reference.fa", &ref_fn).unwrap();
        ref_fn
    }

    #[test]
    fn test_reference_genome_fetch() {
        let reference = load_test_reference();
        let region = RegionSpec::parse("chr1:5-8").unwrap();
        assert_eq!(reference.fetch(&region).unwrap(), "CCCC");
        let region = RegionSpec::parse("chr1:19-22").unwrap();
        assert_eq!(reference.fetch(&region).unwrap(), "GTAC");
        let region = RegionSpec::parse("chr2:1-7").unwrap();
        assert_eq!(reference.fetch(&region).unwrap(), "GATTACA");
    }

    #[test]
    fn test_reference_genome_errors() {
        let reference = load_test_reference();
        let region = RegionSpec::parse("chr3:1-1").unwrap();
        assert!(reference.fetch(&region).is_err());
        let region = RegionSpec::parse("chr2:10-15").unwrap();
        assert!(reference.fetch(&region).is_err());
    }

    #[test]
    fn test_indexed_fasta_fetch() {
        let temp_dir = tempfile::tempdir().unwrap();
        let ref_fn = copy_test_reference(&temp_dir);
        let reference = IndexedFastaReference::from_path(&ref_fn).unwrap();
        assert!(fasta_index_exists(&ref_fn));

        // crosses a line break in the FASTA
        let region = RegionSpec::parse("chr1:19-22").unwrap();
        assert_eq!(reference.fetch(&region).unwrap(), "GTAC");
        let region = RegionSpec::parse("chr1:44-44").unwrap();
        assert_eq!(reference.fetch(&region).unwrap(), "T");
    }

    #[test]
    fn test_indexed_fasta_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let ref_fn = copy_test_reference(&temp_dir);
        let reference = IndexedFastaReference::from_path(&ref_fn).unwrap();
        let region = RegionSpec::parse("chr3:1-1").unwrap();
        assert!(reference.fetch(&region).is_err());
        let region = RegionSpec::parse("chr2:10-15").unwrap();
        assert!(reference.fetch(&region).is_err());
    }
}
