
use log::{debug, trace};
use rust_htslib::tbx;
use rust_htslib::tbx::Read;
use std::path::Path;

use crate::data_types::region::RegionSpec;
use crate::data_types::variant_record::VariantRecord;
use crate::sources::VariantSource;

/// Variant source over a bgzipped VCF with a tabix index next to it
pub struct TabixVariantSource {
    reader: tbx::Reader
}

impl TabixVariantSource {
    /// Opens the VCF and its index
    /// # Errors
    /// * if the file or its index cannot be opened
    pub fn from_path(filename: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let reader = tbx::Reader::from_path(filename)?;
        Ok(Self {
            reader
        })
    }
}

impl VariantSource for TabixVariantSource {
    fn query(&mut self, region: &RegionSpec) -> Result<Vec<VariantRecord>, Box<dyn std::error::Error>> {
        let (chrom, start, end) = region.interval_query();
        // tabix only indexes contigs that have records, so an unknown contig just has no variants
        let tid: u64 = match self.reader.tid(chrom) {
            Ok(tid) => tid,
            Err(e) => {
                debug!("Contig {chrom:?} is not in the tabix index ({e}), no variants for {region}");
                return Ok(vec![]);
            }
        };

        self.reader.fetch(tid, start, end)?;
        let mut records: Vec<VariantRecord> = vec![];
        for line_result in self.reader.records() {
            let line: Vec<u8> = line_result?;
            let text: &str = std::str::from_utf8(&line)?;
            trace!("\t{text}");
            records.push(VariantRecord::from_vcf_line(text)?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    /// Copies the plain test VCF into a bgzipped, tabix-indexed file
    fn build_indexed_vcf(temp_dir: &tempfile::TempDir) -> PathBuf {
        let vcf_text = std::fs::read("test_data/single_sample.vcf").unwrap();
        let vcf_gz = temp_dir.path().join("single_sample.vcf.gz");
        {
            let mut writer = rust_htslib::bgzf::Writer::from_path(&vcf_gz).unwrap();
            writer.write_all(&vcf_text).unwrap();
            writer.flush().unwrap();
        }
        rust_htslib::bcf::index::build(&vcf_gz, None, 1, rust_htslib::bcf::index::Type::Tbx).unwrap();
        vcf_gz
    }

    #[test]
    fn test_tabix_query() {
        let temp_dir = tempfile::tempdir().unwrap();
        let vcf_gz = build_indexed_vcf(&temp_dir);
        let mut source = TabixVariantSource::from_path(&vcf_gz).unwrap();

        let region = RegionSpec::parse("chr1:10-10").unwrap();
        let hits = source.query(&region).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].alleles(), vec!["G", "A", "C"]);

        let region = RegionSpec::parse("chr1:1-36").unwrap();
        let positions: Vec<u64> = source.query(&region).unwrap().iter().map(|r| r.position()).collect();
        assert_eq!(positions, vec![5, 10, 30, 35]);

        let region = RegionSpec::parse("chr1:11-29").unwrap();
        assert!(source.query(&region).unwrap().is_empty());

        // chr2 has no records, so it is absent from the index
        let region = RegionSpec::parse("chr2:1-5").unwrap();
        assert!(source.query(&region).unwrap().is_empty());
    }
}
