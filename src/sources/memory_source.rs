
use log::debug;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::data_types::region::RegionSpec;
use crate::data_types::variant_record::VariantRecord;
use crate::sources::VariantSource;
use crate::util::file_io::open_maybe_gzip;

/// Holds every record of a VCF in file order; useful for small or unindexed inputs
#[derive(Clone, Debug, Default)]
pub struct InMemoryVariantSource {
    records: Vec<VariantRecord>
}

impl InMemoryVariantSource {
    /// Constructor from already parsed records, order is preserved
    pub fn new(records: Vec<VariantRecord>) -> Self {
        Self {
            records
        }
    }

    /// Loads all data lines from a VCF, plain or gzipped
    /// # Errors
    /// * if the file cannot be read
    /// * if any data line fails to parse
    pub fn from_path(filename: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let reader = BufReader::new(open_maybe_gzip(filename)?);
        let mut records: Vec<VariantRecord> = vec![];
        for line in reader.lines() {
            let line = line?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            records.push(VariantRecord::from_vcf_line(&line)?);
        }
        debug!("Loaded {} records from {filename:?}", records.len());
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[VariantRecord] {
        &self.records
    }
}

impl VariantSource for InMemoryVariantSource {
    fn query(&mut self, region: &RegionSpec) -> Result<Vec<VariantRecord>, Box<dyn std::error::Error>> {
        // tabix VCF overlap rule, the record covers its REF allele or up to INFO END
        let (chrom, start, end) = region.interval_query();
        Ok(self.records.iter()
            .filter(|r| {
                let (rec_start, rec_end) = r.reference_span();
                r.chrom() == chrom && rec_start < end && rec_end > start
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn load_test_source() -> InMemoryVariantSource {
        InMemoryVariantSource::from_path(&PathBuf::from("test_data/single_sample.vcf")).unwrap()
    }

    #[test]
    fn test_from_path() {
        let source = load_test_source();
        assert_eq!(source.records().len(), 5);
        assert_eq!(source.records()[1].id(), "rs10");
    }

    #[test]
    fn test_query() {
        let mut source = load_test_source();

        let region = RegionSpec::parse("chr1:5-5").unwrap();
        let hits = source.query(&region).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position(), 5);

        // file order is preserved
        let region = RegionSpec::parse("chr1:1-36").unwrap();
        let positions: Vec<u64> = source.query(&region).unwrap().iter().map(|r| r.position()).collect();
        assert_eq!(positions, vec![5, 10, 30, 35]);

        let region = RegionSpec::parse("chr1:6-9").unwrap();
        assert!(source.query(&region).unwrap().is_empty());

        let region = RegionSpec::parse("chr2:1-14").unwrap();
        assert!(source.query(&region).unwrap().is_empty());
    }

    #[test]
    fn test_query_deletion_span() {
        // a deletion starting before the region still overlaps it
        let record = VariantRecord::from_vcf_line("chr1\t3\t.\tAACC\tA\t.\tPASS\t.\tGT\t0/1").unwrap();
        let mut source = InMemoryVariantSource::new(vec![record]);
        let region = RegionSpec::parse("chr1:6-6").unwrap();
        assert_eq!(source.query(&region).unwrap().len(), 1);
        let region = RegionSpec::parse("chr1:7-7").unwrap();
        assert!(source.query(&region).unwrap().is_empty());
    }

    #[test]
    fn test_query_info_end() {
        // a gVCF reference block is returned for any position inside it
        let record = VariantRecord::from_vcf_line("chr1\t10\t.\tA\t<NON_REF>\t.\t.\tEND=20\tGT\t0/0").unwrap();
        let mut source = InMemoryVariantSource::new(vec![record]);
        let region = RegionSpec::parse("chr1:15-15").unwrap();
        assert_eq!(source.query(&region).unwrap().len(), 1);
        let region = RegionSpec::parse("chr1:20-20").unwrap();
        assert_eq!(source.query(&region).unwrap().len(), 1);
        let region = RegionSpec::parse("chr1:21-25").unwrap();
        assert!(source.query(&region).unwrap().is_empty());
    }
}
