
/// In-memory variant source for plain-text VCF files
pub mod memory_source;
/// Reference sequence lookups via an indexed FASTA or a pre-loaded genome
pub mod reference;
/// Variant source backed by a bgzipped, tabix-indexed VCF
pub mod tabix_source;

use crate::data_types::region::RegionSpec;
use crate::data_types::variant_record::VariantRecord;

/// Anything that can answer "which variant records overlap this region".
/// Record order must be stable, the first record is authoritative for variant clauses.
pub trait VariantSource {
    /// Returns every record overlapping the region, in index order
    /// # Errors
    /// * if the underlying index fails or returns unparseable lines
    fn query(&mut self, region: &RegionSpec) -> Result<Vec<VariantRecord>, Box<dyn std::error::Error>>;
}

/// Anything that can return the reference bases for a region
pub trait ReferenceSource {
    /// Returns the bases for the 1-based, inclusive region with no header lines or line breaks
    /// # Errors
    /// * if the contig is unknown or the region runs past its end
    fn fetch(&self, region: &RegionSpec) -> Result<String, Box<dyn std::error::Error>>;
}
