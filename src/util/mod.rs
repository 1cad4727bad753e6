
/// Generic functionality for reading/writing files, with optional gzip
pub mod file_io;
/// Quick utility functions for htslib files
pub mod htslib_quickparse;
/// Functions for cleaning up fetched sequences
pub mod sequence;
