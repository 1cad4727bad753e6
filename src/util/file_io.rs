
use simple_error::bail;
use std::io::{BufWriter, Write};
use std::fs::File;
use std::path::Path;

/// Opens a file for reading, transparently decompressing if the extension is ".gz"
/// # Arguments
/// * `filename` - the file path to open
/// # Errors
/// * if the file does not open properly
pub fn open_maybe_gzip(filename: &Path) -> Result<Box<dyn std::io::Read>, Box<dyn std::error::Error>> {
    let fp: Box<dyn std::io::Read> = if filename.extension().unwrap_or_default() == "gz" {
        Box::new(
            flate2::read::MultiGzDecoder::new(
                File::open(filename)?
            )
        )
    } else {
        Box::new(File::open(filename)?)
    };
    Ok(fp)
}

/// Creates a file for writing, compressing if the extension is ".gz"
/// # Arguments
/// * `out_filename` - user provided path to write to
/// # Errors
/// * if the file cannot be created
pub fn create_maybe_gzip(out_filename: &Path) -> Result<Box<dyn std::io::Write>, Box<dyn std::error::Error>> {
    let file: Box<dyn std::io::Write> = if out_filename.extension().unwrap_or_default() == "gz" {
        Box::new(
            flate2::write::GzEncoder::new(
                File::create(out_filename)?,
                flate2::Compression::best()
            )
        )
    } else {
        Box::new(File::create(out_filename)?)
    };
    Ok(file)
}

/// Helper function that loads a file into some type, helpful generic
/// # Arguments
/// * `filename` - the file path to open and parse
/// # Errors
/// * if the file does not open properly
/// * if the deserialization throws errors
pub fn load_json<T: serde::de::DeserializeOwned>(filename: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let fp = open_maybe_gzip(filename)?;
    let result: T = serde_json::from_reader(fp)?;
    Ok(result)
}

/// This will save a generic serializable struct to JSON.
/// # Arguments
/// * `data` - the data in memory
/// * `out_filename` - user provided path to write to 
/// # Errors
/// * if opening or writing to the file throw errors
/// * if JSON serialization throws errors
pub fn save_json<T: serde::Serialize>(data: &T, out_filename: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = create_maybe_gzip(out_filename)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}

/// Fasta indexer, mirrored from https://docs.rs/rust-htslib/latest/src/rust_htslib/faidx/mod.rs.html#37-48
/// Works for plain and bgzipped FASTA, the latter also gets a ".gzi" index.
pub fn index_fasta(filename: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let os_path = std::ffi::CString::new(filename.display().to_string())?;
    let rc = unsafe { rust_htslib::htslib::fai_build(os_path.as_ptr()) };
    if rc < 0 {
        bail!("Error {rc} while building index for {filename:?}");
    }
    Ok(())
}

/// Returns true if the FASTA index (and the ".gzi" for bgzipped files) is present
pub fn fasta_index_exists(filename: &Path) -> bool {
    let with_suffix = |suffix: &str| {
        let mut os_string = filename.as_os_str().to_os_string();
        os_string.push(suffix);
        std::path::PathBuf::from(os_string)
    };
    let fai_exists = with_suffix(".fai").exists();
    if filename.extension().unwrap_or_default() == "gz" {
        fai_exists && with_suffix(".gzi").exists()
    } else {
        fai_exists
    }
}
