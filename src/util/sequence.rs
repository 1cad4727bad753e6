
/// Strips FASTA header lines and line breaks from fetched sequence text.
/// Reference tools may return a full FASTA record; only the bases are kept.
/// # Arguments
/// * `raw` - text as returned by a reference lookup
pub fn clean_fetched_sequence(raw: &str) -> String {
    raw.lines()
        .map(|line| line.trim())
        .filter(|line| !line.starts_with('>'))
        .collect()
}
