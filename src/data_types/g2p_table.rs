
use simple_error::bail;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::data_types::clause::RuleFields;
use crate::util::file_io::{open_maybe_gzip, create_maybe_gzip};

/// Lines at the top of the file that start with this are carried through as the opaque header
pub const HEADER_PREFIX: char = '#';
/// The rule columns that must lead every row
pub const RULE_COLUMNS: [&str; 4] = ["TYPE", "FEATURE", "REGION", "STATE"];

/// A G2P rule table: opaque header lines, a column header, and rows.
/// Only the first four columns of each row are interpreted; everything else passes through untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct G2pTable {
    /// Leading '#' lines, without line endings
    header: Vec<String>,
    /// Column names
    columns: Vec<String>,
    /// Each data row, split into columns
    rows: Vec<Vec<String>>
}

impl G2pTable {
    /// Constructor, checks that every row has the same width as the column header
    /// # Errors
    /// * if there are fewer than four columns
    /// * if any row is a different width than the column header
    pub fn new(header: Vec<String>, columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, Box<dyn std::error::Error>> {
        if columns.len() < RULE_COLUMNS.len() {
            bail!("G2P table must have at least {} columns ({}), found {}", RULE_COLUMNS.len(), RULE_COLUMNS.join(", "), columns.len());
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                bail!("G2P row {i} has {} columns, but the column header has {}", row.len(), columns.len());
            }
        }
        Ok(Self {
            header, columns, rows
        })
    }

    /// Parses a table from any reader
    /// # Errors
    /// * if the content is not UTF-8
    /// * if the tab-delimited body fails to parse
    /// * if the table shape is invalid, see `new()`
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, Box<dyn std::error::Error>> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        // peel off the header lines, the rest is tab-delimited
        let mut header: Vec<String> = vec![];
        let mut body_start: usize = 0;
        for line in content.split_inclusive('\n') {
            if line.starts_with(HEADER_PREFIX) {
                header.push(line.trim_end_matches(['\r', '\n']).to_string());
                body_start += line.len();
            } else {
                break;
            }
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .has_headers(true)
            .from_reader(content[body_start..].as_bytes());

        let columns: Vec<String> = csv_reader.headers()?.iter()
            .map(|c| c.to_string())
            .collect();
        let mut rows: Vec<Vec<String>> = vec![];
        for record in csv_reader.records() {
            let record: csv::StringRecord = record?;
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }
        Self::new(header, columns, rows)
    }

    /// Loads a table from file, gzip is detected by the ".gz" extension
    pub fn from_path(filename: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let reader = open_maybe_gzip(filename)?;
        Self::from_reader(reader)
    }

    /// Writes the header, column header, and rows to any writer
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Box<dyn std::error::Error>> {
        for line in self.header.iter() {
            writeln!(writer, "{line}")?;
        }

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(writer);
        csv_writer.write_record(&self.columns)?;
        for row in self.rows.iter() {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Saves the table to file, gzip is applied for a ".gz" extension
    pub fn save(&self, filename: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let mut writer = BufWriter::new(create_maybe_gzip(filename)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Returns a new table with the same header and columns, but only the selected rows in their original order
    /// # Arguments
    /// * `row_indices` - indices of the rows to keep, must be sorted and in range
    pub fn subset(&self, row_indices: &[usize]) -> Self {
        Self {
            header: self.header.clone(),
            columns: self.columns.clone(),
            rows: row_indices.iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect()
        }
    }

    /// Iterates over the rule fields of each row
    pub fn rule_fields(&self) -> impl Iterator<Item = RuleFields> + '_ {
        self.rows.iter()
            .map(|row| RuleFields::new(&row[0], &row[1], &row[2], &row[3]))
    }

    // getters
    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
