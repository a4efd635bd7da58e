//! Field splitting for individual raw lines
//!
//! Lines are split one at a time because the block parser classifies each
//! line before deciding how its fields are interpreted.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

/// Split one raw line into trimmed field values, honoring quoted fields
///
/// A quoted field may contain the delimiter (`"7,00"`); quotes are removed
/// from the returned value.
pub fn split_fields(line: &str, delimiter: u8) -> Vec<String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => record.iter().map(|field| field.trim().to_string()).collect(),
        Ok(false) => Vec::new(),
        Err(e) => {
            debug!("Falling back to plain split for line '{}': {}", line, e);
            line.split(delimiter as char)
                .map(|field| field.trim().trim_matches('"').trim().to_string())
                .collect()
        }
    }
}

/// True for lines carrying no content at all
///
/// Besides whitespace-only lines this covers spreadsheet padding rows made of
/// nothing but delimiters, semicolons and empty quotes.
pub fn is_blank_line(line: &str, delimiter: u8) -> bool {
    let delimiter = delimiter as char;
    line.chars()
        .all(|ch| ch.is_whitespace() || ch == delimiter || ch == ';' || ch == '"')
}
