//! Input loading for raw lab exports.
//!
//! Two loaders feed the pipelines: the raw line loader hands block-structured
//! files to the block parser untouched, and the rectangular loader reads
//! ordinary header-first CSVs through polars, every column as text, so the
//! normalizer owns all type casting.

use crate::error::{LabError, Result};
use crate::models::{HeaderSchema, TidyRecord, TidyTable};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Locate an input file, tolerating differently normalized file names
///
/// Exports named with umlauts may arrive decomposed (NFD) or re-encoded.
/// When the exact path is missing, every non-ASCII run of the file name is
/// turned into a wildcard and the first match in the same directory is used.
pub fn resolve_input(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    if file_name.is_ascii() {
        return Err(LabError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut pattern_name = String::with_capacity(file_name.len());
    for ch in file_name.chars() {
        if ch.is_ascii() {
            pattern_name.push_str(&glob::Pattern::escape(&ch.to_string()));
        } else if !pattern_name.ends_with('*') {
            pattern_name.push('*');
        }
    }

    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    let pattern = directory.join(pattern_name);
    debug!("Searching for input with pattern: {}", pattern.display());

    let candidate = glob::glob(&pattern.to_string_lossy())
        .ok()
        .and_then(|mut paths| paths.find_map(|entry| entry.ok()));

    match candidate {
        Some(found) => {
            debug!("Resolved {} to {}", path.display(), found.display());
            Ok(found)
        }
        None => Err(LabError::FileNotFound {
            path: path.to_path_buf(),
        }),
    }
}

/// Read a text file into its ordered raw lines
///
/// A leading byte-order mark is stripped. Invalid UTF-8 is replaced rather
/// than rejected since spreadsheet exports are frequently re-encoded.
pub fn load_raw_lines(path: &Path) -> Result<Vec<String>> {
    let path = resolve_input(path)?;
    let bytes = std::fs::read(&path)?;

    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            warn!(
                "File {} is not valid UTF-8, replacing invalid sequences",
                path.display()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    let lines: Vec<String> = content.lines().map(str::to_string).collect();

    debug!("Loaded {} raw lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Load a rectangular CSV with every column kept as trimmed text
pub fn load_rectangular(path: &Path, delimiter: u8) -> Result<TidyTable> {
    let path = resolve_input(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(delimiter)
                .with_encoding(CsvEncoding::LossyUtf8)
                .with_truncate_ragged_lines(true),
        )
        .try_into_reader_with_file_path(Some(path.clone()))?
        .finish()?;

    debug!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    frame_to_table(&df)
}

/// Convert a DataFrame into a tidy table of raw strings (nulls become "")
pub fn frame_to_table(df: &DataFrame) -> Result<TidyTable> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut records = vec![TidyRecord::new(); df.height()];

    for (name, column) in names.iter().zip(df.get_columns()) {
        let text = column.cast(&DataType::String)?;
        let values = text.as_materialized_series().str()?;
        for (record, value) in records.iter_mut().zip(values.into_iter()) {
            record.set(name.as_str(), value.unwrap_or("").trim());
        }
    }

    Ok(TidyTable {
        schema: HeaderSchema::new(names),
        records,
    })
}
