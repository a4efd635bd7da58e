//! Block-structured CSV parser for lab measurement exports
//!
//! Reconstructs one tidy record per measurement from exports where
//! identifying metadata (date, session, group, ...) is written only on the
//! first line of each block and the following lines carry bare values
//! positioned under the time column.
//!
//! ## Architecture
//!
//! - [`fields`] - Per-line field splitting with quoted-field support
//! - [`tidy`] - Numeric cleaning, forward-fill and drop rules on the parsed table
//!
//! The scanner itself is an explicit fold: [`BlockParser::step`] takes the
//! current [`MetadataState`] and one line and returns the next state together
//! with the record the line emits, if any. No state outlives a parse.
//!
//! ## Line classification
//!
//! A line is *metadata-bearing* when either of its first two fields is
//! non-empty, otherwise *measurement-only*. Metadata-bearing lines update the
//! state and emit a record when they also carry a value; measurement-only
//! lines emit a record when their time position is filled.

pub mod fields;
pub mod tidy;

#[cfg(test)]
pub mod tests;

pub use fields::{is_blank_line, split_fields};
pub use tidy::{TidyStats, tidy_up};

use crate::error::{LabError, Result};
use crate::models::{HeaderSchema, MetadataState, TidyRecord, TidyTable};
use std::path::Path;
use tracing::{debug, info};

/// Positions of the time column and the two dependent value columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    pub time_offset: usize,
    pub value_offsets: [usize; 2],
}

impl BlockLayout {
    /// Derive the layout from the header, the values following the time column
    pub fn locate(schema: &HeaderSchema, time_column: &str) -> Result<Self> {
        let time_offset = schema
            .position(time_column)
            .ok_or_else(|| LabError::missing_column(time_column, "block header"))?;

        if time_offset < 2 {
            return Err(LabError::configuration(format!(
                "Time column '{}' sits at position {}; the first two positions are reserved for identifying metadata",
                time_column, time_offset
            )));
        }

        if time_offset + 2 >= schema.len() {
            return Err(LabError::configuration(format!(
                "Time column '{}' must be followed by two value columns, header has {} columns",
                time_column,
                schema.len()
            )));
        }

        Ok(Self {
            time_offset,
            value_offsets: [time_offset + 1, time_offset + 2],
        })
    }

    /// True for the time and value positions
    pub fn is_measurement_offset(&self, offset: usize) -> bool {
        offset == self.time_offset || self.value_offsets.contains(&offset)
    }

    pub fn measurement_offsets(&self) -> [usize; 3] {
        [self.time_offset, self.value_offsets[0], self.value_offsets[1]]
    }
}

/// Classification of a non-blank line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Metadata,
    Measurement,
}

/// Counters collected while scanning one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines after the header
    pub lines_scanned: usize,
    pub blank_lines: usize,
    pub metadata_lines: usize,
    pub measurement_lines: usize,
    pub records_emitted: usize,
    /// Measurement-only lines without a time value
    pub lines_dropped: usize,
}

impl ParseStats {
    fn record(&mut self, kind: LineKind, emitted: bool) {
        self.lines_scanned += 1;
        match kind {
            LineKind::Blank => self.blank_lines += 1,
            LineKind::Metadata => self.metadata_lines += 1,
            LineKind::Measurement => {
                self.measurement_lines += 1;
                if !emitted {
                    self.lines_dropped += 1;
                }
            }
        }
        if emitted {
            self.records_emitted += 1;
        }
    }
}

/// Parsed table together with scan statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub table: TidyTable,
    pub layout: BlockLayout,
    pub stats: ParseStats,
}

/// Stateless description of one block-structured file; the state is threaded
/// through [`BlockParser::step`]
#[derive(Debug, Clone)]
pub struct BlockParser {
    schema: HeaderSchema,
    layout: BlockLayout,
    delimiter: u8,
}

impl BlockParser {
    pub fn new(schema: HeaderSchema, time_column: &str, delimiter: u8) -> Result<Self> {
        let layout = BlockLayout::locate(&schema, time_column)?;
        Ok(Self {
            schema,
            layout,
            delimiter,
        })
    }

    pub fn schema(&self) -> &HeaderSchema {
        &self.schema
    }

    pub fn layout(&self) -> BlockLayout {
        self.layout
    }

    /// Classify already split fields
    pub fn classify(&self, fields: &[String]) -> LineKind {
        let identifies = fields.iter().take(2).any(|field| !field.is_empty());
        if identifies {
            LineKind::Metadata
        } else {
            LineKind::Measurement
        }
    }

    /// Advance the scan by one line
    pub fn step(&self, state: MetadataState, line: &str) -> (MetadataState, Option<TidyRecord>) {
        let (state, _, record) = self.scan(state, line);
        (state, record)
    }

    /// Advance the scan by one line, also reporting how the line was classified
    pub fn scan(
        &self,
        mut state: MetadataState,
        line: &str,
    ) -> (MetadataState, LineKind, Option<TidyRecord>) {
        if is_blank_line(line, self.delimiter) {
            return (state, LineKind::Blank, None);
        }

        let fields = split_fields(line, self.delimiter);
        let kind = self.classify(&fields);

        let record = match kind {
            LineKind::Metadata => {
                for (offset, column) in self.schema.columns().iter().enumerate() {
                    if self.layout.is_measurement_offset(offset) {
                        continue;
                    }
                    if let Some(value) = fields.get(offset).filter(|value| !value.is_empty()) {
                        state.set(column.as_str(), value.as_str());
                    }
                }

                let carries_value = self
                    .layout
                    .value_offsets
                    .iter()
                    .any(|&offset| fields.get(offset).is_some_and(|value| !value.is_empty()));

                carries_value.then(|| self.emit(&state, &fields))
            }
            LineKind::Measurement => {
                let has_time = fields
                    .get(self.layout.time_offset)
                    .is_some_and(|value| !value.is_empty());

                has_time.then(|| self.emit(&state, &fields))
            }
            LineKind::Blank => None,
        };

        (state, kind, record)
    }

    /// Snapshot the state and lay the line's time and values over it
    fn emit(&self, state: &MetadataState, fields: &[String]) -> TidyRecord {
        let mut record = state.snapshot(&self.schema);
        for offset in self.layout.measurement_offsets() {
            if let Some(column) = self.schema.name_at(offset) {
                let value = fields.get(offset).map(String::as_str).unwrap_or("");
                record.set(column, value);
            }
        }
        record
    }

    /// Fold the body lines (header excluded) into a tidy table
    pub fn parse_lines<'a, I>(&self, lines: I) -> (TidyTable, ParseStats)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = TidyTable::new(self.schema.clone());
        let mut stats = ParseStats::default();

        let _final_state = lines
            .into_iter()
            .fold(MetadataState::new(), |state, line| {
                let (state, kind, record) = self.scan(state, line);
                stats.record(kind, record.is_some());
                if let Some(record) = record {
                    table.records.push(record);
                }
                state
            });

        (table, stats)
    }
}

/// Parse a complete block-structured document whose first line is the header
pub fn parse_document(
    lines: &[String],
    time_column: &str,
    delimiter: u8,
    source: &Path,
) -> Result<ParseResult> {
    let (header, body) = lines
        .split_first()
        .ok_or_else(|| LabError::InvalidHeader {
            path: source.to_path_buf(),
            reason: "File is empty".to_string(),
        })?;

    let columns = split_fields(header, delimiter);
    if columns.iter().all(|column| column.is_empty()) {
        return Err(LabError::InvalidHeader {
            path: source.to_path_buf(),
            reason: "Header line has no column names".to_string(),
        });
    }

    let schema = HeaderSchema::new(columns);
    debug!("Header schema: {:?}", schema.columns());

    let parser = BlockParser::new(schema, time_column, delimiter)?;
    let (table, stats) = parser.parse_lines(body.iter().map(String::as_str));

    info!(
        "Parsed {} records from {} lines ({} metadata, {} measurement, {} dropped) in {}",
        stats.records_emitted,
        stats.lines_scanned,
        stats.metadata_lines,
        stats.measurement_lines,
        stats.lines_dropped,
        source.display()
    );

    Ok(ParseResult {
        table,
        layout: parser.layout(),
        stats,
    })
}
