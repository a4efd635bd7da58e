//! Core data structures for lab data processing.
//!
//! Defines the header schema and metadata state driving the block parser,
//! the raw tidy record/table it emits, and the typed rows produced by the
//! normalizer. After normalization every missing value is `None`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Experiments supported by the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Experiment {
    Lipase,
    Tactile,
}

impl Experiment {
    pub fn name(&self) -> &'static str {
        match self {
            Experiment::Lipase => "lipase",
            Experiment::Tactile => "tactile",
        }
    }
}

/// Ordered column names read from the first line of a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSchema {
    columns: Vec<String>,
}

impl HeaderSchema {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Positional offset of a column
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn name_at(&self, offset: usize) -> Option<&str> {
        self.columns.get(offset).map(String::as_str)
    }
}

/// One emitted row: column name to raw string value
///
/// Absent columns read as the empty string, so every record of a table
/// exposes the same keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TidyRecord {
    values: HashMap<String, String>,
}

impl TidyRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn is_blank(&self, column: &str) -> bool {
        self.get(column).trim().is_empty()
    }
}

/// Last-seen raw value per metadata column, threaded through one parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataState {
    values: HashMap<String, String>,
}

impl MetadataState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Owned copy of the state laid out over every schema column
    pub fn snapshot(&self, schema: &HeaderSchema) -> TidyRecord {
        let mut record = TidyRecord::new();
        for column in schema.columns() {
            record.set(column.as_str(), self.get(column).unwrap_or(""));
        }
        record
    }
}

/// Ordered records sharing the schema's column keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TidyTable {
    pub schema: HeaderSchema,
    pub records: Vec<TidyRecord>,
}

impl TidyTable {
    pub fn new(schema: HeaderSchema) -> Self {
        Self {
            schema,
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A tidy record after numeric cleaning of its time and value columns
#[derive(Debug, Clone, PartialEq)]
pub struct BlockMeasurement {
    /// Full raw record, metadata columns forward-filled
    pub record: TidyRecord,
    pub time: f64,
    /// The two dependent value columns following the time column
    pub values: [Option<f64>; 2],
}

/// One lipase pH reading at a time point within an experimental group
#[derive(Debug, Clone, PartialEq)]
pub struct LipaseReading {
    /// Values of the group columns, in group column order
    pub group: Vec<String>,
    pub time: f64,
    pub ph_cooked: Option<f64>,
    pub ph_uncooked: Option<f64>,
}

/// Join key shared by participant lists and measurement files
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantKey {
    /// ISO date when parseable, trimmed raw text otherwise
    pub date: String,
    pub session: String,
    pub person: String,
}

/// Cleaned participant list entry
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub key: ParticipantKey,
    pub date: Option<NaiveDate>,
    pub gender: String,
    pub age: Option<f64>,
    pub age_group: Option<String>,
    pub smoker: String,
    pub visual_aid: String,
}

/// Tactile measurements of one participant joined with their attributes
#[derive(Debug, Clone, PartialEq)]
pub struct TactileObservation {
    pub key: ParticipantKey,
    /// Two-point threshold per configured region (mm), in region order
    pub distances: Vec<Option<f64>>,
    pub gender: String,
    pub age: Option<f64>,
    pub age_group: Option<String>,
    pub smoker: String,
    pub visual_aid: String,
}

/// Summary of one processed experiment
#[derive(Debug, Default, Clone)]
pub struct ProcessingStats {
    pub records_parsed: usize,
    pub records_retained: usize,
    pub records_dropped: usize,
    pub tests_run: usize,
    pub tests_not_enough_data: usize,
    pub files_written: Vec<std::path::PathBuf>,
    pub processing_time_ms: u128,
}
