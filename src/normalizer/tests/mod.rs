//! Participant join tests
//!
//! - **participant_tests**: participant list cleaning, join keys, filters

pub mod participant_tests;

use crate::models::{HeaderSchema, TidyRecord, TidyTable};

/// Build a table from a header and rows of cell values
pub fn table(header: &[&str], rows: &[&[&str]]) -> TidyTable {
    let schema = HeaderSchema::new(header.iter().map(|c| c.to_string()).collect());
    let mut table = TidyTable::new(schema);
    for row in rows {
        let mut record = TidyRecord::new();
        for (column, value) in header.iter().zip(row.iter()) {
            record.set(*column, *value);
        }
        table.records.push(record);
    }
    table
}
