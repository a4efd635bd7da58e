//! Tidy-up of parsed block tables
//!
//! Turns the raw string table into measurements: configured metadata columns
//! are forward-filled across consecutive records, the time and value columns
//! are cast with locale-aware number parsing, and records are dropped when
//! they lack a time or lack both values. A record with a time and exactly one
//! value is kept.

use super::BlockLayout;
use crate::models::{BlockMeasurement, TidyTable};
use crate::normalizer::{forward_fill_records, parse_locale_number};
use tracing::debug;

/// Outcome counters of [`tidy_up`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TidyStats {
    pub input_records: usize,
    pub missing_time: usize,
    pub missing_values: usize,
    pub retained: usize,
}

impl TidyStats {
    pub fn dropped(&self) -> usize {
        self.missing_time + self.missing_values
    }
}

/// Clean a parsed table into measurements, preserving record order
pub fn tidy_up(
    table: &TidyTable,
    layout: &BlockLayout,
    forward_fill_columns: &[String],
) -> (Vec<BlockMeasurement>, TidyStats) {
    let mut records = table.records.clone();
    forward_fill_records(&mut records, forward_fill_columns);

    let column = |offset: usize| table.schema.name_at(offset).unwrap_or("").to_string();
    let time_column = column(layout.time_offset);
    let value_columns = [column(layout.value_offsets[0]), column(layout.value_offsets[1])];

    let mut stats = TidyStats {
        input_records: records.len(),
        ..Default::default()
    };
    let mut measurements = Vec::with_capacity(records.len());

    for record in records {
        let Some(time) = parse_locale_number(record.get(&time_column)) else {
            stats.missing_time += 1;
            continue;
        };

        let values = [
            parse_locale_number(record.get(&value_columns[0])),
            parse_locale_number(record.get(&value_columns[1])),
        ];

        if values.iter().all(Option::is_none) {
            stats.missing_values += 1;
            continue;
        }

        measurements.push(BlockMeasurement {
            record,
            time,
            values,
        });
    }

    stats.retained = measurements.len();
    debug!(
        "Tidy-up retained {} of {} records ({} without time, {} without values)",
        stats.retained, stats.input_records, stats.missing_time, stats.missing_values
    );

    (measurements, stats)
}
