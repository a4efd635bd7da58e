//! Forward-fill of sparse metadata columns

use crate::models::TidyRecord;

/// Replace blank cells of the given columns with the last non-blank value above
///
/// Cells before the first non-blank value stay blank.
pub fn forward_fill_records(records: &mut [TidyRecord], columns: &[String]) {
    for column in columns {
        let mut last: Option<String> = None;
        for record in records.iter_mut() {
            if record.is_blank(column) {
                if let Some(value) = &last {
                    record.set(column.as_str(), value.as_str());
                }
            } else {
                last = Some(record.get(column).trim().to_string());
            }
        }
    }
}
