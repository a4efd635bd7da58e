//! Lipase readings from tidy block measurements

use crate::block_parser::BlockLayout;
use crate::error::{LabError, Result};
use crate::models::{BlockMeasurement, HeaderSchema, LipaseReading};

/// Columns identifying one experimental group
///
/// An empty configuration selects every column before the time column.
/// Configured names must exist and must not be a time or value column.
pub fn resolve_group_columns(
    schema: &HeaderSchema,
    layout: &BlockLayout,
    configured: &[String],
) -> Result<Vec<String>> {
    if configured.is_empty() {
        return Ok(schema.columns()[..layout.time_offset].to_vec());
    }

    configured
        .iter()
        .map(|column| {
            let offset = schema
                .position(column)
                .ok_or_else(|| LabError::missing_column(column.as_str(), "lipase header"))?;
            if layout.is_measurement_offset(offset) {
                return Err(LabError::configuration(format!(
                    "Group column '{}' is a time or value column",
                    column
                )));
            }
            Ok(column.clone())
        })
        .collect()
}

/// Attach group keys to measurements; cooked is the first value column
pub fn lipase_readings(measurements: &[BlockMeasurement], group_columns: &[String]) -> Vec<LipaseReading> {
    measurements
        .iter()
        .map(|measurement| LipaseReading {
            group: group_columns
                .iter()
                .map(|column| measurement.record.get(column).trim().to_string())
                .collect(),
            time: measurement.time,
            ph_cooked: measurement.values[0],
            ph_uncooked: measurement.values[1],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TidyRecord;

    fn schema() -> HeaderSchema {
        HeaderSchema::new(
            ["Datum", "Stdgang", "Gruppe", "Zeit", "gekocht", "ungekocht"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        )
    }

    #[test]
    fn test_default_group_columns_precede_time() {
        let schema = schema();
        let layout = BlockLayout::locate(&schema, "Zeit").unwrap();
        let columns = resolve_group_columns(&schema, &layout, &[]).unwrap();
        assert_eq!(columns, vec!["Datum", "Stdgang", "Gruppe"]);
    }

    #[test]
    fn test_configured_group_columns_validated() {
        let schema = schema();
        let layout = BlockLayout::locate(&schema, "Zeit").unwrap();

        let ok = resolve_group_columns(&schema, &layout, &["Stdgang".to_string()]).unwrap();
        assert_eq!(ok, vec!["Stdgang"]);

        let missing = resolve_group_columns(&schema, &layout, &["Tisch".to_string()]);
        assert!(matches!(missing, Err(LabError::MissingColumn { .. })));

        let measurement = resolve_group_columns(&schema, &layout, &["gekocht".to_string()]);
        assert!(matches!(measurement, Err(LabError::Configuration { .. })));
    }

    #[test]
    fn test_readings_carry_group_values() {
        let mut record = TidyRecord::new();
        record.set("Stdgang", " A ");
        record.set("Gruppe", "2");
        let measurement = BlockMeasurement {
            record,
            time: 5.0,
            values: [Some(6.8), None],
        };

        let readings = lipase_readings(&[measurement], &["Stdgang".to_string(), "Gruppe".to_string()]);
        assert_eq!(readings[0].group, vec!["A", "2"]);
        assert_eq!(readings[0].ph_cooked, Some(6.8));
        assert_eq!(readings[0].ph_uncooked, None);
    }
}
