//! Participant lists and the tactile measurement join
//!
//! Both files are keyed by (date, session, person). Blank dates and sessions
//! are forward-filled before the key is built, dates are compared in ISO form
//! and numeric person ids in canonical integer form, so `01.01.24`/`1,0`
//! joins `2024-01-01`/`1`.

use super::categories::{CategoryTable, GENDER, SMOKER, VISUAL_AID, age_group, remap_category};
use super::dates::{date_key, parse_date};
use super::fill::forward_fill_records;
use super::numeric::{canonical_identifier, parse_locale_number};
use crate::config::RegionMapping;
use crate::constants::{categories, columns};
use crate::error::{LabError, Result};
use crate::models::{Participant, ParticipantKey, TactileObservation, TidyRecord, TidyTable};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Counters of the tactile join and its filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub input_rows: usize,
    /// Rows without a matching participant (kept with Unknown attributes)
    pub unmatched: usize,
    /// Rows excluded because gender is neither male nor female
    pub excluded_gender: usize,
    /// Rows excluded because every region was missing
    pub excluded_empty: usize,
    pub retained: usize,
}

fn require_columns(table: &TidyTable, required: &[&str], context: &str) -> Result<()> {
    for column in required {
        if table.schema.position(column).is_none() {
            return Err(LabError::missing_column(*column, context));
        }
    }
    Ok(())
}

/// Records with date and session forward-filled
fn filled_records(table: &TidyTable) -> Vec<TidyRecord> {
    let mut records = table.records.clone();
    forward_fill_records(
        &mut records,
        &[columns::DATE.to_string(), columns::SESSION.to_string()],
    );
    records
}

fn participant_key(record: &TidyRecord) -> ParticipantKey {
    ParticipantKey {
        date: date_key(record.get(columns::DATE)),
        session: record.get(columns::SESSION).trim().to_string(),
        person: canonical_identifier(record.get(columns::PERSON)),
    }
}

/// Non-empty codes falling back to the table's default label
fn report_unknown_codes(records: &[TidyRecord], column: &str, category: &CategoryTable) {
    let unknown = records
        .iter()
        .map(|record| record.get(column))
        .filter(|code| !code.trim().is_empty() && !category.is_known(code))
        .count();
    if unknown > 0 {
        debug!(
            "{} unrecognized {} codes in column '{}'",
            unknown,
            category.name(),
            column
        );
    }
}

/// Clean a participant list; attribute columns other than the keys are optional
pub fn normalize_participants(table: &TidyTable) -> Result<Vec<Participant>> {
    require_columns(table, columns::PARTICIPANT_KEYS, "participant list")?;

    for optional in [columns::GENDER, columns::AGE, columns::SMOKER, columns::VISUAL_AID] {
        if table.schema.position(optional).is_none() {
            debug!("Participant list has no '{}' column", optional);
        }
    }

    let records: Vec<TidyRecord> = filled_records(table)
        .into_iter()
        .filter(|record| !record.is_blank(columns::PERSON))
        .collect();

    for (column, category) in [
        (columns::GENDER, &GENDER),
        (columns::SMOKER, &SMOKER),
        (columns::VISUAL_AID, &VISUAL_AID),
    ] {
        report_unknown_codes(&records, column, category);
    }

    let participants: Vec<Participant> = records
        .iter()
        .map(|record| {
            let age = parse_locale_number(record.get(columns::AGE));
            Participant {
                key: participant_key(record),
                date: parse_date(record.get(columns::DATE)),
                gender: remap_category(&GENDER, record.get(columns::GENDER)),
                age,
                age_group: age.and_then(age_group).map(str::to_string),
                smoker: remap_category(&SMOKER, record.get(columns::SMOKER)),
                visual_aid: remap_category(&VISUAL_AID, record.get(columns::VISUAL_AID)),
            }
        })
        .collect();

    debug!("Normalized {} participants", participants.len());
    Ok(participants)
}

/// Index participants by key, keeping the first entry of duplicated keys
pub fn index_participants(participants: &[Participant]) -> HashMap<ParticipantKey, &Participant> {
    let mut index = HashMap::with_capacity(participants.len());
    for participant in participants {
        if index.contains_key(&participant.key) {
            warn!(
                "Duplicate participant {}/{}/{}, keeping the first entry",
                participant.key.date, participant.key.session, participant.key.person
            );
            continue;
        }
        index.insert(participant.key.clone(), participant);
    }
    index
}

/// Join tactile measurements with participants and apply the analysis filters
///
/// Rows keep their file order. Region cells go through locale-aware number
/// parsing; a row survives when its participant is male or female and at
/// least one region carries a value.
pub fn tactile_observations(
    measurements: &TidyTable,
    participants: &[Participant],
    regions: &[RegionMapping],
) -> Result<(Vec<TactileObservation>, JoinStats)> {
    require_columns(measurements, columns::PARTICIPANT_KEYS, "tactile measurements")?;
    for region in regions {
        if measurements.schema.position(&region.source).is_none() {
            return Err(LabError::missing_column(
                region.source.as_str(),
                "tactile measurements",
            ));
        }
    }

    let index = index_participants(participants);
    let mut stats = JoinStats {
        input_rows: measurements.len(),
        ..Default::default()
    };
    let mut observations = Vec::new();

    for record in filled_records(measurements) {
        let key = participant_key(&record);
        let participant = index.get(&key).copied();
        if participant.is_none() {
            stats.unmatched += 1;
        }

        let gender = participant
            .map(|p| p.gender.clone())
            .unwrap_or_else(|| categories::UNKNOWN.to_string());
        if gender != categories::MALE && gender != categories::FEMALE {
            stats.excluded_gender += 1;
            continue;
        }

        let distances: Vec<Option<f64>> = regions
            .iter()
            .map(|region| parse_locale_number(record.get(&region.source)))
            .collect();
        if distances.iter().all(Option::is_none) {
            stats.excluded_empty += 1;
            continue;
        }

        observations.push(TactileObservation {
            key,
            distances,
            gender,
            age: participant.and_then(|p| p.age),
            age_group: participant.and_then(|p| p.age_group.clone()),
            smoker: participant
                .map(|p| p.smoker.clone())
                .unwrap_or_else(|| categories::UNKNOWN.to_string()),
            visual_aid: participant
                .map(|p| p.visual_aid.clone())
                .unwrap_or_else(|| categories::UNKNOWN.to_string()),
        });
    }

    stats.retained = observations.len();
    if stats.unmatched > 0 {
        warn!(
            "{} of {} tactile rows have no matching participant",
            stats.unmatched, stats.input_rows
        );
    }
    debug!(
        "Tactile join retained {} rows ({} excluded by gender, {} without measurements)",
        stats.retained, stats.excluded_gender, stats.excluded_empty
    );

    Ok((observations, stats))
}
