use super::table;
use crate::config::TactileConfig;
use crate::error::LabError;
use crate::normalizer::{normalize_participants, tactile_observations};

const PARTICIPANT_HEADER: &[&str] = &["Datum", "Stdgang", "Person", "Geschlecht", "Alter", "Raucher", "Sehhilfe"];
const TACTILE_HEADER: &[&str] = &[
    "Datum",
    "Stdgang",
    "Person",
    "Handrücken",
    "Fingerkuppe",
    "Unterarm",
    "Rücken",
    "Handfläche",
];

fn participants() -> Vec<crate::models::Participant> {
    let list = table(
        PARTICIPANT_HEADER,
        &[
            &["01.01.2024", "A", "1", "m", "21", "nein", "Brille"],
            &["", "", "2", "w", "19,5", "ja", ""],
            &["", "", "3", "d", "30", "", ""],
            &["02.01.2024", "B", "1", "W", "27", "n", "keine"],
        ],
    );
    normalize_participants(&list).unwrap()
}

#[test]
fn test_participants_forward_fill_keys() {
    let participants = participants();
    assert_eq!(participants.len(), 4);

    let second = &participants[1];
    assert_eq!(second.key.date, "2024-01-01");
    assert_eq!(second.key.session, "A");
    assert_eq!(second.gender, "Female");
    assert_eq!(second.age, Some(19.5));
    assert_eq!(second.age_group.as_deref(), Some("<20"));
    assert_eq!(second.smoker, "Smoker");
    assert_eq!(second.visual_aid, "Unknown");

    assert_eq!(participants[0].visual_aid, "Glasses");
    assert_eq!(participants[2].gender, "Diverse");
    assert_eq!(participants[3].age_group.as_deref(), Some("25-30"));
}

#[test]
fn test_participant_list_needs_keys() {
    let list = table(&["Datum", "Person"], &[&["01.01.2024", "1"]]);
    let err = normalize_participants(&list).unwrap_err();
    assert!(matches!(err, LabError::MissingColumn { .. }));
}

#[test]
fn test_tactile_join_and_filters() {
    let participants = participants();
    let measurements = table(
        TACTILE_HEADER,
        &[
            // Same key spelled differently
            &["1.1.24", "A", "1,0", "30", "2,5", "35", "45", "10"],
            &["", "", "2", "28", "2", "-", "40", "9"],
            // Diverse participant excluded from the gender-based analysis
            &["", "", "3", "31", "3", "38", "50", "11"],
            // No measurements at all
            &["02.01.2024", "B", "1", "-", "", " ", "-", ""],
            // No matching participant
            &["", "", "9", "30", "3", "36", "44", "12"],
        ],
    );

    let regions = TactileConfig::default().regions;
    let (observations, stats) = tactile_observations(&measurements, &participants, &regions).unwrap();

    assert_eq!(observations.len(), 2);
    assert_eq!(stats.input_rows, 5);
    assert_eq!(stats.unmatched, 1);
    assert_eq!(stats.excluded_gender, 2);
    assert_eq!(stats.excluded_empty, 1);

    let first = &observations[0];
    assert_eq!(first.gender, "Male");
    assert_eq!(first.distances[1], Some(2.5));
    assert_eq!(first.age_group.as_deref(), Some("20-25"));

    let second = &observations[1];
    assert_eq!(second.gender, "Female");
    assert_eq!(second.distances[2], None);
}

#[test]
fn test_missing_region_column_is_fatal() {
    let measurements = table(&["Datum", "Stdgang", "Person", "Fingerkuppe"], &[]);
    let regions = TactileConfig::default().regions;
    let err = tactile_observations(&measurements, &[], &regions).unwrap_err();
    assert!(matches!(err, LabError::MissingColumn { .. }));
}
