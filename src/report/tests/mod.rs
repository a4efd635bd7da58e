//! Reporter tests
//!
//! - **table_tests**: frame layout of every result table
//! - **narrative_tests**: report sections and degenerate wording
//! - **reporter_tests**: artifacts written to disk

pub mod reporter_tests;
pub mod table_tests;

use crate::analysis::{LipaseAnalysis, TactileAnalysis, analyze_lipase, analyze_tactile};
use crate::config::TactileConfig;
use crate::models::{LipaseReading, ParticipantKey, TactileObservation};

pub fn readings() -> Vec<LipaseReading> {
    let mut readings = Vec::new();
    for (session, group, cooked, uncooked) in [
        ("A", "1", 0.3, 1.1),
        ("A", "2", 0.2, 1.3),
        ("B", "1", 0.1, 0.8),
        ("B", "2", 0.15, 0.6),
    ] {
        for (time, fraction) in [(0.0, 0.0), (5.0, 0.5), (10.0, 1.0)] {
            readings.push(LipaseReading {
                group: vec![session.to_string(), group.to_string()],
                time,
                ph_cooked: Some(7.0 - cooked * fraction),
                ph_uncooked: Some(7.0 - uncooked * fraction),
            });
        }
    }
    readings
}

pub fn lipase_analysis() -> LipaseAnalysis {
    let columns = vec!["Stdgang".to_string(), "Gruppe".to_string()];
    analyze_lipase(&readings(), &columns, "Stdgang", 0.05).unwrap()
}

pub fn observations() -> Vec<TactileObservation> {
    let rows: [(&str, [f64; 5]); 4] = [
        ("Male", [30.0, 3.0, 38.0, 45.0, 11.0]),
        ("Male", [28.0, 2.5, 40.0, 50.0, 10.0]),
        ("Female", [25.0, 2.0, 35.0, 42.0, 9.0]),
        ("Female", [27.0, 2.2, 33.0, 44.0, 9.5]),
    ];
    rows.iter()
        .enumerate()
        .map(|(index, (gender, distances))| TactileObservation {
            key: ParticipantKey {
                date: "2024-01-01".to_string(),
                session: "A".to_string(),
                person: (index + 1).to_string(),
            },
            distances: distances.iter().map(|d| Some(*d)).collect(),
            gender: gender.to_string(),
            age: Some(22.0),
            age_group: Some("20-25".to_string()),
            smoker: "Non-smoker".to_string(),
            visual_aid: "None".to_string(),
        })
        .collect()
}

pub fn tactile_analysis() -> TactileAnalysis {
    analyze_tactile(&observations(), &TactileConfig::default().regions, 0.05).unwrap()
}
