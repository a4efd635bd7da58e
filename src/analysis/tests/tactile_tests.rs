use crate::analysis::analyze_tactile;
use crate::config::TactileConfig;
use crate::models::{ParticipantKey, TactileObservation};

fn observation(person: usize, gender: &str, age_group: Option<&str>, distances: [Option<f64>; 5]) -> TactileObservation {
    TactileObservation {
        key: ParticipantKey {
            date: "2024-01-01".to_string(),
            session: "A".to_string(),
            person: person.to_string(),
        },
        distances: distances.to_vec(),
        gender: gender.to_string(),
        age: None,
        age_group: age_group.map(str::to_string),
        smoker: "Unknown".to_string(),
        visual_aid: "Unknown".to_string(),
    }
}

/// Hand back, fingertip, forearm, back, palm
fn cohort() -> Vec<TactileObservation> {
    vec![
        observation(1, "Male", Some("20-25"), [Some(30.0), Some(3.0), Some(38.0), Some(45.0), Some(11.0)]),
        observation(2, "Male", Some("20-25"), [Some(28.0), Some(2.5), Some(40.0), Some(50.0), Some(10.0)]),
        observation(3, "Male", Some("<20"), [Some(33.0), Some(3.5), None, Some(48.0), Some(12.0)]),
        observation(4, "Female", Some("20-25"), [Some(25.0), Some(2.0), Some(35.0), Some(42.0), Some(9.0)]),
        observation(5, "Female", None, [Some(27.0), Some(2.2), Some(33.0), Some(44.0), Some(9.5)]),
        observation(6, "Female", Some(">30"), [Some(26.0), Some(2.4), Some(36.0), None, Some(8.5)]),
    ]
}

#[test]
fn test_descriptive_per_region() {
    let regions = TactileConfig::default().regions;
    let analysis = analyze_tactile(&cohort(), &regions, 0.05).unwrap();

    assert_eq!(analysis.participants, 6);
    assert_eq!(analysis.descriptive.len(), 5);

    let forearm = &analysis.descriptive[2];
    assert_eq!(forearm.region, "Forearm");
    assert_eq!(forearm.stats.n, 5);

    assert_eq!(analysis.most_sensitive().unwrap().region, "Fingertip");
    assert_eq!(analysis.least_sensitive().unwrap().region, "Back");
}

#[test]
fn test_region_comparisons_cover_all_pairs() {
    let regions = TactileConfig::default().regions;
    let analysis = analyze_tactile(&cohort(), &regions, 0.05).unwrap();

    assert_eq!(analysis.region_comparisons.len(), 10);
    let fingertip_back = analysis
        .region_comparisons
        .iter()
        .find(|c| c.region_a == "Fingertip" && c.region_b == "Back")
        .unwrap();
    assert!(fingertip_back.significant);
    assert!(fingertip_back.cohens_d.unwrap() < 0.0);
}

#[test]
fn test_gender_comparisons() {
    let regions = TactileConfig::default().regions;
    let analysis = analyze_tactile(&cohort(), &regions, 0.05).unwrap();

    assert_eq!(analysis.gender_comparisons.len(), 5);
    let hand_back = &analysis.gender_comparisons[0];
    assert_eq!(hand_back.region, "Hand Back");
    assert_eq!(hand_back.male_n, 3);
    assert_eq!(hand_back.female_n, 3);
    assert!(hand_back.outcome.is_computed());
    assert!((hand_back.male_mean.unwrap() - 91.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_gender_comparison_needs_two_per_group() {
    let observations: Vec<TactileObservation> = cohort()
        .into_iter()
        .filter(|o| o.gender == "Female" || o.key.person == "1")
        .collect();
    let regions = TactileConfig::default().regions;
    let analysis = analyze_tactile(&observations, &regions, 0.05).unwrap();

    for comparison in &analysis.gender_comparisons {
        assert_eq!(comparison.male_n, 1);
        assert!(!comparison.outcome.is_computed());
        assert!(!comparison.significant);
        assert_eq!(comparison.cohens_d, None);
    }
}

#[test]
fn test_counts() {
    let regions = TactileConfig::default().regions;
    let analysis = analyze_tactile(&cohort(), &regions, 0.05).unwrap();

    assert_eq!(analysis.gender_count("Male"), 3);
    assert_eq!(analysis.gender_count("Female"), 3);
    assert_eq!(analysis.gender_count("Diverse"), 0);

    let counts: Vec<(&str, usize)> = analysis
        .age_group_counts
        .iter()
        .map(|(label, count)| (label.as_str(), *count))
        .collect();
    assert_eq!(
        counts,
        vec![("<20", 1), ("20-25", 3), ("25-30", 0), (">30", 1), ("Unknown", 1)]
    );
}

#[test]
fn test_correlation_matrix_shape() {
    let regions = TactileConfig::default().regions;
    let analysis = analyze_tactile(&cohort(), &regions, 0.05).unwrap();

    assert_eq!(analysis.correlation.len(), 5);
    assert_eq!(analysis.correlation.labels[1], "Fingertip");
    let r = analysis.correlation.get(0, 4).unwrap();
    assert!((-1.0..=1.0).contains(&r));
    assert_eq!(analysis.correlation.get(0, 4), analysis.correlation.get(4, 0));
}

#[test]
fn test_empty_cohort() {
    let regions = TactileConfig::default().regions;
    let analysis = analyze_tactile(&[], &regions, 0.05).unwrap();

    assert!(analysis.descriptive.is_empty());
    assert!(analysis.most_sensitive().is_none());
    assert_eq!(analysis.tests_not_enough_data(), analysis.tests_run());
    assert_eq!(analysis.correlation.get(0, 1), None);
}
