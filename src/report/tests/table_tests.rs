use super::*;
use crate::report::tables;

#[test]
fn test_lipase_tidy_frame_layout() {
    let columns = vec!["Stdgang".to_string(), "Gruppe".to_string()];
    let df = tables::lipase_tidy_frame(&readings(), &columns, "Zeit").unwrap();

    assert_eq!(df.height(), 12);
    let names: Vec<String> = df.get_column_names().iter().map(|n| n.to_string()).collect();
    assert_eq!(names, vec!["Stdgang", "Gruppe", "Zeit", "pH_gekocht", "pH_ungekocht"]);
}

#[test]
fn test_lipase_result_frames() {
    let analysis = lipase_analysis();

    let drops = tables::lipase_drops_frame(&analysis).unwrap();
    assert_eq!(drops.height(), 4);
    assert!(drops.column("drop_uncooked").is_ok());

    let tests = tables::lipase_tests_frame(&analysis).unwrap();
    assert_eq!(tests.height(), 3);
    assert_eq!(tests.width(), 10);

    let pairwise = tables::lipase_pairwise_frame(&analysis).unwrap();
    assert_eq!(pairwise.height(), 2);
    assert!(pairwise.column("threshold").is_ok());
}

#[test]
fn test_tactile_frames() {
    let analysis = tactile_analysis();

    let descriptive = tables::descriptive_frame(&analysis).unwrap();
    assert_eq!(descriptive.height(), 5);
    assert_eq!(descriptive.width(), 9);

    let regions = tables::region_comparisons_frame(&analysis).unwrap();
    assert_eq!(regions.height(), 10);
    assert!(regions.column("Cohen's d").is_ok());

    let genders = tables::gender_comparisons_frame(&analysis).unwrap();
    assert_eq!(genders.height(), 5);
    assert!(genders.column("Male N").is_ok());
}
