//! End-to-end runs of the lipase pipeline on block-structured fixtures

use biolab_processor::constants::{LIPASE_MEASUREMENT_FILE, LIPASE_PARTICIPANT_FILE, outputs};
use biolab_processor::{AnalysisConfig, Experiment, LabError, LabProcessor};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LIPASE_EXPORT: &str = "\
Datum,Stdgang,Gruppe,Zeit,pH_gekocht,pH_ungekocht
01.01.2024,A,1,0,\"7,00\",\"7,00\"
,,,5,\"6,95\",\"6,60\"
,,,10,\"6,90\",\"6,10\"
,,,,,
01.01.2024,A,2,0,\"7,10\",\"7,05\"
,,,5,\"7,00\",\"6,50\"
,,,10,\"6,95\",\"5,95\"
02.01.2024,B,1,,,
,,,0,\"7,00\",\"7,10\"
,,,5,\"6,90\",\"6,80\"
,,,10,\"6,85\",\"6,40\"
,B,2,0,\"7,05\",\"7,00\"
,,,5,-,\"6,75\"
,,,10,\"6,80\",\"6,30\"
,,,15,NA,
";

fn processor(data_dir: &Path, output_dir: &Path) -> LabProcessor {
    let config = AnalysisConfig::default()
        .with_data_dir(data_dir.to_path_buf())
        .with_output_dir(output_dir.to_path_buf())
        .without_charts();
    LabProcessor::new(config).unwrap().with_progress(false)
}

#[test]
fn test_lipase_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("data");
    let out_dir = temp_dir.path().join("out");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join(LIPASE_MEASUREMENT_FILE), LIPASE_EXPORT).unwrap();

    let results = processor(&data_dir, &out_dir).run(&[Experiment::Lipase]).unwrap();
    assert_eq!(results.len(), 1);
    let (experiment, stats) = &results[0];
    assert_eq!(*experiment, Experiment::Lipase);

    // 12 timed readings plus the trailing line with time but no values
    assert_eq!(stats.records_parsed, 13);
    assert_eq!(stats.records_retained, 12);
    assert_eq!(stats.records_dropped, 1);
    assert_eq!(stats.tests_run, 5);
    assert_eq!(stats.files_written.len(), 5);

    let tidy = fs::read_to_string(out_dir.join(outputs::LIPASE_TIDY)).unwrap();
    let lines: Vec<&str> = tidy.lines().collect();
    assert_eq!(lines[0], "Datum,Stdgang,Gruppe,Zeit,pH_gekocht,pH_ungekocht");
    assert_eq!(lines.len(), 13);
    // Metadata restored on measurement-only lines
    assert!(lines[2].starts_with("01.01.2024,A,1,5.0,6.95,6.6"));
    // Session B, group 2 inherits the date of the previous block
    assert!(lines[10].starts_with("02.01.2024,B,2,0.0"));

    let drops = fs::read_to_string(out_dir.join(outputs::LIPASE_DROPS)).unwrap();
    assert_eq!(drops.lines().count(), 5);

    let tests = fs::read_to_string(out_dir.join(outputs::LIPASE_TESTS)).unwrap();
    assert!(tests.lines().nth(1).unwrap().starts_with("paired t-test (uncooked vs cooked),both"));
    assert_eq!(tests.lines().count(), 4);

    let report = fs::read_to_string(out_dir.join(outputs::LIPASE_REPORT)).unwrap();
    assert!(report.contains("Experimental groups: 4"));
    assert!(!out_dir.join(outputs::LIPASE_CURVES).exists());
}

#[test]
fn test_lipase_rerun_is_identical() {
    let temp_dir = TempDir::new().unwrap();
    let out_a = temp_dir.path().join("a");
    let out_b = temp_dir.path().join("b");
    fs::write(temp_dir.path().join(LIPASE_MEASUREMENT_FILE), LIPASE_EXPORT).unwrap();

    processor(temp_dir.path(), &out_a).run(&[Experiment::Lipase]).unwrap();
    processor(temp_dir.path(), &out_b).run(&[Experiment::Lipase]).unwrap();

    for name in [outputs::LIPASE_TIDY, outputs::LIPASE_DROPS, outputs::LIPASE_TESTS] {
        assert_eq!(
            fs::read_to_string(out_a.join(name)).unwrap(),
            fs::read_to_string(out_b.join(name)).unwrap()
        );
    }
}

#[test]
fn test_lipase_participant_list_is_optional() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(LIPASE_MEASUREMENT_FILE), LIPASE_EXPORT).unwrap();
    fs::write(
        temp_dir.path().join(LIPASE_PARTICIPANT_FILE),
        "Datum,Stdgang,Person,Geschlecht\n01.01.2024,A,1,m\n",
    )
    .unwrap();

    let out_dir = temp_dir.path().join("out");
    let results = processor(temp_dir.path(), &out_dir).run(&[Experiment::Lipase]).unwrap();
    assert_eq!(results[0].1.records_retained, 12);
}

#[test]
fn test_semicolon_export() {
    let temp_dir = TempDir::new().unwrap();
    let export = "Datum;Stdgang;Gruppe;Zeit;gekocht;ungekocht\n\
                  01.01.2024;A;1;0;7,00;7,00\n;;;5;6,90;6,50\n\
                  ;B;1;0;7,10;7,00\n;;;5;7,00;6,60\n";
    fs::write(temp_dir.path().join(LIPASE_MEASUREMENT_FILE), export).unwrap();

    let out_dir = temp_dir.path().join("out");
    let config = AnalysisConfig::default()
        .with_data_dir(temp_dir.path().to_path_buf())
        .with_output_dir(out_dir.clone())
        .with_delimiter(';')
        .without_charts();
    let results = LabProcessor::new(config)
        .unwrap()
        .with_progress(false)
        .run(&[Experiment::Lipase])
        .unwrap();

    assert_eq!(results[0].1.records_retained, 4);
    let tidy = fs::read_to_string(out_dir.join(outputs::LIPASE_TIDY)).unwrap();
    assert!(tidy.contains("01.01.2024,B,1,5.0,7.0,6.6"));
}

#[test]
fn test_missing_lipase_export_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let err = processor(temp_dir.path(), &temp_dir.path().join("out"))
        .run(&[Experiment::Lipase])
        .unwrap_err();
    assert!(matches!(err, LabError::FileNotFound { .. }));
}
