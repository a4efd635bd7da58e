use super::*;
use crate::block_parser::{ParseStats, TidyStats};
use crate::constants::outputs;
use crate::report::Reporter;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_lipase_artifacts_without_charts() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("nested").join("out");
    let reporter = Reporter::new(&out, false).unwrap();

    let written = reporter
        .write_lipase(
            &readings(),
            &lipase_analysis(),
            "Zeit",
            &ParseStats::default(),
            &TidyStats::default(),
        )
        .unwrap();

    assert_eq!(written.len(), 5);
    assert!(!out.join(outputs::LIPASE_CURVES).exists());

    let tidy = fs::read_to_string(out.join(outputs::LIPASE_TIDY)).unwrap();
    let mut lines = tidy.lines();
    assert_eq!(lines.next(), Some("Stdgang,Gruppe,Zeit,pH_gekocht,pH_ungekocht"));
    assert_eq!(lines.count(), 12);

    assert!(out.join(outputs::LIPASE_REPORT).exists());
}

#[test]
fn test_tactile_artifacts_without_charts() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = Reporter::new(temp_dir.path(), false).unwrap();

    let written = reporter
        .write_tactile(&observations(), &tactile_analysis())
        .unwrap();

    assert_eq!(written.len(), 4);
    let descriptive = fs::read_to_string(temp_dir.path().join(outputs::TACTILE_DESCRIPTIVE)).unwrap();
    assert!(descriptive.starts_with("Body Region,n,mean,median,std,min,max,q25,q75"));
    assert_eq!(descriptive.lines().count(), 6);

    let report = fs::read_to_string(temp_dir.path().join(outputs::TACTILE_REPORT)).unwrap();
    assert!(report.contains("TACTILE SENSITIVITY ANALYSIS REPORT"));
}
