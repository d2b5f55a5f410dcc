// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use simplelog::{Config, LevelFilter, TestLogger};
use std::fs;
use std::path::PathBuf;
use takeoff_core::search::suggest;
use takeoff_core::{open_dataset, Dataset, DatasetError, Field, Settings, TakeoffError};
use tempfile::tempdir;

const SHEET: &str = "\
ICAO_Code,FAA_Designator,Manufacturer,Model_FAA,Wingspan_ft_without_winglets_sharklets,Wingspan_ft_with_winglets_sharklets,Length_ft,MTOW_lb,AAC,Approach_Speed_knot,Registry_Notes
A320,A320,Airbus,A-320,111.9,117.5,123.3,\"172,000\",C,138,
B738,B738,Boeing,737-800,112.6,117.4,129.5,174200,D,142,popular
C172,C172,Cessna,172 Skyhawk,36.1,,27.2,2450,A,,
";

fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

#[test]
fn test_load_csv_from_disk() {
    init_logger();
    let dir = tempdir().unwrap();
    let path = dir.path().join("aircraft.csv");
    fs::write(&path, SHEET).unwrap();

    let ds = Dataset::load_csv(&path).unwrap();
    assert_eq!(ds.len(), 3);

    let a320 = ds.find_by_model("a-320").unwrap();
    assert_eq!(a320.number(Field::Mtow), Some(172000.0));
    assert_eq!(a320.text(Field::Aac), Some("C"));
    assert_eq!(a320.number(Field::ApproachSpeed), Some(138.0));

    let b738 = ds.find_by_model("737-800").unwrap();
    assert_eq!(
        b738.extra.get("Registry_Notes").map(String::as_str),
        Some("popular")
    );

    assert_eq!(suggest("cessna", ds.records()).len(), 1);
}

#[test]
fn test_missing_file_is_io_error() {
    init_logger();
    let dir = tempdir().unwrap();
    let err = Dataset::load_csv(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, DatasetError::Io(_)));
}

#[test]
fn test_open_dataset_uses_settings_path() {
    init_logger();
    let dir = tempdir().unwrap();
    let path = dir.path().join("aircraft.csv");
    fs::write(&path, SHEET).unwrap();

    let settings = Settings {
        dataset_path: Some(path),
        ..Settings::default()
    };
    let ds = open_dataset(None, &settings).unwrap();
    assert_eq!(ds.len(), 3);

    let err = open_dataset(Some(PathBuf::from("/definitely/missing.csv")), &settings).unwrap_err();
    assert!(matches!(err, TakeoffError::Dataset(DatasetError::Io(_))));
}
