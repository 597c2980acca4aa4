//! Integration tests for run configuration.

mod common;

use common::*;
use recon_core::{
    config::{split_path_list, RunConfig},
    ReconError,
};
use std::path::PathBuf;

fn full_config() -> RunConfig {
    RunConfig {
        system:      Some("system.csv".into()),
        banks:       vec!["alpha.csv".into()],
        start:       Some(date("2025-08-01")),
        end:         Some(date("2025-08-31")),
        output_json: None,
    }
}

#[test]
fn complete_config_validates_into_a_plan() {
    let plan = full_config().validate().unwrap();
    assert_eq!(plan.system, PathBuf::from("system.csv"));
    assert_eq!(plan.window.start, date("2025-08-01"));
    assert_eq!(plan.window.end, date("2025-08-31"));
    assert!(plan.output_json.is_none());
}

#[test]
fn each_missing_setting_is_reported() {
    let cases: [(&str, fn(&mut RunConfig)); 4] = [
        ("system", |c| c.system = None),
        ("bank", |c| c.banks.clear()),
        ("start", |c| c.start = None),
        ("end", |c| c.end = None),
    ];
    for (name, strip) in cases {
        let mut cfg = full_config();
        strip(&mut cfg);
        match cfg.validate() {
            Err(ReconError::MissingSetting(missing)) => assert_eq!(missing, name),
            other => panic!("expected MissingSetting({name}), got {other:?}"),
        }
    }
}

#[test]
fn inverted_window_still_validates() {
    let mut cfg = full_config();
    cfg.start = Some(date("2025-09-01"));
    let plan = cfg.validate().unwrap();
    assert!(plan.window.is_inverted());
}

#[test]
fn flags_override_file_values() {
    let file = full_config();
    let flags = RunConfig {
        end: Some(date("2025-08-15")),
        banks: vec!["beta.csv".into(), "gamma.csv".into()],
        output_json: Some("out.json".into()),
        ..RunConfig::default()
    };

    let merged = file.merge(flags);

    assert_eq!(merged.system, Some(PathBuf::from("system.csv")));
    assert_eq!(merged.banks, [PathBuf::from("beta.csv"), PathBuf::from("gamma.csv")]);
    assert_eq!(merged.start, Some(date("2025-08-01")));
    assert_eq!(merged.end, Some(date("2025-08-15")));
    assert_eq!(merged.output_json, Some(PathBuf::from("out.json")));
}

#[test]
fn loads_json_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");
    std::fs::write(
        &path,
        r#"{ "system": "sys.csv", "banks": ["a.csv", "b.csv"], "start": "2025-08-01", "end": "2025-08-02" }"#,
    )
    .unwrap();

    let cfg = RunConfig::load(&path).unwrap();

    assert_eq!(cfg.banks.len(), 2);
    assert_eq!(cfg.start, Some(date("2025-08-01")));
    assert!(cfg.output_json.is_none());
}

#[test]
fn unknown_config_keys_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");
    std::fs::write(&path, r#"{ "sytem": "typo.csv" }"#).unwrap();

    let err = RunConfig::load(&path).unwrap_err();
    assert!(matches!(err, ReconError::Config { .. }), "got {err:?}");
}

#[test]
fn path_list_skips_blank_entries() {
    assert_eq!(
        split_path_list(" a.csv, ,b.csv,,"),
        [PathBuf::from("a.csv"), PathBuf::from("b.csv")]
    );
    assert!(split_path_list("").is_empty());
}
