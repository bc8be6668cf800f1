//! Integration tests for the riparian binary
//!
//! These tests verify JSON output, empty inputs, and configuration layering.

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const ENV_VARS: [&str; 6] = [
    "RIPARIAN_WEIGHT_ISSUE_DENSITY",
    "RIPARIAN_WEIGHT_WATER_PROXIMITY",
    "RIPARIAN_WEIGHT_SEVERITY",
    "RIPARIAN_WEIGHT_RECURRENCE",
    "RIPARIAN_GRID_SIZE_METERS",
    "RIPARIAN_WATER_PROXIMITY_METERS",
];

fn riparian(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_riparian"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn parse_stdout(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("Output should be valid JSON")
}

/// Two critical erosion reports on one cell and a creek about 40 m east
fn scenario(dir: &Path) -> (PathBuf, PathBuf) {
    let issues = write_json(
        dir,
        "issues.json",
        &json!([
            {"id": "i1", "location": {"lat": 45.5, "lon": -122.6}, "severity": "critical",
             "category": "erosion", "reportedAt": "2024-05-01T08:00:00Z"},
            {"id": "i2", "location": {"lat": 45.5001, "lon": -122.6}, "severity": "Critical",
             "category": "erosion", "reportedAt": "2024-05-03T08:00:00Z"}
        ]),
    );
    let waterways = write_json(
        dir,
        "waterways.geojson",
        &json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "id": "w1", "properties": {"name": "Johnson Creek"},
                 "geometry": {"type": "LineString", "coordinates": [[-122.5995, 45.49], [-122.5995, 45.51]]}},
                {"type": "Feature", "id": "w2", "properties": {"name": "Far Ditch"},
                 "geometry": {"type": "LineString", "coordinates": [[-122.7, 45.49], [-122.7, 45.51]]}}
            ]
        }),
    );
    (issues, waterways)
}

#[test]
fn test_zones_json_output() {
    let dir = TempDir::new().unwrap();
    let (issues, waterways) = scenario(dir.path());

    let output = riparian(dir.path())
        .args(["zones", "--json", "--issues"])
        .arg(&issues)
        .arg("--waterways")
        .arg(&waterways)
        .output()
        .unwrap();

    let parsed = parse_stdout(&output);
    assert_eq!(parsed["status"], "success");

    let zones = parsed["data"]["zones"].as_array().unwrap();
    assert_eq!(zones.len(), 1);
    assert_eq!(zones[0]["label"], "Critical");
    assert_eq!(zones[0]["normalizedScore"], 1.0);
    assert_eq!(zones[0]["issueCount"], 2);
    assert_eq!(zones[0]["nearWater"], true);
    assert!((zones[0]["rawScore"].as_f64().unwrap() - 0.625).abs() < 1e-12);
}

#[test]
fn test_zones_empty_issues_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let (_, waterways) = scenario(dir.path());
    let issues = write_json(dir.path(), "empty.json", &json!([]));

    let output = riparian(dir.path())
        .args(["zones", "--issues"])
        .arg(&issues)
        .arg("--waterways")
        .arg(&waterways)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No priority zones"));

    let output = riparian(dir.path())
        .args(["zones", "--json", "--issues"])
        .arg(&issues)
        .arg("--waterways")
        .arg(&waterways)
        .output()
        .unwrap();
    let parsed = parse_stdout(&output);
    assert_eq!(parsed["data"]["zones"], json!([]));
}

#[test]
fn test_zones_zero_weights_give_no_zones() {
    let dir = TempDir::new().unwrap();
    let (issues, waterways) = scenario(dir.path());

    let output = riparian(dir.path())
        .args(["zones", "--json", "--weights", "0,0,0,0", "--issues"])
        .arg(&issues)
        .arg("--waterways")
        .arg(&waterways)
        .output()
        .unwrap();
    let parsed = parse_stdout(&output);
    assert_eq!(parsed["data"]["zones"], json!([]));
}

#[test]
fn test_zones_rejects_bad_weights() {
    let dir = TempDir::new().unwrap();
    let (issues, waterways) = scenario(dir.path());

    let output = riparian(dir.path())
        .args(["zones", "--weights", "0.5,0.5", "--issues"])
        .arg(&issues)
        .arg("--waterways")
        .arg(&waterways)
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_nearest_json_output() {
    let dir = TempDir::new().unwrap();
    let (issues, waterways) = scenario(dir.path());

    let output = riparian(dir.path())
        .args(["nearest", "--json", "--issues"])
        .arg(&issues)
        .arg("--waterways")
        .arg(&waterways)
        .output()
        .unwrap();

    let parsed = parse_stdout(&output);
    let results = &parsed["data"]["results"];
    assert_eq!(results["i1"]["waterwayName"], "Johnson Creek");
    let feet = results["i1"]["distanceFeet"].as_f64().unwrap();
    // 0.0005 degrees of longitude at 45.5 N is about 39 m
    assert!(feet > 120.0 && feet < 135.0, "got {} ft", feet);
}

#[test]
fn test_rank_by_severity_then_distance() {
    let dir = TempDir::new().unwrap();
    let issues = write_json(
        dir.path(),
        "issues.json",
        &json!([
            {"id": "near-low", "location": {"lat": 45.501, "lon": -122.6}, "severity": "low", "category": "litter"},
            {"id": "far-high", "location": {"lat": 45.6, "lon": -122.6}, "severity": "high", "category": "debris"},
            {"id": "mid-high", "location": {"lat": 45.55, "lon": -122.6}, "severity": "high", "category": "debris"}
        ]),
    );

    let output = riparian(dir.path())
        .args(["rank", "--json", "--lat", "45.5", "--lon", "-122.6", "--sort", "severity", "--issues"])
        .arg(&issues)
        .output()
        .unwrap();

    let parsed = parse_stdout(&output);
    let ids: Vec<&str> = parsed["data"]["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["issue"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["mid-high", "far-high", "near-low"]);
    assert_eq!(parsed["data"]["sort"], "severity");
}

#[test]
fn test_config_layering() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("riparian.toml"),
        "grid_size_meters = 250.0\n\n[weights]\nrecurrence = 0.3\n",
    )
    .unwrap();

    let output = riparian(dir.path())
        .args(["config", "--json"])
        .env("RIPARIAN_WATER_PROXIMITY_METERS", "120")
        .output()
        .unwrap();

    let parsed = parse_stdout(&output);
    let values = &parsed["data"]["values"];
    assert_eq!(values["grid_size_meters"]["source"], "File");
    assert_eq!(values["water_proximity_meters"]["source"], "Environment");
    assert_eq!(values["weights.recurrence"]["value"], "0.3");
    assert_eq!(values["weights.issue_density"]["source"], "Default");
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    let output = riparian(dir.path())
        .args(["nearest", "--issues", "missing.json", "--waterways", "missing.geojson"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.json"));
}

#[test]
fn test_nearest_skips_unreadable_waterway_entries() {
    let dir = TempDir::new().unwrap();
    let (issues, _) = scenario(dir.path());
    let waterways = write_json(
        dir.path(),
        "waterways.json",
        &json!([
            {"id": "w1", "name": "Johnson Creek",
             "geometry": {"type": "LineString", "coordinates": [[-122.5995, 45.49], [-122.5995, 45.51]]}},
            {"id": "w3", "name": "Survey Line",
             "geometry": {"type": "LineString", "coordinates": [[-122.6, 45.49, 30.0], [-122.6, 45.51, 31.0]]}}
        ]),
    );

    let output = riparian(dir.path())
        .args(["nearest", "--json", "--issues"])
        .arg(&issues)
        .arg("--waterways")
        .arg(&waterways)
        .output()
        .unwrap();

    let parsed = parse_stdout(&output);
    let results = &parsed["data"]["results"];
    assert_eq!(results["i1"]["waterwayName"], "Johnson Creek");
    assert_eq!(results["i2"]["waterwayName"], "Johnson Creek");
    assert!(String::from_utf8_lossy(&output.stderr).contains("w3"));
}

#[test]
fn test_rank_skips_unreadable_issue_entries() {
    let dir = TempDir::new().unwrap();
    let issues = write_json(
        dir.path(),
        "issues.json",
        &json!([
            {"id": "good", "location": {"lat": 45.501, "lon": -122.6}, "severity": "high", "category": "debris"},
            {"id": "no-location", "severity": "low", "category": "litter"}
        ]),
    );

    let output = riparian(dir.path())
        .args(["rank", "--json", "--lat", "45.5", "--lon", "-122.6", "--issues"])
        .arg(&issues)
        .output()
        .unwrap();

    let parsed = parse_stdout(&output);
    let ranked = parsed["data"]["issues"].as_array().unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0]["issue"]["id"], "good");
    assert!(String::from_utf8_lossy(&output.stderr).contains("no-location"));
}
