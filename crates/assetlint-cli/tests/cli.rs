#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("assetlint-core")
        .join("tests")
        .join("fixtures")
}

fn assetlint_cmd() -> Command {
    Command::cargo_bin("assetlint-cli").expect("binary should be built")
}

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let output = assetlint_cmd()
        .args(args)
        .output()
        .expect("command should run");
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

fn project() -> String {
    fixtures_dir().join("project.json").display().to_string()
}

fn scene() -> String {
    fixtures_dir().join("scene.json").display().to_string()
}

fn rule_ids(report: &serde_json::Value) -> Vec<String> {
    report["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["rule_id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn critical_project_exits_2() {
    assetlint_cmd().arg(project()).assert().code(2);
}

#[test]
fn scene_mode_on_scene_fixture_exits_2() {
    assetlint_cmd()
        .arg(scene())
        .args(["--mode", "scene"])
        .assert()
        .code(2);
}

#[test]
fn scene_mode_without_scene_exits_0() {
    assetlint_cmd()
        .arg(project())
        .args(["--mode", "scene"])
        .assert()
        .code(0);
}

#[test]
fn warning_only_project_exits_1() {
    let manifest = json_file(
        r#"{ "materials": [{ "name": "M_Leaf", "path": "/Game/M_Leaf", "two_sided": true }] }"#,
    );

    assetlint_cmd().arg(manifest.path()).assert().code(1);
}

#[test]
fn empty_project_exits_0() {
    let manifest = json_file("{}");
    let report = run_json(&[manifest.path().to_str().unwrap()]);

    assert_eq!(report["classification"]["level"], "CLEAN");
    assert_eq!(report["summary"]["total"], 0);
    assert!(report["issues"].as_array().unwrap().is_empty());
}

#[test]
fn json_output_is_valid() {
    let report = run_json(&[&project(), "--format", "json"]);

    for key in [
        "schema_version",
        "tool",
        "source",
        "scan",
        "summary",
        "classification",
        "issues",
    ] {
        assert!(report.get(key).is_some(), "missing {key}");
    }
    assert_eq!(report["schema_version"], "0.1.0");
}

#[test]
fn json_issues_are_ranked() {
    let report = run_json(&[&project()]);

    assert_eq!(
        rule_ids(&report),
        vec![
            "R-MESH-01", "R-BP-01", "R-BP-02", "R-MAT-03", "R-TEX-01", "R-MESH-02", "R-MAT-04",
            "R-MAT-02", "R-MAT-01",
        ]
    );
    assert_eq!(report["issues"][0]["severity"], "critical");
    assert_eq!(report["issues"][0]["category"], "mesh");
    assert_eq!(report["issues"][0]["impact"], 100.0);
}

#[test]
fn json_classification_for_project() {
    let report = run_json(&[&project()]);

    assert_eq!(report["classification"]["level"], "CRITICAL");
    assert_eq!(report["classification"]["exit_code"], 2);
    assert_eq!(report["classification"]["highest_severity"], "critical");

    let triggered: Vec<&str> = report["classification"]["triggered_rule_ids"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap())
        .collect();
    assert!(triggered.contains(&"R-MESH-01"));
    assert!(triggered.contains(&"R-BP-02"));
    assert!(!triggered.contains(&"R-PROJ-01"));
}

#[test]
fn json_scan_records_mode_and_thresholds() {
    let report = run_json(&[&scene(), "--mode", "scene"]);

    assert_eq!(report["scan"]["mode"], "scene");
    assert_eq!(report["scan"]["status"], "ok");
    assert_eq!(report["scan"]["thresholds"]["max_triangles_per_mesh"], 100000);
    assert_eq!(report["scan"]["thresholds"]["max_texture_size"], 2048);
    assert_eq!(
        rule_ids(&report),
        vec!["R-MESH-01", "R-TEX-01", "R-MESH-02"]
    );
}

#[test]
fn json_empty_scene_status() {
    let report = run_json(&[&project(), "--mode", "scene"]);

    assert_eq!(report["scan"]["status"], "empty_scene");
    assert_eq!(report["classification"]["level"], "CLEAN");
}

#[test]
fn json_source_has_hash() {
    let report = run_json(&[&project()]);

    assert_eq!(report["source"]["hash"]["algorithm"], "sha256");
    let hash = report["source"]["hash"]["value"].as_str().unwrap();
    assert_eq!(hash.len(), 64, "SHA-256 hex should be 64 chars");
    assert!(report["source"]["size_bytes"].as_u64().unwrap() > 0);
}

#[test]
fn json_tool_info_reflects_binary() {
    let report = run_json(&[&project()]);

    assert_eq!(report["tool"]["name"], "assetlint-cli");
    assert_eq!(report["tool"]["version"], "0.1.0");
    assert!(report["tool"]["commit"].is_null());
}

#[test]
fn commit_flag_embeds_hash_in_report() {
    let report = run_json(&[&project(), "--commit", "abc123def456"]);
    assert_eq!(report["tool"]["commit"], "abc123def456");
}

#[test]
fn text_output_shows_badges_and_fixes() {
    assetlint_cmd()
        .arg(project())
        .args(["--format", "text"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Classification: CRITICAL"))
        .stdout(predicate::str::contains("[CRITICAL] High Poly Count: SM_Statue"))
        .stdout(predicate::str::contains("(Impact: 100%)"))
        .stdout(predicate::str::contains("[INFO]"))
        .stdout(predicate::str::contains("Fix: "))
        .stdout(predicate::str::contains("Asset: /Game/Props/SM_Statue"));
}

#[test]
fn csv_output_has_header_and_one_row_per_issue() {
    let output = assetlint_cmd()
        .arg(project())
        .args(["--format", "csv"])
        .output()
        .expect("command should run");

    let text = String::from_utf8(output.stdout).expect("utf-8 output");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "severity,category,title,description,impact,asset_path,suggested_fix"
    );
    assert_eq!(lines.len(), 10);
    assert!(lines[1].starts_with("critical,mesh,"));
    assert!(lines[1].contains(",100.0,/Game/Props/SM_Statue,"));
    assert!(lines.iter().all(|l| l.split(',').count() == 7), "{text}");
}

#[test]
fn min_severity_filters_output_but_not_exit_code() {
    let output = assetlint_cmd()
        .arg(project())
        .args(["--min-severity", "critical"])
        .output()
        .expect("command should run");

    assert_eq!(output.status.code(), Some(2));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        rule_ids(&report),
        vec!["R-MESH-01", "R-BP-01", "R-BP-02", "R-MAT-03"]
    );
}

#[test]
fn category_filter_keeps_order() {
    let report = run_json(&[&project(), "--category", "material"]);

    assert_eq!(
        rule_ids(&report),
        vec!["R-MAT-03", "R-MAT-04", "R-MAT-02", "R-MAT-01"]
    );
    assert_eq!(report["classification"]["exit_code"], 2);
}

#[test]
fn filter_to_empty_category_still_reports_classification() {
    assetlint_cmd()
        .arg(project())
        .args(["--category", "audio", "--format", "text"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Classification: CRITICAL"))
        .stdout(predicate::str::contains("[CRITICAL]").not());
}

#[test]
fn threshold_flags_change_findings() {
    let report = run_json(&[
        &project(),
        "--max-triangles",
        "500000",
        "--max-texture-size",
        "4096",
    ]);

    let ids = rule_ids(&report);
    assert!(!ids.contains(&"R-MESH-01".to_string()));
    assert!(!ids.contains(&"R-TEX-01".to_string()));
    assert!(ids.contains(&"R-MESH-02".to_string()));
    assert_eq!(report["scan"]["thresholds"]["max_triangles_per_mesh"], 500000);
}

#[test]
fn config_file_overrides_defaults_and_flags_override_config() {
    let config = json_file(r#"{ "max_triangles_per_mesh": 500000, "max_blueprint_nodes": 1000 }"#);
    let config_path = config.path().to_str().unwrap().to_string();

    let report = run_json(&[&project(), "--config", &config_path]);
    assert_eq!(report["scan"]["thresholds"]["max_triangles_per_mesh"], 500000);
    assert_eq!(report["scan"]["thresholds"]["max_blueprint_nodes"], 1000);
    assert_eq!(report["scan"]["thresholds"]["max_texture_size"], 2048);
    assert!(!rule_ids(&report).contains(&"R-BP-01".to_string()));

    let report = run_json(&[
        &project(),
        "--config",
        &config_path,
        "--max-triangles",
        "200000",
    ]);
    assert_eq!(report["scan"]["thresholds"]["max_triangles_per_mesh"], 200000);
    assert!(rule_ids(&report).contains(&"R-MESH-01".to_string()));
}

#[test]
fn zero_threshold_is_rejected() {
    assetlint_cmd()
        .arg(project())
        .args(["--max-texture-size", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_texture_size"));
}

#[test]
fn malformed_config_fails() {
    let config = json_file("{ not json");

    assetlint_cmd()
        .arg(project())
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn out_flag_writes_to_file() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let out_path = tmp.path().to_path_buf();

    assetlint_cmd()
        .arg(project())
        .arg("--out")
        .arg(&out_path)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());

    let contents = std::fs::read_to_string(&out_path).expect("read output file");
    let parsed: serde_json::Value = serde_json::from_str(&contents).expect("file should be JSON");
    assert_eq!(parsed["classification"]["level"], "CRITICAL");
}

#[test]
fn out_flag_with_csv_format() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let out_path = tmp.path().to_path_buf();

    assetlint_cmd()
        .arg(scene())
        .args(["--mode", "scene", "--format", "csv", "--out"])
        .arg(&out_path)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());

    let contents = std::fs::read_to_string(&out_path).expect("read output file");
    assert!(contents.starts_with("severity,category,"));
    assert_eq!(contents.lines().count(), 4);
}

#[test]
fn missing_manifest_arg_fails() {
    assetlint_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn nonexistent_file_fails() {
    assetlint_cmd()
        .arg("/tmp/does_not_exist_assetlint_test.json")
        .assert()
        .failure();
}

#[test]
fn malformed_manifest_fails() {
    let manifest = json_file("{ \"meshes\": 3 }");
    assetlint_cmd().arg(manifest.path()).assert().failure();
}

#[test]
fn invalid_format_flag_fails() {
    assetlint_cmd()
        .arg(project())
        .args(["--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn deterministic_json_across_runs() {
    let a = run_json(&[&project()]);
    let b = run_json(&[&project()]);

    assert_eq!(a["issues"], b["issues"]);
    assert_eq!(a["summary"], b["summary"]);
    assert_eq!(a["classification"], b["classification"]);
    assert_eq!(a["source"]["hash"], b["source"]["hash"]);
}

#[test]
fn help_flag_prints_usage() {
    assetlint_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rank optimization issues"));
}

#[test]
fn version_flag_prints_version() {
    assetlint_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("assetlint"));
}
