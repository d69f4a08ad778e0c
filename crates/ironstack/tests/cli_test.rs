//! Integration tests for the `ironstack` CLI binary.
//!
//! Every test runs against a throwaway store directory and an isolated
//! config home, replaying the fixtures shipped in `fixtures/`.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// Build a [`Command`] for the `ironstack` binary with env isolation.
///
/// Clears all `IRONSTACK_*` env vars and points config and data
/// directories inside `home`.
fn ironstack_cmd(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("ironstack");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env_remove("IRONSTACK_CONFIG")
        .env_remove("IRONSTACK_OUTPUT")
        .env_remove("IRONSTACK_STORE_DIR")
        .env_remove("IRONSTACK_REQUEST_TIMEOUT_SECS")
        .env_remove("IRONSTACK_DEBUG")
        .env_remove("RUST_LOG");
    cmd
}

/// Like [`ironstack_cmd`], with the store pinned to `<home>/store`.
fn with_store(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = ironstack_cmd(home);
    cmd.arg("--store-dir").arg(home.path().join("store"));
    cmd
}

fn probe_json(home: &TempDir, fixture_path: &Path, device: &str) -> Value {
    let output = with_store(home)
        .args(["-o", "json", "probe"])
        .arg(fixture_path)
        .args(["--device-id", device])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "probe failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn units(list: &Value) -> Vec<u64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .collect()
}

/// Two-unit ICX stack reporting units 1 and 3 only.
fn write_shrunk_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("shrunk.json");
    let body = serde_json::json!({
        "identity": {
            "hostname": "core-sw1",
            "sys_descr": "Brocade Communications Systems, Inc. Stacking System ICX7450-48P",
            "sys_object_id": ".1.3.6.1.4.1.1991.1.3.62.2.1"
        },
        "scalars": {
            "FOUNDRY-SN-SWITCH-GROUP-MIB::snStackingGlobalConfigState.0": 1,
            "FOUNDRY-SN-SWITCH-GROUP-MIB::snStackingGlobalTopology.0": 2
        },
        "tables": {
            "FOUNDRY-SN-SWITCH-GROUP-MIB::snStackingOperUnitTable": {
                "1": { "snStackingOperUnitRole": 3, "snStackingOperUnitState": 1 },
                "3": { "snStackingOperUnitRole": 2, "snStackingOperUnitState": 1 }
            }
        }
    });
    std::fs::write(&path, serde_json::to_string_pretty(&body).unwrap()).unwrap();
    path
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = ironstack_cmd(&home).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    ironstack_cmd(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("probe")
            .and(predicate::str::contains("show"))
            .and(predicate::str::contains("forget")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    ironstack_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ironstack"));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    ironstack_cmd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Probe ───────────────────────────────────────────────────────────

#[test]
fn test_probe_stores_canonical_ring() {
    let home = TempDir::new().unwrap();
    let report = probe_json(&home, &fixture("icx7450-ring.yaml"), "7");

    assert_eq!(report["device_id"], 7);
    assert_eq!(report["applied"], true);
    assert_eq!(report["no_change_detected_possible"], false);
    assert_eq!(report["method"], "oper_table");
    assert_eq!(report["topology"]["topology"], "ring");
    assert_eq!(report["topology"]["unit_count"], 3);
    assert_eq!(report["topology"]["master_unit"], 1);
    assert_eq!(report["topology"]["stack_mac"], "00:24:38:aa:bb:cc");
    assert_eq!(report["hardware"], "ICX7450 Stack");
    assert_eq!(units(&report["upserted"]), vec![1, 2, 3]);

    let members = report["members"].as_array().unwrap();
    assert_eq!(members.len(), 3);
    assert_eq!(members[0]["role"], "master");
    assert_eq!(members[0]["serial"], "CYT3312K0AB");
    assert_eq!(members[0]["priority"], 200);
    assert_eq!(members[2]["model"], "ICX7450-24");
    assert_eq!(members[2]["priority"], 128);

    assert!(home.path().join("store").join("device-7.json").exists());
}

#[test]
fn test_repeat_probe_is_unchanged() {
    let home = TempDir::new().unwrap();
    probe_json(&home, &fixture("icx7450-ring.yaml"), "1");
    let report = probe_json(&home, &fixture("icx7450-ring.yaml"), "1");
    assert_eq!(report["applied"], true);
    assert_eq!(report["no_change_detected_possible"], true);
    assert!(units(&report["retired"]).is_empty());
}

#[test]
fn test_shrunk_stack_retires_missing_unit() {
    let home = TempDir::new().unwrap();
    probe_json(&home, &fixture("icx7450-ring.yaml"), "3");

    let shrunk = write_shrunk_fixture(home.path());
    let report = probe_json(&home, &shrunk, "3");
    assert_eq!(report["topology"]["topology"], "chain");
    assert_eq!(units(&report["retired"]), vec![2]);
    assert_eq!(report["members"].as_array().unwrap().len(), 2);
}

#[test]
fn test_probe_not_capable_clears() {
    let home = TempDir::new().unwrap();
    let report = probe_json(&home, &fixture("linux-host.json"), "2");
    assert_eq!(report["applied"], false);
    assert_eq!(report["cleared_no_longer_stacked"], true);
    assert!(report["topology"].is_null());
    assert!(report["members"].as_array().unwrap().is_empty());
}

#[test]
fn test_probe_table_with_poe() {
    let home = TempDir::new().unwrap();
    with_store(&home)
        .arg("probe")
        .arg(fixture("icx7450-ring.yaml"))
        .arg("--poe")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("stack state stored")
                .and(predicate::str::contains("oper_table"))
                .and(predicate::str::contains("CYT3312K1ZZ"))
                .and(predicate::str::contains("Capacity (W)"))
                .and(predicate::str::contains("748.0"))
                .and(predicate::str::contains("121.5"))
                .and(predicate::str::contains("Limit (W)"))
                .and(predicate::str::contains("6.8")),
        );
}

#[test]
fn test_json_report_carries_ports_and_cpu() {
    let home = TempDir::new().unwrap();
    let output = with_store(&home)
        .args(["-o", "json", "probe"])
        .arg(fixture("icx7450-ring.yaml"))
        .args(["--poe", "--cpu"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();

    let ports = report["poe_ports"].as_array().unwrap();
    assert_eq!(ports.len(), 2);
    assert_eq!(ports[0]["if_index"], 1);
    assert_eq!(ports[0]["control"], "enabled");
    assert_eq!(ports[0]["consumed_mw"], 6800);
    assert_eq!(ports[1]["control"], "disabled");

    let cpu = report["cpu"].as_array().unwrap();
    assert_eq!(cpu.len(), 3);
    assert_eq!(cpu[0]["unit_id"], 1);
    assert_eq!(cpu[0]["column"], "hundredth_percent");
    assert_eq!(cpu[0]["utilization_pct"], 12.75);
    assert_eq!(cpu[2]["column"], "value");
}

#[test]
fn test_cpu_table_output() {
    let home = TempDir::new().unwrap();
    with_store(&home)
        .arg("probe")
        .arg(fixture("icx7450-ring.yaml"))
        .arg("--cpu")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Unit 1 CPU")
                .and(predicate::str::contains("12.75%"))
                .and(predicate::str::contains("Unit 3 CPU")),
        );
}

#[test]
fn test_probe_yaml_output() {
    let home = TempDir::new().unwrap();
    with_store(&home)
        .args(["-o", "yaml", "probe"])
        .arg(fixture("icx7450-ring.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("unit_count: 3"));
}

#[test]
fn test_probe_device_zero_is_rejected() {
    let home = TempDir::new().unwrap();
    with_store(&home)
        .arg("probe")
        .arg(fixture("icx7450-ring.yaml"))
        .args(["--device-id", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("device id"));
}

#[test]
fn test_probe_missing_fixture() {
    let home = TempDir::new().unwrap();
    with_store(&home)
        .args(["probe", "does-not-exist.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does-not-exist.yaml"));
}

// ── Show / forget ───────────────────────────────────────────────────

#[test]
fn test_show_after_probe() {
    let home = TempDir::new().unwrap();
    probe_json(&home, &fixture("icx7450-ring.yaml"), "5");

    with_store(&home)
        .args(["show", "5"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ring")
                .and(predicate::str::contains("CYT3312K0AC"))
                .and(predicate::str::contains("00:24:38:aa:bb:cc")),
        );
}

#[test]
fn test_show_unknown_device() {
    let home = TempDir::new().unwrap();
    with_store(&home)
        .args(["show", "42"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No stack stored for device 42"));
}

#[test]
fn test_forget_removes_stack() {
    let home = TempDir::new().unwrap();
    probe_json(&home, &fixture("icx7450-ring.yaml"), "9");

    with_store(&home)
        .args(["forget", "9"])
        .assert()
        .success()
        .stderr(predicate::str::contains("removed"));
    assert!(!home.path().join("store").join("device-9.json").exists());

    with_store(&home).args(["show", "9"]).assert().code(4);
    with_store(&home).args(["forget", "9"]).assert().code(4);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_reflects_overrides() {
    let home = TempDir::new().unwrap();
    with_store(&home)
        .args(["--timeout", "9", "config"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("request_timeout_secs = 9")
                .and(predicate::str::contains("store")),
        );
}

#[test]
fn test_config_file_is_read() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("ironstack.toml");
    std::fs::write(&path, "request_timeout_secs = 12\ndebug = true\n").unwrap();

    ironstack_cmd(&home)
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("request_timeout_secs = 12")
                .and(predicate::str::contains("debug = true")),
        );
}

#[test]
fn test_zero_timeout_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    with_store(&home)
        .args(["--timeout", "0", "config"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("request_timeout_secs"));
}
