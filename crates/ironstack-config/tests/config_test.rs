#![allow(clippy::unwrap_used)]
// Integration tests for loading configuration files from disk.

use std::time::Duration;

use ironstack_config::{ConfigError, load_config_from};

// ── Helpers ─────────────────────────────────────────────────────────

fn write_config(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, body).unwrap();
    path
}

// ── Loading ─────────────────────────────────────────────────────────

#[test]
fn test_file_values_reach_discovery_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
            request_timeout_secs = 3
            store_dir = "/srv/ironstack/stacks"

            [capability]
            descr_tokens = ["ICX", "FastIron"]
            sys_object_id_prefixes = [".1.3.6.1.4.1.1991.1.3.", ".1.3.6.1.4.1.25053.3.1."]
        "#,
    );

    let config = load_config_from(&path).unwrap();
    assert_eq!(
        config.resolved_store_dir(),
        std::path::PathBuf::from("/srv/ironstack/stacks")
    );

    let discovery = config.to_discovery_config();
    assert_eq!(discovery.request_timeout, Duration::from_secs(3));
    assert!(!discovery.debug);
    assert_eq!(discovery.capability.descr_tokens.len(), 2);
    assert_eq!(discovery.capability.sys_object_id_prefixes.len(), 2);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.request_timeout_secs, 5);
    assert!(config.store_dir.is_none());
}

#[test]
fn test_malformed_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "request_timeout_secs = \"soon\"\n");
    assert!(matches!(
        load_config_from(&path),
        Err(ConfigError::Figment(_))
    ));
}

#[test]
fn test_zero_timeout_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "request_timeout_secs = 0\n");
    assert!(matches!(
        load_config_from(&path),
        Err(ConfigError::Validation { .. })
    ));
}
