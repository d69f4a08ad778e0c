//! Configuration for ironstack.
//!
//! Defaults, then a TOML file at the platform config path, then
//! `IRONSTACK_*` environment variables, translated into
//! `ironstack_core::DiscoveryConfig`. The core never reads files itself.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ironstack_core::{CapabilityMarkers, DiscoveryConfig};

/// Prefix for environment overrides. Nested keys use `__`
/// (`IRONSTACK_CAPABILITY__DESCR_TOKENS`).
pub const ENV_PREFIX: &str = "IRONSTACK_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Per-request deadline for SNMP lookups.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Emit per-query detail events.
    #[serde(default)]
    pub debug: bool,

    /// Directory of the JSON stack store. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,

    #[serde(default)]
    pub capability: Capability,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
            debug: false,
            store_dir: None,
            capability: Capability::default(),
        }
    }
}

/// Which devices count as stack-capable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Capability {
    #[serde(default = "default_descr_tokens")]
    pub descr_tokens: Vec<String>,

    #[serde(default = "default_object_id_prefixes")]
    pub sys_object_id_prefixes: Vec<String>,
}

impl Default for Capability {
    fn default() -> Self {
        Self {
            descr_tokens: default_descr_tokens(),
            sys_object_id_prefixes: default_object_id_prefixes(),
        }
    }
}

fn default_timeout() -> u64 {
    5
}
fn default_descr_tokens() -> Vec<String> {
    CapabilityMarkers::default().descr_tokens
}
fn default_object_id_prefixes() -> Vec<String> {
    CapabilityMarkers::default().sys_object_id_prefixes
}

impl Config {
    /// Check the values figment can't.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "request_timeout_secs".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        let markers = &self.capability;
        if markers.descr_tokens.iter().all(|t| t.trim().is_empty())
            && markers
                .sys_object_id_prefixes
                .iter()
                .all(|p| p.trim().is_empty())
        {
            return Err(ConfigError::Validation {
                field: "capability".into(),
                reason: "at least one descr token or sysObjectID prefix is required".into(),
            });
        }
        Ok(())
    }

    /// Translate to the core's runtime configuration.
    pub fn to_discovery_config(&self) -> DiscoveryConfig {
        DiscoveryConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            debug: self.debug,
            capability: CapabilityMarkers {
                descr_tokens: self.capability.descr_tokens.clone(),
                sys_object_id_prefixes: self.capability.sys_object_id_prefixes.clone(),
            },
        }
    }

    /// Effective store directory.
    pub fn resolved_store_dir(&self) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(default_store_dir)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("net", "ironstack", "ironstack")
}

fn home_fallback(kind: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(kind);
    p.push("ironstack");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default JSON store directory.
pub fn default_store_dir() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(".local/share").join("stacks"),
        |dirs| dirs.data_dir().join("stacks"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load from an explicit file path (missing files are skipped) + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = figment_for(path).extract()?;
    config.validate()?;
    Ok(config)
}

/// Load from the platform config path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}
