//! CLI error types with miette diagnostics.
//!
//! Maps core, store and config errors into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use ironstack_config::ConfigError;
use ironstack_core::{CoreError, StoreError};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const STORE: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Input ────────────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ironstack::validation))]
    Validation { field: String, reason: String },

    #[error("Could not read fixture {path}")]
    #[diagnostic(
        code(ironstack::fixture),
        help("Fixtures are .json or .yaml files with an `identity` object and recorded `scalars`/`tables`.")
    )]
    Fixture {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Store ────────────────────────────────────────────────────────

    #[error("No stack stored for device {device_id}")]
    #[diagnostic(
        code(ironstack::not_found),
        help("Run: ironstack probe <fixture> --device-id {device_id}")
    )]
    NotFound { device_id: String },

    #[error(transparent)]
    #[diagnostic(
        code(ironstack::store),
        help("Check that the store directory is writable, or pass --store-dir.")
    )]
    Store(#[from] StoreError),

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(ironstack::config))]
    Config(#[from] ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render JSON: {0}")]
    #[diagnostic(code(ironstack::json))]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    #[diagnostic(code(ironstack::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. }
            | Self::Fixture { .. }
            | Self::Config(ConfigError::Validation { .. }) => exit_code::USAGE,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Store(_) => exit_code::STORE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput { field, reason } => Self::Validation {
                field: field.into(),
                reason,
            },
            CoreError::Store(err) => Self::Store(err),
        }
    }
}
