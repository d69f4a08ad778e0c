use thiserror::Error;

/// Top-level error type for the `ironstack-snmp` crate.
///
/// A failed request is distinct from "no data": an empty walk or an absent
/// scalar is `Ok`, never an error. `ironstack-core` folds both into the
/// same absent-value handling but logs them separately.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// The request failed outright (unreachable agent, auth failure, etc.)
    #[error("SNMP request for {oid} failed: {message}")]
    Transport { oid: String, message: String },

    /// The request did not complete within the configured timeout.
    #[error("SNMP request for {oid} timed out after {timeout_ms}ms")]
    Timeout { oid: String, timeout_ms: u64 },

    // ── Fixtures ────────────────────────────────────────────────────
    /// Reading a fixture file failed.
    #[error("fixture IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON fixture could not be parsed.
    #[error("invalid JSON fixture: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML fixture could not be parsed.
    #[error("invalid YAML fixture: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Fixture path has an extension we don't know how to load.
    #[error("unsupported fixture format: {path}")]
    UnsupportedFixture { path: String },
}

impl Error {
    /// Returns `true` if the request timed out rather than failing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this error came from a live request rather than
    /// from loading fixture data.
    pub fn is_request_error(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}
