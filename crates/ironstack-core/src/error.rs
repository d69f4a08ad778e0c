// ── Core error types ──
//
// Missing SNMP data is never an error here: it drives the cascade. What
// surfaces to callers is malformed input and persistence failure.

use thiserror::Error;

use crate::store::StoreError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input errors ─────────────────────────────────────────────────
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    // ── Persistence errors ───────────────────────────────────────────
    /// Surfaced unmasked; the device's stored record is left as it was.
    #[error("Stack store failed: {0}")]
    Store(#[from] StoreError),
}

impl CoreError {
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_convert() {
        let err: CoreError = StoreError::Backend {
            message: "disk full".into(),
        }
        .into();
        assert!(err.is_store_error());
        assert_eq!(
            err.to_string(),
            "Stack store failed: store backend error: disk full"
        );
    }
}
