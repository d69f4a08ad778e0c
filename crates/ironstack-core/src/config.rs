// ── Discovery tuning ──
//
// These types describe *how* discovery behaves: request deadlines,
// verbosity, and what makes a device stack-capable. They never touch
// disk. The CLI (or any host) builds a `DiscoveryConfig` and hands it in.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::DeviceIdentity;

/// Markers identifying hardware that belongs to a stackable family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityMarkers {
    /// Substrings of sysDescr, matched case-insensitively.
    pub descr_tokens: Vec<String>,
    /// sysObjectID prefixes, matched with or without the leading dot.
    pub sys_object_id_prefixes: Vec<String>,
}

impl Default for CapabilityMarkers {
    fn default() -> Self {
        Self {
            descr_tokens: vec!["Stacking System".into(), "FCX".into(), "ICX".into()],
            sys_object_id_prefixes: vec![".1.3.6.1.4.1.1991.1.3.".into()],
        }
    }
}

impl CapabilityMarkers {
    /// Whether the identity belongs to a stackable family.
    pub fn is_stack_capable(&self, identity: &DeviceIdentity) -> bool {
        let descr = identity.sys_descr.to_lowercase();
        let by_descr = self
            .descr_tokens
            .iter()
            .filter(|t| !t.trim().is_empty())
            .any(|t| descr.contains(&t.to_lowercase()));
        if by_descr {
            return true;
        }

        let oid = dotted(&identity.sys_object_id);
        oid.len() > 1
            && self
                .sys_object_id_prefixes
                .iter()
                .filter(|p| !p.trim().is_empty())
                .any(|p| oid.starts_with(&dotted(p)))
    }
}

fn dotted(oid: &str) -> String {
    let oid = oid.trim();
    if oid.starts_with('.') {
        oid.to_owned()
    } else {
        format!(".{oid}")
    }
}

/// Configuration for one `Discoverer`.
///
/// Built by the CLI or host, passed to `Discoverer`; core never reads config files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Deadline for each individual value-source request.
    pub request_timeout: Duration,
    /// Emit per-query detail events to the observer.
    pub debug: bool,
    pub capability: CapabilityMarkers,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            debug: false,
            capability: CapabilityMarkers::default(),
        }
    }
}
