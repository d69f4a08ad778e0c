// ── Strategy 5: legacy and vendor OIDs ──
//
// A value at any of these proves stack data exists but says nothing
// reliable about the members.

use ironstack_snmp::ValueSource;
use ironstack_snmp::oids::legacy;
use tracing::debug;

use super::probe::Probe;
use crate::model::{StackObservation, TopologyShape};

pub(super) async fn observe<S: ValueSource>(probe: &Probe<'_, S>) -> Option<StackObservation> {
    let mut found = false;
    let mut member_count = None;

    for (label, oid) in legacy::ALTERNATES {
        let Some(value) = probe.scalar(oid).await else {
            continue;
        };
        debug!(label, oid, "alternate stack OID answered");
        found = true;
        if oid == legacy::STACK_MEMBER_COUNT {
            member_count = value
                .as_i64()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0);
        }
    }

    found.then(|| StackObservation::detection_only(TopologyShape::Unknown, member_count.unwrap_or(1)))
}
