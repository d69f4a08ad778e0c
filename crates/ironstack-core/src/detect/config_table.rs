// ── Strategy 4: configuration unit table ──
//
// Some firmware populates snStackingConfigUnitTable while the oper table
// stays empty. The table says which units are configured, not what they
// are doing, so roles and states are assumed.

use std::collections::BTreeMap;

use ironstack_snmp::ValueSource;
use ironstack_snmp::oids::stacking;

use super::probe::Probe;
use crate::classify::classify_topology;
use crate::convert::{config_row_to_member, rows_by_unit, value_mac};
use crate::model::{StackObservation, TopologyShape};

pub(super) async fn observe<S: ValueSource>(probe: &Probe<'_, S>) -> Option<StackObservation> {
    let rows = rows_by_unit(probe.table(stacking::CONFIG_UNIT_TABLE).await);
    if rows.is_empty() {
        return None;
    }

    let members: BTreeMap<_, _> = rows
        .iter()
        .map(|(unit, row)| (*unit, config_row_to_member(row)))
        .collect();

    let declared = classify_topology(probe.integer(stacking::GLOBAL_TOPOLOGY).await.unwrap_or(0));
    let topology = match declared {
        TopologyShape::Ring | TopologyShape::Chain if members.len() > 1 => declared,
        _ if members.len() > 1 => TopologyShape::Ring,
        _ => TopologyShape::Standalone,
    };

    let stack_mac = probe
        .scalar(stacking::GLOBAL_MAC)
        .await
        .as_ref()
        .and_then(value_mac);

    Some(StackObservation::with_conventional_master(
        topology, members, stack_mac,
    ))
}
