// ── Strategy 1: canonical oper-table walk ──

use std::collections::BTreeMap;

use ironstack_snmp::ValueSource;
use ironstack_snmp::oids::{chassis, stacking};
use tracing::warn;

use super::probe::Probe;
use crate::classify::classify_topology;
use crate::convert::{oper_row_to_member, rows_by_unit, value_mac};
use crate::model::{StackObservation, TopologyShape};

pub(super) async fn observe<S: ValueSource>(probe: &Probe<'_, S>) -> Option<StackObservation> {
    let oper = rows_by_unit(probe.table(stacking::OPER_UNIT_TABLE).await);
    if oper.is_empty() {
        return None;
    }

    let chassis_rows = rows_by_unit(probe.table(chassis::UNIT_TABLE).await);
    let members: BTreeMap<_, _> = oper
        .iter()
        .map(|(unit, row)| (*unit, oper_row_to_member(row, chassis_rows.get(unit))))
        .collect();

    let default_code = if members.len() == 1 { 3 } else { 0 };
    let code = probe
        .integer(stacking::GLOBAL_TOPOLOGY)
        .await
        .unwrap_or(default_code);
    let mut topology = classify_topology(code);
    if topology.is_standalone() && members.len() > 1 {
        warn!(
            units = members.len(),
            "agent reports standalone topology for a multi-unit stack; treating as unknown"
        );
        topology = TopologyShape::Unknown;
    }

    let stack_mac = probe
        .scalar(stacking::GLOBAL_MAC)
        .await
        .as_ref()
        .and_then(value_mac);

    Some(StackObservation::from_members(topology, members, stack_mac))
}
