// ── Strategy 2: stack-port interface names ──
//
// FastIron names stacking ports `Stack<unit>/<port>`. Seeing them proves
// which units exist even when every stacking table is empty. No SNMP
// requests are made; the host already knows the interfaces.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::convert::{model_from_sys_descr, version_from_sys_descr};
use crate::model::{
    DeviceIdentity, MemberObservation, StackObservation, StackPortSummary, StackRole,
    TopologyShape, UnitState,
};

static STACK_PORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Stack(\d+)/(\d+)$").expect("Invalid regex pattern"));

pub(super) fn observe(identity: &DeviceIdentity) -> Option<StackObservation> {
    let mut ports: BTreeMap<u32, StackPortSummary> = BTreeMap::new();
    for iface in &identity.interfaces {
        let Some(caps) = STACK_PORT.captures(iface.name.trim()) else {
            continue;
        };
        let Some(unit) = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|u| *u > 0)
        else {
            continue;
        };
        let summary = ports.entry(unit).or_default();
        summary.total += 1;
        if iface.is_up() {
            summary.active += 1;
        }
    }

    let master = *ports.keys().next()?;
    let model = model_from_sys_descr(&identity.sys_descr);
    let version = version_from_sys_descr(&identity.sys_descr);

    let members: BTreeMap<u32, MemberObservation> = ports
        .keys()
        .map(|unit| {
            let role = if *unit == master {
                StackRole::Master
            } else {
                StackRole::Member
            };
            let member = MemberObservation {
                role,
                state: UnitState::Active,
                model: model.clone(),
                version: version.clone(),
                ..MemberObservation::default()
            };
            (*unit, member)
        })
        .collect();

    let topology = if members.len() > 1 {
        TopologyShape::Ring
    } else {
        TopologyShape::Standalone
    };

    let mut observation = StackObservation::with_conventional_master(topology, members, None);
    observation.stack_ports = ports;
    Some(observation)
}
