// ── Strategy 6: standalone synthesis ──
//
// A stack-capable unit that shows no stack data is a stack of one.
// Each field is fetched independently and may stay empty.

use ironstack_snmp::oids::{bridge, chassis};
use ironstack_snmp::{Value, ValueSource};

use super::probe::Probe;
use crate::convert::{model_from_sys_descr, value_mac, version_from_sys_descr};
use crate::hardware::normalize_hardware;
use crate::model::{DeviceIdentity, MemberObservation, StackObservation, StackRole, UnitState};

pub(super) async fn observe<S: ValueSource>(
    probe: &Probe<'_, S>,
    identity: &DeviceIdentity,
) -> StackObservation {
    let serial = probe
        .first_scalar(&chassis::SERIAL_SCALARS)
        .await
        .as_ref()
        .and_then(Value::as_text);
    let mac = probe
        .scalar(bridge::BASE_ADDRESS)
        .await
        .as_ref()
        .and_then(value_mac);

    let model = model_from_sys_descr(&identity.sys_descr).or_else(|| {
        identity
            .hardware
            .as_deref()
            .map(normalize_hardware)
            .filter(|h| !h.is_empty())
    });

    StackObservation::standalone(MemberObservation {
        role: StackRole::Standalone,
        state: UnitState::Active,
        serial,
        model,
        version: version_from_sys_descr(&identity.sys_descr),
        mac,
        ..MemberObservation::default()
    })
}
