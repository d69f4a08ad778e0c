// ── Value-to-domain conversions ──
//
// Pulls individual fields out of loosely-typed SNMP rows. Every
// extraction is independently nullable: a missing or malformed column
// yields `None` (or the documented default), never an error.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use ironstack_snmp::oids::{chassis, stacking};
use ironstack_snmp::{Row, Table, Value, leading_index};
use regex::Regex;

use crate::classify::{classify_role, classify_state};
use crate::model::{DEFAULT_PRIORITY, MacAddress, MemberObservation, StackRole, UnitState};

static MODEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:FCX|ICX)\d+[A-Z0-9-]*").expect("Invalid regex pattern")
});

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:IronWare|FastIron)\s+Version\s+([0-9][0-9A-Za-z.]*)")
        .expect("Invalid regex pattern")
});

// ── Field helpers ───────────────────────────────────────────────────

pub(crate) fn column_i64(row: &Row, column: &str) -> Option<i64> {
    row.get(column).and_then(Value::as_i64)
}

pub(crate) fn column_text(row: &Row, column: &str) -> Option<String> {
    row.get(column).and_then(Value::as_text)
}

/// MAC from raw octets or any textual rendering.
pub(crate) fn value_mac(value: &Value) -> Option<MacAddress> {
    match value {
        Value::Octets(bytes) if bytes.len() == 6 => MacAddress::from_octets(bytes),
        other => other.as_text().as_deref().and_then(MacAddress::parse),
    }
}

/// Priority column, falling back to the firmware default when absent or
/// out of range.
pub(crate) fn priority(raw: Option<i64>) -> u32 {
    raw.and_then(|p| u32::try_from(p).ok())
        .unwrap_or(DEFAULT_PRIORITY)
}

/// Re-key a walked table by unit id. Indexes that don't start with a
/// positive integer are dropped; when several rows share a unit the
/// first (by index order) wins.
pub(crate) fn rows_by_unit(table: Table) -> BTreeMap<u32, Row> {
    let mut units = BTreeMap::new();
    for (index, row) in table {
        if let Some(unit) = leading_index(&index) {
            units.entry(unit).or_insert(row);
        }
    }
    units
}

// ── Model / version extraction ──────────────────────────────────────

/// Model name from a unit description or part number.
///
/// Returns the first FCX/ICX model token, or the trimmed description
/// itself when none is present.
pub fn extract_model(description: &str) -> Option<String> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        MODEL_PATTERN
            .find(trimmed)
            .map_or(trimmed, |m| m.as_str())
            .to_owned(),
    )
}

/// Model token from sysDescr. Unlike [`extract_model`], free text is
/// never returned as a model.
pub fn model_from_sys_descr(sys_descr: &str) -> Option<String> {
    MODEL_PATTERN
        .find(sys_descr)
        .map(|m| m.as_str().to_owned())
}

/// Firmware version from sysDescr (`IronWare Version 08.0.30uT311`).
pub fn version_from_sys_descr(sys_descr: &str) -> Option<String> {
    VERSION_PATTERN
        .captures(sys_descr)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('.').to_owned())
}

// ── Row conversions ─────────────────────────────────────────────────

/// One `snStackingOperUnitTable` row, backfilled from the matching
/// `snChasUnitTable` row when there is one.
pub(crate) fn oper_row_to_member(row: &Row, chassis_row: Option<&Row>) -> MemberObservation {
    let model = chassis_row
        .and_then(|c| column_text(c, chassis::UNIT_PART_NUMBER))
        .or_else(|| column_text(row, stacking::OPER_DESCRIPTION))
        .as_deref()
        .and_then(extract_model);

    MemberObservation {
        role: classify_role(column_i64(row, stacking::OPER_ROLE).unwrap_or(0)),
        state: classify_state(column_i64(row, stacking::OPER_STATE).unwrap_or(0)),
        serial: chassis_row.and_then(|c| column_text(c, chassis::UNIT_SERIAL)),
        model,
        version: column_text(row, stacking::OPER_IMAGE_VERSION),
        mac: row.get(stacking::OPER_MAC).and_then(value_mac),
        priority: priority(column_i64(row, stacking::OPER_PRIORITY)),
    }
}

/// One `snStackingConfigUnitTable` row. The table carries no role or
/// state, so every configured unit is treated as an active member.
pub(crate) fn config_row_to_member(row: &Row) -> MemberObservation {
    MemberObservation {
        role: StackRole::Member,
        state: UnitState::Active,
        priority: priority(column_i64(row, stacking::CONFIG_PRIORITY)),
        ..MemberObservation::default()
    }
}
