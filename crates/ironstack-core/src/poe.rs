// ── PoE power budgets ──
//
// FOUNDRY-POE-MIB snAgentPoeUnitTable reports, per stack unit, the PoE
// budget and the power drawn against it, both in milliwatts. The port
// table carries the same pair per interface. Switches without PoE return
// empty tables.

use std::collections::BTreeMap;

use ironstack_snmp::oids::poe;
use ironstack_snmp::{Table, ValueSource, leading_index};
use serde::{Deserialize, Serialize};

use crate::convert::column_i64;
use crate::detect::probe::Probe;

/// PoE budget of one stack unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPowerBudget {
    pub unit_id: u32,
    /// Budget in milliwatts; only positive readings count.
    pub capacity_mw: Option<u64>,
    /// Current draw in milliwatts.
    pub consumed_mw: Option<u64>,
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn watts(milliwatts: u64) -> f64 {
    milliwatts as f64 / 1000.0
}

impl UnitPowerBudget {
    pub fn capacity_watts(&self) -> Option<f64> {
        self.capacity_mw.map(watts)
    }

    pub fn consumed_watts(&self) -> Option<f64> {
        self.consumed_mw.map(watts)
    }

    /// Budget left, when both readings are known.
    pub fn headroom_mw(&self) -> Option<u64> {
        Some(self.capacity_mw?.saturating_sub(self.consumed_mw?))
    }

    pub fn headroom_watts(&self) -> Option<f64> {
        self.headroom_mw().map(watts)
    }

    /// Consumption as a percentage of capacity.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn utilization_pct(&self) -> Option<f64> {
        let capacity = self.capacity_mw?;
        let consumed = self.consumed_mw?;
        Some(consumed as f64 * 100.0 / capacity as f64)
    }
}

/// Merge the two walked columns by unit index.
pub fn budgets_from_table(table: &Table) -> Vec<UnitPowerBudget> {
    let mut units: BTreeMap<u32, UnitPowerBudget> = BTreeMap::new();
    for (index, row) in table {
        let Some(unit_id) = leading_index(index) else {
            continue;
        };
        let capacity_mw = column_i64(row, poe::UNIT_MAX_POWER)
            .filter(|mw| *mw > 0)
            .and_then(|mw| u64::try_from(mw).ok());
        let consumed_mw =
            column_i64(row, poe::UNIT_CONSUMED_POWER).and_then(|mw| u64::try_from(mw).ok());
        if capacity_mw.is_none() && consumed_mw.is_none() {
            continue;
        }
        units.entry(unit_id).or_insert(UnitPowerBudget {
            unit_id,
            capacity_mw,
            consumed_mw,
        });
    }
    units.into_values().collect()
}

pub(crate) async fn read_unit_budgets<S: ValueSource>(probe: &Probe<'_, S>) -> Vec<UnitPowerBudget> {
    budgets_from_table(&probe.table(poe::UNIT_TABLE).await)
}

// ── Ports ───────────────────────────────────────────────────────────

/// `snAgentPoePortControl`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PoeControl {
    #[default]
    NotCapable,
    Disabled,
    Enabled,
    LegacyEnabled,
    Unknown,
}

impl PoeControl {
    /// Absent readings count as not capable.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            None | Some(1) => Self::NotCapable,
            Some(2) => Self::Disabled,
            Some(3) => Self::Enabled,
            Some(4) => Self::LegacyEnabled,
            Some(_) => Self::Unknown,
        }
    }

    pub fn is_capable(self) -> bool {
        !matches!(self, Self::NotCapable)
    }
}

/// PoE allocation and draw of one interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortPowerBudget {
    pub if_index: u32,
    /// `snAgentPoePortNumber` as the agent reports it.
    pub port_number: Option<i64>,
    pub control: PoeControl,
    /// Allocated limit in milliwatts; only positive readings count.
    pub limit_mw: Option<u64>,
    pub consumed_mw: Option<u64>,
}

impl PortPowerBudget {
    pub fn limit_watts(&self) -> Option<f64> {
        self.limit_mw.map(watts)
    }

    pub fn consumed_watts(&self) -> Option<f64> {
        self.consumed_mw.map(watts)
    }

    pub fn headroom_mw(&self) -> Option<u64> {
        Some(self.limit_mw?.saturating_sub(self.consumed_mw?))
    }
}

/// Interface index of a port-table row: the last index component.
fn port_if_index(index: &str) -> Option<u32> {
    let last = index.trim().trim_end_matches('.').rsplit('.').next()?;
    last.parse::<u32>().ok().filter(|n| *n > 0)
}

/// Rows without the port-number column or on non-capable ports are skipped.
pub fn ports_from_table(table: &Table) -> Vec<PortPowerBudget> {
    let mut ports: BTreeMap<u32, PortPowerBudget> = BTreeMap::new();
    for (index, row) in table {
        let Some(if_index) = port_if_index(index) else {
            continue;
        };
        if !row.contains_key(poe::PORT_NUMBER) {
            continue;
        }
        let control = PoeControl::from_code(column_i64(row, poe::PORT_CONTROL));
        if !control.is_capable() {
            continue;
        }
        ports.entry(if_index).or_insert(PortPowerBudget {
            if_index,
            port_number: column_i64(row, poe::PORT_NUMBER),
            control,
            limit_mw: column_i64(row, poe::PORT_WATTAGE)
                .filter(|mw| *mw > 0)
                .and_then(|mw| u64::try_from(mw).ok()),
            consumed_mw: column_i64(row, poe::PORT_CONSUMED)
                .and_then(|mw| u64::try_from(mw).ok()),
        });
    }
    ports.into_values().collect()
}

pub(crate) async fn read_port_budgets<S: ValueSource>(probe: &Probe<'_, S>) -> Vec<PortPowerBudget> {
    ports_from_table(&probe.table(poe::PORT_TABLE).await)
}
