// ── CPU utilisation ──
//
// FOUNDRY-SN-AGENT-MIB snAgentCpuUtilTable is indexed `slot.cpu.interval`.
// On a stack the slot is the unit id. Newer firmware reports hundredths
// of a percent; older firmware only the whole-percent or deprecated value
// columns.

use ironstack_snmp::oids::cpu;
use ironstack_snmp::{Row, Table, ValueSource, leading_index};
use serde::{Deserialize, Serialize};

use crate::convert::column_i64;
use crate::detect::probe::Probe;

/// Column a reading was taken from, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CpuLoadColumn {
    HundredthPercent,
    Percent,
    Value,
}

impl CpuLoadColumn {
    const PREFERENCE: [(Self, &'static str); 3] = [
        (Self::HundredthPercent, cpu::UTIL_100TH_PERCENT),
        (Self::Percent, cpu::UTIL_PERCENT),
        (Self::Value, cpu::UTIL_VALUE),
    ];

    fn divisor(self) -> f64 {
        match self {
            Self::HundredthPercent => 100.0,
            Self::Percent | Self::Value => 1.0,
        }
    }
}

/// One CPU utilisation reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitCpuLoad {
    /// Table index, `slot.cpu.interval`.
    pub index: String,
    /// Set only on stacked devices.
    pub unit_id: Option<u32>,
    pub utilization_pct: f64,
    pub column: CpuLoadColumn,
}

impl UnitCpuLoad {
    pub fn label(&self) -> String {
        match self.unit_id {
            Some(unit) => format!("Unit {unit} CPU"),
            None => "CPU".to_owned(),
        }
    }
}

fn reading(row: &Row) -> Option<(CpuLoadColumn, f64)> {
    CpuLoadColumn::PREFERENCE.iter().find_map(|(column, name)| {
        let raw = i32::try_from(column_i64(row, name)?).ok()?;
        Some((*column, f64::from(raw) / column.divisor()))
    })
}

/// Rows with no readable column are skipped.
pub fn loads_from_table(table: &Table, stacked: bool) -> Vec<UnitCpuLoad> {
    table
        .iter()
        .filter_map(|(index, row)| {
            let (column, utilization_pct) = reading(row)?;
            Some(UnitCpuLoad {
                index: index.clone(),
                unit_id: if stacked { leading_index(index) } else { None },
                utilization_pct,
                column,
            })
        })
        .collect()
}

pub(crate) async fn read_cpu_loads<S: ValueSource>(
    probe: &Probe<'_, S>,
    stacked: bool,
) -> Vec<UnitCpuLoad> {
    loads_from_table(&probe.table(cpu::UTIL_TABLE).await, stacked)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ironstack_snmp::Value;

    use super::*;

    fn row(columns: &[(&str, i64)]) -> Row {
        columns
            .iter()
            .map(|(name, value)| ((*name).to_owned(), Value::from(*value)))
            .collect()
    }

    #[test]
    fn prefers_hundredths_then_percent_then_value() {
        let table: Table = [
            (
                "1.1.300".to_owned(),
                row(&[(cpu::UTIL_100TH_PERCENT, 1250), (cpu::UTIL_PERCENT, 12)]),
            ),
            (
                "2.1.300".to_owned(),
                row(&[(cpu::UTIL_PERCENT, 7), (cpu::UTIL_VALUE, 9)]),
            ),
            ("3.1.300".to_owned(), row(&[(cpu::UTIL_VALUE, 3)])),
            ("4.1.300".to_owned(), Row::new()),
        ]
        .into_iter()
        .collect();

        let loads = loads_from_table(&table, true);
        assert_eq!(loads.len(), 3);
        assert_eq!(loads[0].column, CpuLoadColumn::HundredthPercent);
        assert!((loads[0].utilization_pct - 12.5).abs() < 1e-9);
        assert_eq!(loads[1].column, CpuLoadColumn::Percent);
        assert!((loads[1].utilization_pct - 7.0).abs() < 1e-9);
        assert_eq!(loads[2].column, CpuLoadColumn::Value);
        assert_eq!(loads[2].label(), "Unit 3 CPU");
    }

    #[test]
    fn standalone_readings_carry_no_unit() {
        let table: Table = [("1.1.60".to_owned(), row(&[(cpu::UTIL_PERCENT, 40)]))]
            .into_iter()
            .collect();

        let loads = loads_from_table(&table, false);
        assert_eq!(loads[0].unit_id, None);
        assert_eq!(loads[0].label(), "CPU");
        assert_eq!(loads[0].index, "1.1.60");
    }

    #[test]
    fn empty_table() {
        assert!(loads_from_table(&Table::new(), true).is_empty());
    }
}
