//! `ironstack probe`: replay a fixture through discovery and reconcile.

use ironstack_core::{
    Discoverer, PortPowerBudget, ReconciliationResult, StackMember, StackStore, UnitCpuLoad,
    UnitPowerBudget,
};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use super::{MemberRow, ensure_valid, topology_lines};
use crate::cli::{GlobalOpts, ProbeArgs};
use crate::error::CliError;
use crate::fixture::DeviceFixture;
use crate::output::{self, or_dash};

#[derive(Debug, Serialize)]
struct ProbeReport {
    #[serde(flatten)]
    result: ReconciliationResult,
    members: Vec<StackMember>,
    #[serde(skip_serializing_if = "Option::is_none")]
    poe: Option<Vec<UnitPowerBudget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    poe_ports: Option<Vec<PortPowerBudget>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cpu: Option<Vec<UnitCpuLoad>>,
}

fn watts(w: Option<f64>) -> String {
    w.map_or_else(|| "-".into(), |w| format!("{w:.1}"))
}

#[derive(Tabled)]
struct PoeRow {
    #[tabled(rename = "Unit")]
    unit: u32,
    #[tabled(rename = "Capacity (W)")]
    capacity: String,
    #[tabled(rename = "Consumed (W)")]
    consumed: String,
    #[tabled(rename = "Headroom (W)")]
    headroom: String,
    #[tabled(rename = "Used")]
    utilization: String,
}

impl From<&UnitPowerBudget> for PoeRow {
    fn from(b: &UnitPowerBudget) -> Self {
        Self {
            unit: b.unit_id,
            capacity: watts(b.capacity_watts()),
            consumed: watts(b.consumed_watts()),
            headroom: watts(b.headroom_watts()),
            utilization: b
                .utilization_pct()
                .map_or_else(|| "-".into(), |pct| format!("{pct:.0}%")),
        }
    }
}

#[derive(Tabled)]
struct PoePortRow {
    #[tabled(rename = "ifIndex")]
    if_index: u32,
    #[tabled(rename = "Control")]
    control: String,
    #[tabled(rename = "Limit (W)")]
    limit: String,
    #[tabled(rename = "Consumed (W)")]
    consumed: String,
}

impl From<&PortPowerBudget> for PoePortRow {
    fn from(p: &PortPowerBudget) -> Self {
        Self {
            if_index: p.if_index,
            control: p.control.to_string(),
            limit: watts(p.limit_watts()),
            consumed: watts(p.consumed_watts()),
        }
    }
}

#[derive(Tabled)]
struct CpuRow {
    #[tabled(rename = "CPU")]
    label: String,
    #[tabled(rename = "Index")]
    index: String,
    #[tabled(rename = "Used")]
    utilization: String,
}

impl From<&UnitCpuLoad> for CpuRow {
    fn from(c: &UnitCpuLoad) -> Self {
        Self {
            label: c.label(),
            index: c.index.clone(),
            utilization: format!("{:.2}%", c.utilization_pct),
        }
    }
}

fn outcome(result: &ReconciliationResult) -> String {
    let base = if result.applied {
        "stack state stored"
    } else {
        "no stack data, stored state cleared"
    };
    if result.no_change_detected_possible {
        format!("{base} (unchanged)")
    } else {
        base.to_owned()
    }
}

fn unit_list(units: &[u32]) -> String {
    if units.is_empty() {
        return "-".into();
    }
    units
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn detail(report: &ProbeReport) -> String {
    let result = &report.result;
    let mut lines = vec![
        format!("Device:    {}", result.device_id),
        format!("Outcome:   {}", outcome(result)),
        format!("Method:    {}", or_dash(result.method)),
    ];
    if let Some(topology) = &result.topology {
        lines.extend(topology_lines(topology));
    }
    lines.push(format!("Hardware:  {}", or_dash(result.hardware.as_deref())));
    lines.push(format!("Upserted:  {}", unit_list(&result.upserted)));
    lines.push(format!("Retired:   {}", unit_list(&result.retired)));

    let members = if report.members.is_empty() {
        String::new()
    } else {
        let rows: Vec<MemberRow> = report.members.iter().map(MemberRow::from).collect();
        output::table(&rows)
    };
    let poe = match &report.poe {
        Some(budgets) if budgets.is_empty() => "No PoE budget reported".to_owned(),
        Some(budgets) => {
            let rows: Vec<PoeRow> = budgets.iter().map(PoeRow::from).collect();
            output::table(&rows)
        }
        None => String::new(),
    };
    let ports = match &report.poe_ports {
        Some(ports) if !ports.is_empty() => {
            let rows: Vec<PoePortRow> = ports.iter().map(PoePortRow::from).collect();
            output::table(&rows)
        }
        _ => String::new(),
    };
    let cpu = match &report.cpu {
        Some(loads) if loads.is_empty() => "No CPU utilisation reported".to_owned(),
        Some(loads) => {
            let rows: Vec<CpuRow> = loads.iter().map(CpuRow::from).collect();
            output::table(&rows)
        }
        None => String::new(),
    };
    output::sections(&[lines.join("\n"), members, poe, ports, cpu])
}

pub async fn handle(
    discoverer: &Discoverer,
    args: ProbeArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    ensure_valid(args.device_id)?;
    let (identity, source) = DeviceFixture::load(&args.fixture)?.into_parts();

    let result = discoverer
        .reconcile_stack_topology(args.device_id, &identity, &source)
        .await?;
    let (poe, poe_ports) = if args.poe {
        (
            Some(discoverer.unit_power_budgets(args.device_id, &source).await?),
            Some(discoverer.port_power_budgets(args.device_id, &source).await?),
        )
    } else {
        (None, None)
    };
    let cpu = if args.cpu {
        Some(discoverer.unit_cpu_loads(args.device_id, &source).await?)
    } else {
        None
    };
    info!(
        device = %args.device_id,
        requests = source.total_calls(),
        "fixture replay finished"
    );

    let report = ProbeReport {
        members: discoverer.store().list_members(args.device_id)?,
        result,
        poe,
        poe_ports,
        cpu,
    };
    let out = output::render(&global.output, &report, detail)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
