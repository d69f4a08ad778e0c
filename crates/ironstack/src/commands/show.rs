//! `ironstack show`: print the stored stack for a device.

use ironstack_core::{DeviceId, Discoverer, StackMember, StackStore, StackTopology};
use serde::Serialize;

use super::{MemberRow, ensure_valid, topology_lines};
use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct StoredStack {
    topology: StackTopology,
    members: Vec<StackMember>,
}

fn detail(stack: &StoredStack) -> String {
    let mut lines = vec![format!("Device:    {}", stack.topology.device_id)];
    lines.extend(topology_lines(&stack.topology));
    let members = if stack.members.is_empty() {
        "No member records".to_owned()
    } else {
        let rows: Vec<MemberRow> = stack.members.iter().map(MemberRow::from).collect();
        output::table(&rows)
    };
    output::sections(&[lines.join("\n"), members])
}

pub fn handle(
    discoverer: &Discoverer,
    device_id: DeviceId,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    ensure_valid(device_id)?;
    let record = discoverer.store().load(device_id)?;
    let Some(topology) = record.topology else {
        return Err(CliError::NotFound {
            device_id: device_id.to_string(),
        });
    };

    let stack = StoredStack {
        topology,
        members: record.members.into_values().collect(),
    };
    let out = output::render(&global.output, &stack, detail)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
