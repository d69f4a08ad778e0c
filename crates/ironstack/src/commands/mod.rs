//! Command dispatch: resolves configuration, opens the store, and hands
//! off to the per-command handlers.

pub mod config_cmd;
pub mod forget;
pub mod probe;
pub mod show;

use std::sync::Arc;

use ironstack_config::Config;
use ironstack_core::{DeviceId, Discoverer, JsonFileStore};
use tabled::Tabled;
use tracing::debug;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output::or_dash;

/// Dispatch a store-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    let config = effective_config(global)?;
    if let Command::Config = cmd {
        return config_cmd::handle(&config, global);
    }

    let store_dir = config.resolved_store_dir();
    debug!(store = %store_dir.display(), "opening stack store");
    let store = JsonFileStore::open(store_dir)?;
    let discoverer = Discoverer::new(config.to_discovery_config(), Arc::new(store));

    match cmd {
        Command::Probe(args) => probe::handle(&discoverer, args, global).await,
        Command::Show { device_id } => show::handle(&discoverer, device_id, global),
        Command::Forget { device_id } => forget::handle(&discoverer, device_id, global),
        // Config and Completions are handled before the store is opened
        Command::Config | Command::Completions(_) => Ok(()),
    }
}

/// Config file + environment, then command-line overrides.
pub fn effective_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = global
        .config
        .clone()
        .unwrap_or_else(ironstack_config::config_path);
    let mut config = ironstack_config::load_config_from(&path)?;

    if let Some(secs) = global.timeout {
        config.request_timeout_secs = secs;
    }
    if let Some(dir) = &global.store_dir {
        config.store_dir = Some(dir.clone());
    }
    config.validate()?;
    Ok(config)
}

pub(crate) fn ensure_valid(device_id: DeviceId) -> Result<(), CliError> {
    if device_id.is_valid() {
        Ok(())
    } else {
        Err(CliError::Validation {
            field: "device id".into(),
            reason: "must be a positive integer".into(),
        })
    }
}

// ── Shared table rows ────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct MemberRow {
    #[tabled(rename = "Unit")]
    unit: u32,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Priority")]
    priority: u32,
}

impl From<&ironstack_core::StackMember> for MemberRow {
    fn from(m: &ironstack_core::StackMember) -> Self {
        Self {
            unit: m.unit_id,
            role: m.role.to_string(),
            state: m.state.to_string(),
            model: or_dash(m.model.as_deref()),
            serial: or_dash(m.serial.as_deref()),
            version: or_dash(m.version.as_deref()),
            mac: or_dash(m.mac.as_ref()),
            priority: m.priority,
        }
    }
}

pub(crate) fn topology_lines(topology: &ironstack_core::StackTopology) -> Vec<String> {
    vec![
        format!("Topology:  {}", topology.topology),
        format!("Units:     {}", topology.unit_count),
        match topology.master_unit {
            Some(unit) if topology.master_by_convention => {
                format!("Master:    {unit} (lowest unit)")
            }
            master => format!("Master:    {}", or_dash(master)),
        },
        format!("Stack MAC: {}", or_dash(topology.stack_mac.as_ref())),
    ]
}
