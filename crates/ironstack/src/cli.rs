//! Clap derive structures for the `ironstack` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use ironstack_core::DeviceId;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ironstack -- stack topology discovery for FastIron/ICX switches
#[derive(Debug, Parser)]
#[command(
    name = "ironstack",
    version,
    about = "Infer FastIron/ICX stack topology from recorded SNMP data",
    long_about = "Replays a recorded SNMP fixture through the stack detection cascade\n\
        and reconciles the result against a local JSON store, one file per device.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "IRONSTACK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Stack store directory (overrides config)
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "IRONSTACK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Per-request SNMP timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run discovery against a recorded fixture and update the store
    Probe(ProbeArgs),

    /// Show the stored stack for a device
    Show {
        /// Device id
        device_id: DeviceId,
    },

    /// Remove everything stored for a device
    Forget {
        /// Device id
        device_id: DeviceId,
    },

    /// Print the effective configuration as TOML
    Config,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Fixture file (.json, .yaml or .yml)
    pub fixture: PathBuf,

    /// Device id the result is stored under
    #[arg(long, short = 'd', default_value = "1")]
    pub device_id: DeviceId,

    /// Also read per-unit and per-port PoE budgets
    #[arg(long)]
    pub poe: bool,

    /// Also read CPU utilisation, per unit once stacked
    #[arg(long)]
    pub cpu: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }
}
