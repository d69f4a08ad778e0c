//! `ironstack config`: show the effective configuration.

use ironstack_config::Config;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub fn handle(config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let mut effective = config.clone();
    effective.store_dir = Some(config.resolved_store_dir());
    output::print_output(effective.to_toml()?.trim_end(), global.quiet);
    Ok(())
}
