//! `ironstack forget`: drop a device's stored stack.

use ironstack_core::{DeviceId, Discoverer};

use super::ensure_valid;
use crate::cli::GlobalOpts;
use crate::error::CliError;

pub fn handle(
    discoverer: &Discoverer,
    device_id: DeviceId,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    ensure_valid(device_id)?;
    if !discoverer.forget(device_id)? {
        return Err(CliError::NotFound {
            device_id: device_id.to_string(),
        });
    }
    if !global.quiet {
        eprintln!("Stack state for device {device_id} removed");
    }
    Ok(())
}
