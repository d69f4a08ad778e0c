//! Device fixture files.
//!
//! A fixture is one device's identity plus the SNMP data it answered
//! with, in JSON or YAML:
//!
//! ```yaml
//! identity:
//!   hostname: core-sw1
//!   sys_descr: "Brocade ... ICX6450-48, IronWare Version 08.0.30"
//!   sys_object_id: 1.3.6.1.4.1.1991.1.3.48.2.1
//! scalars:
//!   FOUNDRY-SN-SWITCH-GROUP-MIB::snStackingGlobalConfigState.0: 1
//! tables:
//!   FOUNDRY-SN-SWITCH-GROUP-MIB::snStackingOperUnitTable:
//!     "1": { snStackingOperUnitRole: 3, snStackingOperUnitState: 1 }
//! failures: []
//! stalled: []
//! ```

use std::path::Path;

use ironstack_core::DeviceIdentity;
use ironstack_snmp::{FixtureSource, Snapshot, load_document};
use serde::{Deserialize, Serialize};

use crate::error::CliError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceFixture {
    pub identity: DeviceIdentity,
    #[serde(flatten)]
    pub snapshot: Snapshot,
}

impl DeviceFixture {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        load_document(path).map_err(|e| CliError::Fixture {
            path: path.display().to_string(),
            source: Box::new(e),
        })
    }

    pub fn into_parts(self) -> (DeviceIdentity, FixtureSource) {
        (self.identity, FixtureSource::new(self.snapshot))
    }
}
