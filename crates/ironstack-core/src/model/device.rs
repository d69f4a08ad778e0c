// ── Device identity ──
//
// What the host application already knows about a device before stack
// discovery runs. Nothing here is fetched by this crate.

use serde::{Deserialize, Serialize};

/// A network interface as known to the host's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub name: String,
    /// Operational status, when the host has polled it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oper_up: Option<bool>,
}

impl NetworkInterface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            oper_up: None,
        }
    }

    pub fn with_oper_up(mut self, up: bool) -> Self {
        self.oper_up = Some(up);
        self
    }

    pub fn is_up(&self) -> bool {
        self.oper_up == Some(true)
    }
}

impl From<&str> for NetworkInterface {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Identity attributes of the device under discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Management hostname, used for logging.
    pub hostname: String,

    /// Name advertised by the agent (sysName). Falls back to `hostname`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys_name: Option<String>,

    #[serde(default)]
    pub sys_descr: String,

    #[serde(default)]
    pub sys_object_id: String,

    /// Hardware string the host previously recorded, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,

    #[serde(default)]
    pub interfaces: Vec<NetworkInterface>,
}

impl DeviceIdentity {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Self::default()
        }
    }

    pub fn with_sys_name(mut self, name: impl Into<String>) -> Self {
        self.sys_name = Some(name.into());
        self
    }

    pub fn with_sys_descr(mut self, descr: impl Into<String>) -> Self {
        self.sys_descr = descr.into();
        self
    }

    pub fn with_sys_object_id(mut self, oid: impl Into<String>) -> Self {
        self.sys_object_id = oid.into();
        self
    }

    pub fn with_hardware(mut self, hardware: impl Into<String>) -> Self {
        self.hardware = Some(hardware.into());
        self
    }

    pub fn with_interfaces<I, N>(mut self, interfaces: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NetworkInterface>,
    {
        self.interfaces = interfaces.into_iter().map(Into::into).collect();
        self
    }

    /// The name the device advertises, or the hostname when it advertises none.
    pub fn advertised_name(&self) -> &str {
        self.sys_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.hostname)
    }
}
