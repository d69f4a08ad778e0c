// ── Stack domain types ──
//
// `StackObservation` is what a detection strategy produced this cycle;
// `StackTopology` and `StackMember` are what the store keeps between
// cycles.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity_id::{DeviceId, MacAddress};

/// Priority the firmware assigns when none is configured.
pub const DEFAULT_PRIORITY: u32 = 128;

// ── Enumerations ────────────────────────────────────────────────────

/// Physical shape of the stack.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TopologyShape {
    Ring,
    Chain,
    Standalone,
    #[default]
    Unknown,
}

impl TopologyShape {
    /// Ring or chain: more than one unit cabled together.
    pub fn is_stacked(self) -> bool {
        matches!(self, Self::Ring | Self::Chain)
    }

    pub fn is_ring(self) -> bool {
        matches!(self, Self::Ring)
    }

    pub fn is_standalone(self) -> bool {
        matches!(self, Self::Standalone)
    }
}

/// Role of a unit within the stack.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StackRole {
    Master,
    Member,
    Standalone,
    #[default]
    Unknown,
}

impl StackRole {
    pub fn is_master(self) -> bool {
        matches!(self, Self::Master)
    }

    pub fn is_standalone(self) -> bool {
        matches!(self, Self::Standalone)
    }
}

/// Operational state of a unit.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UnitState {
    Active,
    Remote,
    Reserved,
    Empty,
    #[default]
    Unknown,
}

impl UnitState {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Reserved and empty slots hold no hardware.
    pub fn is_present(self) -> bool {
        matches!(self, Self::Active | Self::Remote)
    }
}

// ── Observation ─────────────────────────────────────────────────────

/// One unit as seen this cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberObservation {
    pub role: StackRole,
    pub state: UnitState,
    pub serial: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub mac: Option<MacAddress>,
    pub priority: u32,
}

impl Default for MemberObservation {
    fn default() -> Self {
        Self {
            role: StackRole::Unknown,
            state: UnitState::Unknown,
            serial: None,
            model: None,
            version: None,
            mac: None,
            priority: DEFAULT_PRIORITY,
        }
    }
}

/// Stack-port link summary for one unit (interface heuristic only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackPortSummary {
    pub total: u32,
    pub active: u32,
}

impl StackPortSummary {
    /// Fraction of stack ports that are up, 0.0 when there are none.
    pub fn active_ratio(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.active) / f64::from(self.total)
        }
    }
}

/// Why an observation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObservationError {
    #[error("unit count must be positive")]
    ZeroUnits,

    #[error("unit id 0 is not a valid unit")]
    ZeroUnitId,

    #[error("unit count {declared} disagrees with {members} observed members")]
    UnitCountMismatch { declared: u32, members: usize },

    #[error("standalone topology declared for {unit_count} units")]
    StandaloneWithMultipleUnits { unit_count: u32 },

    #[error("master unit {master} is not among the observed members")]
    MasterNotMember { master: u32 },
}

/// Stack state produced by one detection strategy during one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackObservation {
    pub topology: TopologyShape,
    pub unit_count: u32,
    pub master_unit: Option<u32>,
    /// Master was picked by lowest-unit convention, not reported by the device.
    #[serde(default)]
    pub master_by_convention: bool,
    pub stack_mac: Option<MacAddress>,
    #[serde(default)]
    pub members: BTreeMap<u32, MemberObservation>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub stack_ports: BTreeMap<u32, StackPortSummary>,
}

impl StackObservation {
    /// Observation carrying member data, with the unit count taken from
    /// the members and the master taken from their reported roles.
    pub fn from_members(
        topology: TopologyShape,
        members: BTreeMap<u32, MemberObservation>,
        stack_mac: Option<MacAddress>,
    ) -> Self {
        let master_unit = first_master(&members);
        Self {
            topology,
            unit_count: count_units(&members),
            master_unit,
            master_by_convention: false,
            stack_mac,
            members,
            stack_ports: BTreeMap::new(),
        }
    }

    /// Observation with members whose master is the lowest unit id.
    pub fn with_conventional_master(
        topology: TopologyShape,
        members: BTreeMap<u32, MemberObservation>,
        stack_mac: Option<MacAddress>,
    ) -> Self {
        let master_unit = members.keys().next().copied();
        Self {
            topology,
            unit_count: count_units(&members),
            master_unit,
            master_by_convention: master_unit.is_some(),
            stack_mac,
            members,
            stack_ports: BTreeMap::new(),
        }
    }

    /// Observation that only establishes that a stack exists.
    pub fn detection_only(topology: TopologyShape, unit_count: u32) -> Self {
        Self {
            topology,
            unit_count,
            master_unit: None,
            master_by_convention: false,
            stack_mac: None,
            members: BTreeMap::new(),
            stack_ports: BTreeMap::new(),
        }
    }

    /// Single-unit standalone observation for unit 1.
    pub fn standalone(member: MemberObservation) -> Self {
        Self {
            topology: TopologyShape::Standalone,
            unit_count: 1,
            master_unit: None,
            master_by_convention: false,
            stack_mac: None,
            members: BTreeMap::from([(1, member)]),
            stack_ports: BTreeMap::new(),
        }
    }

    pub fn unit_ids(&self) -> BTreeSet<u32> {
        self.members.keys().copied().collect()
    }

    pub fn has_member_data(&self) -> bool {
        !self.members.is_empty()
    }

    pub fn validate(&self) -> Result<(), ObservationError> {
        if self.unit_count == 0 {
            return Err(ObservationError::ZeroUnits);
        }
        if self.members.contains_key(&0) {
            return Err(ObservationError::ZeroUnitId);
        }
        if !self.members.is_empty() && count_units(&self.members) != self.unit_count {
            return Err(ObservationError::UnitCountMismatch {
                declared: self.unit_count,
                members: self.members.len(),
            });
        }
        if self.topology.is_standalone() && self.unit_count != 1 {
            return Err(ObservationError::StandaloneWithMultipleUnits {
                unit_count: self.unit_count,
            });
        }
        if let Some(master) = self.master_unit {
            if !self.members.is_empty() && !self.members.contains_key(&master) {
                return Err(ObservationError::MasterNotMember { master });
            }
        }
        Ok(())
    }
}

/// First unit, ascending, whose reported role is master.
pub fn first_master(members: &BTreeMap<u32, MemberObservation>) -> Option<u32> {
    members
        .iter()
        .find(|(_, m)| m.role.is_master())
        .map(|(unit, _)| *unit)
}

fn count_units(members: &BTreeMap<u32, MemberObservation>) -> u32 {
    u32::try_from(members.len()).unwrap_or(u32::MAX)
}

// ── Persisted records ───────────────────────────────────────────────

/// Persisted stack summary, one per device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackTopology {
    pub device_id: DeviceId,
    pub topology: TopologyShape,
    pub unit_count: u32,
    pub master_unit: Option<u32>,
    /// The master was chosen as the lowest unit, not reported by the device.
    #[serde(default)]
    pub master_by_convention: bool,
    pub stack_mac: Option<MacAddress>,
}

impl StackTopology {
    pub fn from_observation(device_id: DeviceId, observation: &StackObservation) -> Self {
        Self {
            device_id,
            topology: observation.topology,
            unit_count: observation.unit_count,
            master_unit: observation.master_unit,
            master_by_convention: observation.master_by_convention,
            stack_mac: observation.stack_mac.clone(),
        }
    }

    /// More than one unit, whatever the detected shape.
    pub fn is_stacked(&self) -> bool {
        self.unit_count > 1
    }

    pub fn is_ring(&self) -> bool {
        self.topology.is_ring()
    }
}

/// Persisted unit, unique on (device, unit id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackMember {
    pub device_id: DeviceId,
    pub unit_id: u32,
    pub role: StackRole,
    pub state: UnitState,
    pub serial: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub mac: Option<MacAddress>,
    pub priority: u32,
}

impl StackMember {
    pub fn from_observation(device_id: DeviceId, unit_id: u32, member: &MemberObservation) -> Self {
        Self {
            device_id,
            unit_id,
            role: member.role,
            state: member.state,
            serial: member.serial.clone(),
            model: member.model.clone(),
            version: member.version.clone(),
            mac: member.mac.clone(),
            priority: member.priority,
        }
    }

    pub fn is_master(&self) -> bool {
        self.role.is_master()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn member(role: StackRole) -> MemberObservation {
        MemberObservation {
            role,
            state: UnitState::Active,
            ..MemberObservation::default()
        }
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&TopologyShape::Ring).unwrap(), "\"ring\"");
        assert_eq!(serde_json::to_string(&StackRole::Master).unwrap(), "\"master\"");
        assert_eq!(UnitState::Reserved.to_string(), "reserved");
        assert_eq!("CHAIN".parse::<TopologyShape>().unwrap(), TopologyShape::Chain);
    }

    #[test]
    fn from_members_picks_first_reported_master() {
        let members = BTreeMap::from([
            (1, member(StackRole::Member)),
            (2, member(StackRole::Master)),
            (3, member(StackRole::Master)),
        ]);
        let obs = StackObservation::from_members(TopologyShape::Ring, members, None);
        assert_eq!(obs.unit_count, 3);
        assert_eq!(obs.master_unit, Some(2));
        assert!(!obs.master_by_convention);
        assert!(obs.validate().is_ok());
    }

    #[test]
    fn from_members_without_master_role_leaves_master_unset() {
        let members = BTreeMap::from([(1, member(StackRole::Member))]);
        let obs = StackObservation::from_members(TopologyShape::Standalone, members, None);
        assert_eq!(obs.master_unit, None);
    }

    #[test]
    fn conventional_master_is_lowest_unit() {
        let members = BTreeMap::from([
            (9, member(StackRole::Member)),
            (5, member(StackRole::Member)),
        ]);
        let obs = StackObservation::with_conventional_master(TopologyShape::Ring, members, None);
        assert_eq!(obs.master_unit, Some(5));
        assert!(obs.master_by_convention);
    }

    #[test]
    fn topology_keeps_conventional_master_flag() {
        let members = BTreeMap::from([
            (2, member(StackRole::Member)),
            (4, member(StackRole::Member)),
        ]);
        let obs = StackObservation::with_conventional_master(TopologyShape::Chain, members, None);
        let topology = StackTopology::from_observation(DeviceId::new(3), &obs);
        assert!(topology.master_by_convention);

        let json = serde_json::to_string(&topology).unwrap();
        let back: StackTopology = serde_json::from_str(&json).unwrap();
        assert_eq!(back, topology);
    }

    #[test]
    fn topology_without_flag_reads_as_reported_master() {
        let raw = r#"{"device_id":1,"topology":"ring","unit_count":2,"master_unit":1,"stack_mac":null}"#;
        let topology: StackTopology = serde_json::from_str(raw).unwrap();
        assert!(!topology.master_by_convention);
        assert_eq!(topology.master_unit, Some(1));
    }

    #[test]
    fn validate_rejects_standalone_with_many_units() {
        let obs = StackObservation::detection_only(TopologyShape::Standalone, 2);
        assert_eq!(
            obs.validate(),
            Err(ObservationError::StandaloneWithMultipleUnits { unit_count: 2 })
        );
    }

    #[test]
    fn validate_rejects_count_mismatch_and_foreign_master() {
        let mut obs = StackObservation::standalone(member(StackRole::Standalone));
        obs.unit_count = 2;
        obs.topology = TopologyShape::Ring;
        assert!(matches!(
            obs.validate(),
            Err(ObservationError::UnitCountMismatch { declared: 2, .. })
        ));

        let mut obs = StackObservation::standalone(member(StackRole::Standalone));
        obs.master_unit = Some(4);
        assert_eq!(
            obs.validate(),
            Err(ObservationError::MasterNotMember { master: 4 })
        );
    }

    #[test]
    fn validate_rejects_zero_units() {
        let obs = StackObservation::detection_only(TopologyShape::Unknown, 0);
        assert_eq!(obs.validate(), Err(ObservationError::ZeroUnits));

        let mut obs = StackObservation::standalone(member(StackRole::Standalone));
        let unit = obs.members.remove(&1).unwrap();
        obs.members.insert(0, unit);
        assert_eq!(obs.validate(), Err(ObservationError::ZeroUnitId));
    }

    #[test]
    fn detection_only_may_carry_master_free_count() {
        let obs = StackObservation::detection_only(TopologyShape::Unknown, 4);
        assert!(obs.validate().is_ok());
        assert!(!obs.has_member_data());
    }

    #[test]
    fn stack_port_ratio() {
        let ports = StackPortSummary { total: 2, active: 1 };
        assert!((ports.active_ratio() - 0.5).abs() < f64::EPSILON);
        assert!(StackPortSummary::default().active_ratio().abs() < f64::EPSILON);
    }
}
