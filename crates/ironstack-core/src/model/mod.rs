// ── Domain model ──

pub mod device;
pub mod entity_id;
pub mod stack;

pub use device::{DeviceIdentity, NetworkInterface};
pub use entity_id::{DeviceId, MacAddress};
pub use stack::{
    DEFAULT_PRIORITY, MemberObservation, ObservationError, StackMember, StackObservation,
    StackPortSummary, StackRole, StackTopology, TopologyShape, UnitState,
};
