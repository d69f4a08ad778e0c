//! Stack topology inference for Foundry/Brocade FastIron and ICX switches.
//!
//! The stacking MIB on these switches is frequently empty or wrong, so
//! discovery runs an ordered cascade of strategies over whatever the
//! agent does answer, then reconciles the winning observation against
//! what was stored last cycle:
//!
//! - **[`Discoverer`]**: entry point. [`Discoverer::reconcile_stack_topology`]
//!   runs detection, plans the write set, and commits it in one store
//!   transaction.
//!
//! - **Detection** ([`detect`]): canonical oper-table walk, stack-port
//!   interface names, `_stack` hostname suffix, configuration table,
//!   legacy OIDs, then standalone synthesis for stack-capable hardware.
//!
//! - **[`ReconcilePlan`]**: in-memory diff of the new observation against
//!   the stored record: topology to write, members to upsert and retire.
//!
//! - **Stores** ([`store`]): the [`StackStore`] contract plus in-memory
//!   and JSON-file implementations.
//!
//! Alongside topology, [`poe`] and [`cpu`] read per-unit and per-port
//! power budgets and CPU utilisation from the same value source.

pub mod classify;
pub mod config;
pub mod convert;
pub mod cpu;
pub mod detect;
pub mod discoverer;
pub mod error;
pub mod hardware;
pub mod model;
pub mod observer;
pub mod poe;
pub mod reconcile;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{CapabilityMarkers, DiscoveryConfig};
pub use detect::{Detection, DetectionMethod};
pub use discoverer::{Discoverer, ReconciliationResult};
pub use error::CoreError;
pub use hardware::normalize_hardware;
pub use observer::{DiscoveryObserver, SourceFailure, StrategyOutcome, TracingObserver};
pub use cpu::{CpuLoadColumn, UnitCpuLoad};
pub use poe::{PoeControl, PortPowerBudget, UnitPowerBudget};
pub use reconcile::{PlanAction, ReconcilePlan};
pub use store::{JsonFileStore, MemoryStore, StackRecord, StackStore, StoreError};

pub use model::{
    DeviceId, DeviceIdentity, MacAddress, MemberObservation, NetworkInterface, StackMember,
    StackObservation, StackRole, StackTopology, TopologyShape, UnitState,
};
