// ── Stack store contract ──
//
// Device-scoped persistence for `StackTopology` and `StackMember`.
// Implementations provide `load` and an atomic `commit` of a whole
// device record; the fine-grained operations are built on top of them
// by running against a staged copy.

pub mod file;
pub mod memory;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{DeviceId, StackMember, StackTopology};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt stack record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Host-supplied backends report their own failures here.
    #[error("store backend error: {message}")]
    Backend { message: String },
}

// ── Record ──────────────────────────────────────────────────────────

/// Everything persisted for one device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackRecord {
    #[serde(default)]
    pub topology: Option<StackTopology>,
    #[serde(default)]
    pub members: BTreeMap<u32, StackMember>,
}

impl StackRecord {
    pub fn is_empty(&self) -> bool {
        self.topology.is_none() && self.members.is_empty()
    }

    pub fn put_topology(&mut self, topology: StackTopology) {
        self.topology = Some(topology);
    }

    /// Remove the topology and every member.
    pub fn delete_topology(&mut self) {
        self.topology = None;
        self.members.clear();
    }

    /// Insert or overwrite the member keyed by its unit id.
    pub fn upsert_member(&mut self, member: StackMember) {
        self.members.insert(member.unit_id, member);
    }

    /// Delete every member whose unit id is not in `keep`, returning the
    /// removed unit ids in ascending order.
    pub fn delete_members_not_in(&mut self, keep: &BTreeSet<u32>) -> Vec<u32> {
        let retired: Vec<u32> = self
            .members
            .keys()
            .filter(|unit| !keep.contains(unit))
            .copied()
            .collect();
        for unit in &retired {
            self.members.remove(unit);
        }
        retired
    }
}

// ── Contract ────────────────────────────────────────────────────────

/// Durable storage for stack records, partitioned by device.
///
/// Only the reconciliation for a given device writes that device's
/// record, so `transaction` need not serialize writers of one device
/// against each other; it must guarantee readers see either the old or
/// the new record in full.
pub trait StackStore: Send + Sync {
    /// The device's current record (empty when nothing is stored).
    fn load(&self, device: DeviceId) -> Result<StackRecord, StoreError>;

    /// Atomically replace the device's record. An empty record removes it.
    fn commit(&self, device: DeviceId, record: StackRecord) -> Result<(), StoreError>;

    /// Devices with a stored record, ascending.
    fn devices(&self) -> Result<Vec<DeviceId>, StoreError>;

    /// Run `apply` against a staged copy of the device's record and commit
    /// the result as one write.
    fn transaction(
        &self,
        device: DeviceId,
        apply: &mut dyn FnMut(&mut StackRecord),
    ) -> Result<StackRecord, StoreError> {
        let mut staged = self.load(device)?;
        apply(&mut staged);
        self.commit(device, staged.clone())?;
        Ok(staged)
    }

    fn get_topology(&self, device: DeviceId) -> Result<Option<StackTopology>, StoreError> {
        Ok(self.load(device)?.topology)
    }

    fn list_members(&self, device: DeviceId) -> Result<Vec<StackMember>, StoreError> {
        Ok(self.load(device)?.members.into_values().collect())
    }

    fn put_topology(&self, device: DeviceId, topology: StackTopology) -> Result<(), StoreError> {
        let mut topology = Some(topology);
        self.transaction(device, &mut |record| {
            if let Some(t) = topology.take() {
                record.put_topology(t);
            }
        })
        .map(drop)
    }

    fn delete_topology(&self, device: DeviceId) -> Result<(), StoreError> {
        self.transaction(device, &mut StackRecord::delete_topology)
            .map(drop)
    }

    fn upsert_member(&self, device: DeviceId, member: StackMember) -> Result<(), StoreError> {
        let mut member = Some(member);
        self.transaction(device, &mut |record| {
            if let Some(m) = member.take() {
                record.upsert_member(m);
            }
        })
        .map(drop)
    }

    fn delete_members_not_in(
        &self,
        device: DeviceId,
        keep: &BTreeSet<u32>,
    ) -> Result<Vec<u32>, StoreError> {
        let mut retired = Vec::new();
        self.transaction(device, &mut |record| {
            retired = record.delete_members_not_in(keep);
        })?;
        Ok(retired)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{StackRole, TopologyShape, UnitState};

    fn member(unit: u32) -> StackMember {
        StackMember {
            device_id: DeviceId::new(1),
            unit_id: unit,
            role: StackRole::Member,
            state: UnitState::Active,
            serial: None,
            model: None,
            version: None,
            mac: None,
            priority: 128,
        }
    }

    #[test]
    fn delete_members_not_in_returns_retired_units() {
        let mut record = StackRecord::default();
        for unit in [1, 2, 3, 4] {
            record.upsert_member(member(unit));
        }
        let retired = record.delete_members_not_in(&BTreeSet::from([2, 4]));
        assert_eq!(retired, vec![1, 3]);
        assert_eq!(record.members.keys().copied().collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn delete_topology_drops_members() {
        let mut record = StackRecord::default();
        record.put_topology(StackTopology {
            device_id: DeviceId::new(1),
            topology: TopologyShape::Ring,
            unit_count: 2,
            master_unit: Some(1),
            master_by_convention: false,
            stack_mac: None,
        });
        record.upsert_member(member(1));
        record.delete_topology();
        assert!(record.is_empty());
    }

    #[test]
    fn provided_operations_go_through_commit() {
        let store = MemoryStore::new();
        let device = DeviceId::new(9);

        store.upsert_member(device, member(1)).unwrap();
        store.upsert_member(device, member(2)).unwrap();
        assert_eq!(store.list_members(device).unwrap().len(), 2);
        assert_eq!(store.get_topology(device).unwrap(), None);

        let retired = store.delete_members_not_in(device, &BTreeSet::from([2])).unwrap();
        assert_eq!(retired, vec![1]);

        store.delete_topology(device).unwrap();
        assert!(store.devices().unwrap().is_empty());
    }
}
