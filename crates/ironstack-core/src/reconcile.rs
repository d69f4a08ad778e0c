// ── Topology reconciler ──
//
// Turns a detection result into the device's next persisted state. The
// plan is computed entirely in memory against the current record, then
// applied as one store transaction: put topology, upsert members,
// retire everything else.

use std::collections::BTreeSet;

use crate::detect::Detection;
use crate::model::{DeviceId, StackMember, StackTopology};
use crate::store::{StackRecord, StackStore, StoreError};

/// What a reconciliation will do to one device's record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Write this topology and exactly these members.
    Replace {
        topology: StackTopology,
        members: Vec<StackMember>,
    },
    /// Remove the topology and every member.
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub device_id: DeviceId,
    pub action: PlanAction,
    /// Unit ids whose member record is inserted or overwritten.
    pub upserts: Vec<u32>,
    /// Unit ids currently stored that the new state no longer contains.
    pub retirements: Vec<u32>,
    /// Applying the plan would leave the stored record as it is.
    pub unchanged: bool,
}

impl ReconcilePlan {
    /// Plan the transition from `current` to what `detection` describes.
    pub fn compute(device_id: DeviceId, detection: &Detection, current: &StackRecord) -> Self {
        let action = match detection.observation() {
            Some(observation) => PlanAction::Replace {
                topology: StackTopology::from_observation(device_id, observation),
                members: observation
                    .members
                    .iter()
                    .map(|(unit, m)| StackMember::from_observation(device_id, *unit, m))
                    .collect(),
            },
            None => PlanAction::Clear,
        };

        let (upserts, keep): (Vec<u32>, BTreeSet<u32>) = match &action {
            PlanAction::Replace { members, .. } => (
                members.iter().map(|m| m.unit_id).collect(),
                members.iter().map(|m| m.unit_id).collect(),
            ),
            PlanAction::Clear => (Vec::new(), BTreeSet::new()),
        };
        let retirements = current
            .members
            .keys()
            .filter(|unit| !keep.contains(unit))
            .copied()
            .collect();

        let mut plan = Self {
            device_id,
            action,
            upserts,
            retirements,
            unchanged: false,
        };
        plan.unchanged = plan.staged(current.clone()) == *current;
        plan
    }

    /// Apply the plan's operations to a record.
    pub fn apply_to(&self, record: &mut StackRecord) {
        match &self.action {
            PlanAction::Replace { topology, members } => {
                record.put_topology(topology.clone());
                for member in members {
                    record.upsert_member(member.clone());
                }
                let keep: BTreeSet<u32> = self.upserts.iter().copied().collect();
                record.delete_members_not_in(&keep);
            }
            PlanAction::Clear => record.delete_topology(),
        }
    }

    fn staged(&self, mut record: StackRecord) -> StackRecord {
        self.apply_to(&mut record);
        record
    }

    /// Commit the plan in a single store transaction. Unchanged plans
    /// issue no write.
    pub fn commit(&self, store: &dyn StackStore) -> Result<(), StoreError> {
        if self.unchanged {
            return Ok(());
        }
        store
            .transaction(self.device_id, &mut |record| self.apply_to(record))
            .map(drop)
    }
}
