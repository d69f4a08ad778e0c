// ── In-memory stack store ──
//
// Concurrent per-device storage. Each device's record lives in one
// `DashMap` entry, so a commit is a whole-record swap under that entry's
// shard lock. Every effective write bumps a `watch` version counter.

use dashmap::DashMap;
use tokio::sync::watch;

use super::{StackRecord, StackStore, StoreError};
use crate::model::DeviceId;

pub struct MemoryStore {
    records: DashMap<DeviceId, StackRecord>,
    version: watch::Sender<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        Self {
            records: DashMap::new(),
            version,
        }
    }

    /// Subscribe to the write counter; it advances on every commit that
    /// changes stored content.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v = v.wrapping_add(1));
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StackStore for MemoryStore {
    fn load(&self, device: DeviceId) -> Result<StackRecord, StoreError> {
        Ok(self
            .records
            .get(&device)
            .map(|r| r.value().clone())
            .unwrap_or_default())
    }

    fn commit(&self, device: DeviceId, record: StackRecord) -> Result<(), StoreError> {
        let changed = if record.is_empty() {
            self.records.remove(&device).is_some()
        } else {
            self.records.insert(device, record.clone()).as_ref() != Some(&record)
        };
        if changed {
            self.bump_version();
        }
        Ok(())
    }

    fn devices(&self) -> Result<Vec<DeviceId>, StoreError> {
        let mut ids: Vec<DeviceId> = self.records.iter().map(|r| *r.key()).collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn transaction(
        &self,
        device: DeviceId,
        apply: &mut dyn FnMut(&mut StackRecord),
    ) -> Result<StackRecord, StoreError> {
        let staged = {
            let mut entry = self.records.entry(device).or_default();
            let before = entry.value().clone();
            apply(entry.value_mut());
            let after = entry.value().clone();
            if after != before {
                self.bump_version();
            }
            after
        };
        if staged.is_empty() {
            self.records.remove_if(&device, |_, r| r.is_empty());
        }
        Ok(staged)
    }
}
