// ── Discoverer ──
//
// Entry point for one device's stack discovery cycle: detect, plan,
// commit. Holds no per-device state, so one instance can reconcile many
// devices concurrently.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ironstack_snmp::ValueSource;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DiscoveryConfig;
use crate::detect::probe::Probe;
use crate::detect::{self, Detection, DetectionMethod};
use crate::error::CoreError;
use crate::hardware::normalize_hardware;
use crate::model::{DeviceId, DeviceIdentity, StackTopology};
use crate::observer::{DiscoveryObserver, TracingObserver};
use crate::cpu::{self, UnitCpuLoad};
use crate::poe::{self, PortPowerBudget, UnitPowerBudget};
use crate::reconcile::{PlanAction, ReconcilePlan};
use crate::store::StackStore;

/// Outcome of one reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    pub device_id: DeviceId,
    /// An observation was found and its state is now persisted.
    pub applied: bool,
    /// The device is not stack-capable; any stored stack state was removed.
    pub cleared_no_longer_stacked: bool,
    /// The stored state already matched; nothing was written.
    pub no_change_detected_possible: bool,
    pub method: Option<DetectionMethod>,
    pub topology: Option<StackTopology>,
    /// Unit ids inserted or overwritten.
    pub upserted: Vec<u32>,
    /// Unit ids removed.
    pub retired: Vec<u32>,
    /// Normalized hardware name, when the identity carried one.
    pub hardware: Option<String>,
    pub completed_at: DateTime<Utc>,
}

/// Stack discovery facade.
///
/// Cheaply cloneable via `Arc<DiscovererInner>`.
#[derive(Clone)]
pub struct Discoverer {
    inner: Arc<DiscovererInner>,
}

struct DiscovererInner {
    config: DiscoveryConfig,
    store: Arc<dyn StackStore>,
    observer: Arc<dyn DiscoveryObserver>,
}

impl Discoverer {
    /// Discoverer reporting through [`TracingObserver`].
    pub fn new(config: DiscoveryConfig, store: Arc<dyn StackStore>) -> Self {
        Self::with_observer(config, store, Arc::new(TracingObserver))
    }

    pub fn with_observer(
        config: DiscoveryConfig,
        store: Arc<dyn StackStore>,
        observer: Arc<dyn DiscoveryObserver>,
    ) -> Self {
        Self {
            inner: Arc::new(DiscovererInner {
                config,
                store,
                observer,
            }),
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<dyn StackStore> {
        &self.inner.store
    }

    fn probe<'a, S: ValueSource>(&'a self, device: DeviceId, source: &'a S) -> Probe<'a, S> {
        Probe::new(
            source,
            device,
            self.inner.config.request_timeout,
            self.inner.config.debug,
            self.inner.observer.as_ref(),
        )
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Run the detection cascade without touching the store.
    pub async fn detect<S: ValueSource>(
        &self,
        device_id: DeviceId,
        identity: &DeviceIdentity,
        source: &S,
    ) -> Result<Detection, CoreError> {
        validate_device(device_id)?;
        let probe = self.probe(device_id, source);
        Ok(detect::run(&probe, identity, &self.inner.config.capability).await)
    }

    /// Detect the device's stack and bring the store in line with it.
    pub async fn reconcile_stack_topology<S: ValueSource>(
        &self,
        device_id: DeviceId,
        identity: &DeviceIdentity,
        source: &S,
    ) -> Result<ReconciliationResult, CoreError> {
        let detection = self.detect(device_id, identity, source).await?;
        debug!(
            device = %device_id,
            hostname = %identity.hostname,
            method = ?detection.method(),
            "stack detection finished"
        );

        let store = self.inner.store.as_ref();
        let current = store.load(device_id)?;
        let plan = ReconcilePlan::compute(device_id, &detection, &current);
        plan.commit(store)?;

        let topology = match &plan.action {
            PlanAction::Replace { topology, .. } => Some(topology.clone()),
            PlanAction::Clear => None,
        };
        let result = ReconciliationResult {
            device_id,
            applied: topology.is_some(),
            cleared_no_longer_stacked: topology.is_none(),
            no_change_detected_possible: plan.unchanged,
            method: detection.method(),
            topology,
            upserted: plan.upserts,
            retired: plan.retirements,
            hardware: identity
                .hardware
                .as_deref()
                .map(normalize_hardware)
                .filter(|h| !h.is_empty()),
            completed_at: Utc::now(),
        };
        self.inner.observer.reconciled(device_id, &result);
        Ok(result)
    }

    /// Per-unit PoE budgets. Empty on hardware without PoE.
    pub async fn unit_power_budgets<S: ValueSource>(
        &self,
        device_id: DeviceId,
        source: &S,
    ) -> Result<Vec<UnitPowerBudget>, CoreError> {
        validate_device(device_id)?;
        let probe = self.probe(device_id, source);
        Ok(poe::read_unit_budgets(&probe).await)
    }

    /// Per-port PoE allocation and draw. Ports without PoE are omitted.
    pub async fn port_power_budgets<S: ValueSource>(
        &self,
        device_id: DeviceId,
        source: &S,
    ) -> Result<Vec<PortPowerBudget>, CoreError> {
        validate_device(device_id)?;
        let probe = self.probe(device_id, source);
        Ok(poe::read_port_budgets(&probe).await)
    }

    /// CPU utilisation readings, attributed to units when the stored
    /// topology says the device is stacked.
    pub async fn unit_cpu_loads<S: ValueSource>(
        &self,
        device_id: DeviceId,
        source: &S,
    ) -> Result<Vec<UnitCpuLoad>, CoreError> {
        validate_device(device_id)?;
        let stacked = self
            .inner
            .store
            .get_topology(device_id)?
            .is_some_and(|t| !t.topology.is_standalone() && t.is_stacked());
        debug!(device = %device_id, stacked, "reading cpu utilisation");
        let probe = self.probe(device_id, source);
        Ok(cpu::read_cpu_loads(&probe, stacked).await)
    }

    /// Drop everything stored for the device. Returns whether anything was stored.
    pub fn forget(&self, device_id: DeviceId) -> Result<bool, CoreError> {
        validate_device(device_id)?;
        let store = self.inner.store.as_ref();
        let existed = !store.load(device_id)?.is_empty();
        store.delete_topology(device_id)?;
        Ok(existed)
    }
}

fn validate_device(device_id: DeviceId) -> Result<(), CoreError> {
    if device_id.is_valid() {
        Ok(())
    } else {
        Err(CoreError::InvalidInput {
            field: "device id",
            reason: "must be a positive integer".into(),
        })
    }
}
