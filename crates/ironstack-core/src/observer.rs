// ── Discovery observer ──
//
// Diagnostics are pushed to an observer instead of being read from
// ambient debug state. `TracingObserver` forwards everything to
// `tracing`; hosts may supply their own (e.g. to feed metrics).

use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::detect::DetectionMethod;
use crate::discoverer::ReconciliationResult;
use crate::model::{DeviceId, ObservationError};

/// Why a value-source request produced no value.
#[derive(Debug)]
pub enum SourceFailure<'a> {
    /// The request failed outright.
    Error(&'a ironstack_snmp::Error),
    /// The request exceeded the configured deadline.
    TimedOut(Duration),
}

/// How a single detection strategy ended.
#[derive(Debug)]
pub enum StrategyOutcome<'a> {
    /// Produced a valid observation; the cascade stops here.
    Detected,
    /// Found nothing to work with.
    NoData,
    /// Produced an observation that failed validation.
    Rejected(&'a ObservationError),
}

/// Receives discovery diagnostics. Every method defaults to a no-op.
pub trait DiscoveryObserver: Send + Sync {
    fn strategy_started(&self, _device: DeviceId, _method: DetectionMethod) {}

    fn strategy_finished(
        &self,
        _device: DeviceId,
        _method: DetectionMethod,
        _outcome: StrategyOutcome<'_>,
    ) {
    }

    fn source_failed(&self, _device: DeviceId, _oid: &str, _failure: SourceFailure<'_>) {}

    /// Per-query detail; only called when `DiscoveryConfig::debug` is set.
    fn query_completed(&self, _device: DeviceId, _oid: &str, _found: bool) {}

    fn reconciled(&self, _device: DeviceId, _result: &ReconciliationResult) {}
}

/// Default observer: structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DiscoveryObserver for TracingObserver {
    fn strategy_started(&self, device: DeviceId, method: DetectionMethod) {
        debug!(device = %device, %method, "trying stack detection strategy");
    }

    fn strategy_finished(
        &self,
        device: DeviceId,
        method: DetectionMethod,
        outcome: StrategyOutcome<'_>,
    ) {
        match outcome {
            StrategyOutcome::Detected => {
                debug!(device = %device, %method, "stack detection strategy succeeded");
            }
            StrategyOutcome::NoData => {
                debug!(device = %device, %method, "stack detection strategy found no data");
            }
            StrategyOutcome::Rejected(err) => {
                warn!(device = %device, %method, error = %err, "discarding inconsistent stack observation");
            }
        }
    }

    fn source_failed(&self, device: DeviceId, oid: &str, failure: SourceFailure<'_>) {
        match failure {
            SourceFailure::Error(err) => {
                debug!(device = %device, oid, error = %err, "value source request failed");
            }
            SourceFailure::TimedOut(after) => {
                debug!(
                    device = %device,
                    oid,
                    timeout_ms = u64::try_from(after.as_millis()).unwrap_or(u64::MAX),
                    "value source request timed out"
                );
            }
        }
    }

    fn query_completed(&self, device: DeviceId, oid: &str, found: bool) {
        trace!(device = %device, oid, found, "value source query");
    }

    fn reconciled(&self, device: DeviceId, result: &ReconciliationResult) {
        if result.cleared_no_longer_stacked {
            info!(device = %device, "device is not stack-capable; cleared stack records");
        } else if let Some(ref topology) = result.topology {
            info!(
                device = %device,
                method = ?result.method,
                topology = %topology.topology,
                units = topology.unit_count,
                upserted = result.upserted.len(),
                retired = result.retired.len(),
                unchanged = result.no_change_detected_possible,
                "stack topology reconciled"
            );
        }
    }
}
