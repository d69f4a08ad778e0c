// ── Detection cascade ──
//
// Ordered strategies, each trying to produce a `StackObservation`. The
// first valid observation wins; later strategies issue no requests.
// The global stacking flag gates the cascade:
//
//   flag == 1 or absent  -> strategies 1..=5, then the terminal fallback
//   flag present, != 1   -> terminal fallback only

mod alternates;
mod canonical;
mod config_table;
pub mod hostname;
mod interfaces;
pub(crate) mod probe;
mod standalone;

use ironstack_snmp::ValueSource;
use ironstack_snmp::oids::stacking;
use serde::{Deserialize, Serialize};

use self::probe::Probe;
use crate::config::CapabilityMarkers;
use crate::model::{DeviceIdentity, StackObservation};
use crate::observer::StrategyOutcome;

/// Which strategy produced the observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DetectionMethod {
    OperTable,
    StackInterfaces,
    Hostname,
    ConfigTable,
    AlternateOids,
    StandaloneFallback,
}

/// Strategies tried while the stacking flag is enabled or unknown, in order.
pub const CASCADE: [DetectionMethod; 5] = [
    DetectionMethod::OperTable,
    DetectionMethod::StackInterfaces,
    DetectionMethod::Hostname,
    DetectionMethod::ConfigTable,
    DetectionMethod::AlternateOids,
];

/// Value of `snStackingGlobalConfigState.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackingFlag {
    Enabled,
    Disabled(i64),
    /// Absent, unreadable or timed out.
    Unknown,
}

impl StackingFlag {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => Self::Enabled,
            Some(other) => Self::Disabled(other),
            None => Self::Unknown,
        }
    }
}

/// Cascade result.
#[derive(Debug, Clone, PartialEq)]
pub enum Detection {
    Observed {
        method: DetectionMethod,
        observation: StackObservation,
    },
    /// No strategy found stack data and the device is not stack-capable.
    NoStackData,
}

impl Detection {
    pub fn method(&self) -> Option<DetectionMethod> {
        match self {
            Self::Observed { method, .. } => Some(*method),
            Self::NoStackData => None,
        }
    }

    pub fn observation(&self) -> Option<&StackObservation> {
        match self {
            Self::Observed { observation, .. } => Some(observation),
            Self::NoStackData => None,
        }
    }
}

pub(crate) async fn run<S: ValueSource>(
    probe: &Probe<'_, S>,
    identity: &DeviceIdentity,
    markers: &CapabilityMarkers,
) -> Detection {
    let flag = StackingFlag::from_code(probe.integer(stacking::GLOBAL_CONFIG_STATE).await);

    if !matches!(flag, StackingFlag::Disabled(_)) {
        for method in CASCADE {
            if let Some(observation) = attempt(probe, identity, method).await {
                return Detection::Observed {
                    method,
                    observation,
                };
            }
        }
    }

    if markers.is_stack_capable(identity) {
        if let Some(observation) =
            attempt(probe, identity, DetectionMethod::StandaloneFallback).await
        {
            return Detection::Observed {
                method: DetectionMethod::StandaloneFallback,
                observation,
            };
        }
    }
    Detection::NoStackData
}

async fn attempt<S: ValueSource>(
    probe: &Probe<'_, S>,
    identity: &DeviceIdentity,
    method: DetectionMethod,
) -> Option<StackObservation> {
    let observer = probe.observer();
    let device = probe.device();
    observer.strategy_started(device, method);

    let produced = match method {
        DetectionMethod::OperTable => canonical::observe(probe).await,
        DetectionMethod::StackInterfaces => interfaces::observe(identity),
        DetectionMethod::Hostname => hostname::observe(identity),
        DetectionMethod::ConfigTable => config_table::observe(probe).await,
        DetectionMethod::AlternateOids => alternates::observe(probe).await,
        DetectionMethod::StandaloneFallback => Some(standalone::observe(probe, identity).await),
    };

    let Some(observation) = produced else {
        observer.strategy_finished(device, method, StrategyOutcome::NoData);
        return None;
    };
    if let Err(err) = observation.validate() {
        observer.strategy_finished(device, method, StrategyOutcome::Rejected(&err));
        return None;
    }
    observer.strategy_finished(device, method, StrategyOutcome::Detected);
    Some(observation)
}
