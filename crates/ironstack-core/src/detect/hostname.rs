// ── Strategy 3: `_stack` hostname suffix ──
//
// Operators commonly name stacks after their members
// (`h08-h05_stack`). This only estimates the unit count.

use crate::model::{DeviceIdentity, StackObservation, TopologyShape};

const SUFFIX: &str = "_stack";

/// Unit count implied by the advertised name, if it carries the suffix.
pub fn estimate_units(name: &str) -> Option<u32> {
    let name = name.trim();
    let cut = name.len().checked_sub(SUFFIX.len())?;
    let suffix = name.get(cut..)?;
    if !suffix.eq_ignore_ascii_case(SUFFIX) {
        return None;
    }
    let prefix = name.get(..cut)?;
    let segments = prefix.split('-').filter(|s| !s.is_empty()).count();
    Some(u32::try_from(segments.max(1)).unwrap_or(u32::MAX))
}

pub(super) fn observe(identity: &DeviceIdentity) -> Option<StackObservation> {
    let units = estimate_units(identity.advertised_name())?;
    let topology = if units > 1 {
        TopologyShape::Ring
    } else {
        TopologyShape::Standalone
    };
    Some(StackObservation::detection_only(topology, units))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn estimates() {
        assert_eq!(estimate_units("h08-h05_stack"), Some(2));
        assert_eq!(estimate_units("unit1_stack"), Some(1));
        assert_eq!(estimate_units("a-b-c_STACK"), Some(3));
        assert_eq!(estimate_units("_stack"), Some(1));
        assert_eq!(estimate_units("core-switch"), None);
        assert_eq!(estimate_units("stack"), None);
        assert_eq!(estimate_units("ünï_stack"), Some(1));
    }

    #[test]
    fn observation_has_no_members() {
        let identity = DeviceIdentity::new("10.0.0.1").with_sys_name("h08-h05_stack");
        let obs = observe(&identity).unwrap();
        assert_eq!(obs.unit_count, 2);
        assert_eq!(obs.topology, TopologyShape::Ring);
        assert_eq!(obs.master_unit, None);
        assert!(obs.members.is_empty());
        assert!(obs.validate().is_ok());
    }
}
