// ── Role/state classifier ──
//
// FOUNDRY-SN-SWITCH-GROUP-MIB integer codes to domain enums. Total
// functions: unrecognized codes map to `Unknown`. Callers pass 0 when
// the agent returned nothing.

use crate::model::{StackRole, TopologyShape, UnitState};

pub fn classify_role(code: i64) -> StackRole {
    match code {
        1 => StackRole::Standalone,
        2 => StackRole::Member,
        3 => StackRole::Master,
        _ => StackRole::Unknown,
    }
}

pub fn classify_state(code: i64) -> UnitState {
    match code {
        1 => UnitState::Active,
        2 => UnitState::Remote,
        3 => UnitState::Reserved,
        4 => UnitState::Empty,
        _ => UnitState::Unknown,
    }
}

pub fn classify_topology(code: i64) -> TopologyShape {
    match code {
        1 => TopologyShape::Ring,
        2 => TopologyShape::Chain,
        3 => TopologyShape::Standalone,
        _ => TopologyShape::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles() {
        assert_eq!(classify_role(3), StackRole::Master);
        assert_eq!(classify_role(2), StackRole::Member);
        assert_eq!(classify_role(1), StackRole::Standalone);
        assert_eq!(classify_role(0), StackRole::Unknown);
        assert_eq!(classify_role(99), StackRole::Unknown);
        assert_eq!(classify_role(-1), StackRole::Unknown);
    }

    #[test]
    fn states() {
        assert_eq!(classify_state(1), UnitState::Active);
        assert_eq!(classify_state(2), UnitState::Remote);
        assert_eq!(classify_state(3), UnitState::Reserved);
        assert_eq!(classify_state(4), UnitState::Empty);
        assert_eq!(classify_state(5), UnitState::Unknown);
    }

    #[test]
    fn topologies() {
        assert_eq!(classify_topology(1), TopologyShape::Ring);
        assert_eq!(classify_topology(2), TopologyShape::Chain);
        assert_eq!(classify_topology(3), TopologyShape::Standalone);
        assert_eq!(classify_topology(0), TopologyShape::Unknown);
    }
}
