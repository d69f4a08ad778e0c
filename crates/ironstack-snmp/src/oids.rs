// ── OID catalogue ──
//
// Symbolic names are handed to the MIB resolver as-is; raw numeric OIDs
// are used where the object sits outside any MIB the resolver knows.

/// FOUNDRY-SN-SWITCH-GROUP-MIB stacking objects (`.1.3.6.1.4.1.1991.1.1.3.31`).
pub mod stacking {
    /// 1 = enabled. Absent on some 08.0.30 firmware.
    pub const GLOBAL_CONFIG_STATE: &str =
        "FOUNDRY-SN-SWITCH-GROUP-MIB::snStackingGlobalConfigState.0";
    /// 1 = ring, 2 = chain, 3 = standalone.
    pub const GLOBAL_TOPOLOGY: &str = "FOUNDRY-SN-SWITCH-GROUP-MIB::snStackingGlobalTopology.0";
    pub const GLOBAL_MAC: &str = "FOUNDRY-SN-SWITCH-GROUP-MIB::snStackingGlobalMacAddress.0";

    /// Operational unit table, indexed by unit id.
    pub const OPER_UNIT_TABLE: &str = "FOUNDRY-SN-SWITCH-GROUP-MIB::snStackingOperUnitTable";
    pub const OPER_ROLE: &str = "snStackingOperUnitRole";
    pub const OPER_STATE: &str = "snStackingOperUnitState";
    pub const OPER_MAC: &str = "snStackingOperUnitMac";
    pub const OPER_PRIORITY: &str = "snStackingOperUnitPriority";
    pub const OPER_IMAGE_VERSION: &str = "snStackingOperUnitImgVer";
    pub const OPER_DESCRIPTION: &str = "snStackingOperUnitDescription";

    /// Configuration unit table. Carries no role or state.
    pub const CONFIG_UNIT_TABLE: &str = "FOUNDRY-SN-SWITCH-GROUP-MIB::snStackingConfigUnitTable";
    pub const CONFIG_PRIORITY: &str = "snStackingConfigUnitPriority";
}

/// FOUNDRY-SN-AGENT-MIB chassis objects.
pub mod chassis {
    /// Per-unit chassis table, indexed by unit id.
    pub const UNIT_TABLE: &str = "FOUNDRY-SN-AGENT-MIB::snChasUnitTable";
    pub const UNIT_SERIAL: &str = "snChasUnitSerNum";
    pub const UNIT_PART_NUMBER: &str = "snChasUnitPartNum";

    /// Scalar serial number on standalone units, tried in order.
    pub const SERIAL_SCALARS: [&str; 2] = [
        "FOUNDRY-SN-AGENT-MIB::snChasSerNum.0",
        "FOUNDRY-SN-ROOT-MIB::snChasSerNum.0",
    ];
}

/// BRIDGE-MIB base address, used as the standalone unit's MAC.
pub mod bridge {
    pub const BASE_ADDRESS: &str = "BRIDGE-MIB::dot1dBaseBridgeAddress.0";
}

/// Legacy and vendor OIDs outside the stacking MIB.
///
/// Some firmware answers these when the stacking tables are empty. A value
/// proves stack data exists; it does not describe the members.
pub mod legacy {
    pub const STACK_MEMBER_COUNT: &str = ".1.3.6.1.4.1.1991.1.1.2.1.1.0";
    pub const STACK_PORT_COUNT: &str = ".1.3.6.1.4.1.1991.1.1.2.1.3.0";
    pub const STACK_TABLE: &str = ".1.3.6.1.4.1.1991.1.1.2.1.2";
    pub const STACK_PORT_TABLE: &str = ".1.3.6.1.4.1.1991.1.1.2.1.4";
    pub const BROCADE_STACK_INFO: &str = ".1.3.6.1.4.1.1588.2.1.1.1";

    /// Probe order, as `(label, oid)`.
    pub const ALTERNATES: [(&str, &str); 5] = [
        ("snStackMemberCount", STACK_MEMBER_COUNT),
        ("snStackPortCount", STACK_PORT_COUNT),
        ("stackTable", STACK_TABLE),
        ("stackPortTable", STACK_PORT_TABLE),
        ("brocadeStackInfo", BROCADE_STACK_INFO),
    ];
}

/// FOUNDRY-POE-MIB per-unit power budget (`.1.3.6.1.4.1.1991.1.1.2.14.4.1`).
pub mod poe {
    pub const UNIT_TABLE: &str = "FOUNDRY-POE-MIB::snAgentPoeUnitTable";
    /// Capacity in milliwatts.
    pub const UNIT_MAX_POWER: &str = "snAgentPoeUnitMaxPower";
    /// Consumption in milliwatts.
    pub const UNIT_CONSUMED_POWER: &str = "snAgentPoeUnitConsumedPower";

    /// Per-port table (`.1.3.6.1.4.1.1991.1.1.2.14.2.2`), indexed by ifIndex.
    pub const PORT_TABLE: &str = "FOUNDRY-POE-MIB::snAgentPoePortTable";
    pub const PORT_NUMBER: &str = "snAgentPoePortNumber";
    /// 1 = not capable, 2 = disabled, 3 = enabled, 4 = legacy device enabled.
    pub const PORT_CONTROL: &str = "snAgentPoePortControl";
    /// Allocated limit in milliwatts.
    pub const PORT_WATTAGE: &str = "snAgentPoePortWattage";
    /// Current draw in milliwatts.
    pub const PORT_CONSUMED: &str = "snAgentPoePortConsumed";
}

/// FOUNDRY-SN-AGENT-MIB CPU utilisation, indexed by `slot.cpu.interval`.
pub mod cpu {
    pub const UTIL_TABLE: &str = "FOUNDRY-SN-AGENT-MIB::snAgentCpuUtilTable";
    /// Hundredths of a percent.
    pub const UTIL_100TH_PERCENT: &str = "snAgentCpuUtil100thPercent";
    pub const UTIL_PERCENT: &str = "snAgentCpuUtilPercent";
    /// Deprecated; older firmware only.
    pub const UTIL_VALUE: &str = "snAgentCpuUtilValue";
}
