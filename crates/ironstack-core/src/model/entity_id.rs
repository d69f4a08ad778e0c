// ── Core identity types ──
//
// DeviceId keys every persisted record; MacAddress normalizes the many
// renderings SNMP agents and resolvers produce for the same six octets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

// ── DeviceId ────────────────────────────────────────────────────────

/// Identifier of a device in the host application's inventory.
///
/// Zero is representable so hosts can pass raw ids through; the
/// discovery entry point rejects it as malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(u32);

impl DeviceId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DeviceId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u32> for DeviceId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

// ── MacAddress ──────────────────────────────────────────────────────

/// MAC address, normalized to lowercase colon-separated format (aa:bb:cc:dd:ee:ff).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacAddress(String);

impl MacAddress {
    /// Parse any common rendering: colon, dash or space separated (with
    /// or without leading zeros), dotted triplets, or bare hex.
    ///
    /// The all-zero address is what empty stack slots report, so it is
    /// treated as absent.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().trim_matches('"').trim();
        let octets = if raw.contains([':', '-', ' ']) {
            parse_separated(raw)?
        } else if raw.contains('.') {
            parse_hex_run(&raw.replace('.', ""))?
        } else {
            parse_hex_run(raw)?
        };
        Self::from_octets(&octets)
    }

    /// Build from exactly six raw octets.
    pub fn from_octets(octets: &[u8]) -> Option<Self> {
        if octets.len() != 6 || octets.iter().all(|b| *b == 0) {
            return None;
        }
        let text = octets
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(":");
        Some(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_separated(raw: &str) -> Option<Vec<u8>> {
    let groups: Vec<&str> = raw
        .split([':', '-', ' '])
        .filter(|g| !g.is_empty())
        .collect();
    if groups.len() != 6 || groups.iter().any(|g| g.len() > 2) {
        return None;
    }
    groups
        .into_iter()
        .map(|g| u8::from_str_radix(g, 16).ok())
        .collect()
}

fn parse_hex_run(raw: &str) -> Option<Vec<u8>> {
    let raw = raw.strip_prefix("0x").unwrap_or(raw);
    if raw.len() != 12 || !raw.is_ascii() {
        return None;
    }
    (0..6)
        .map(|i| raw.get(i * 2..i * 2 + 2).and_then(|p| u8::from_str_radix(p, 16).ok()))
        .collect()
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
