// ── Loosely-typed SNMP values ──
//
// What the MIB resolver hands back: a scalar may be an integer, a display
// string, or raw octets. Tables are keyed by the instance index (dotted
// string, e.g. "1" or "1.1.0") and then by column name. Nothing here
// leaves the adapter layer untyped: `ironstack-core` extracts each field
// it needs individually.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single value returned by the value source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Text(String),
    Octets(Vec<u8>),
}

/// One table row: column name -> value.
pub type Row = BTreeMap<String, Value>;

/// A walked table: instance index -> row. Empty when the agent has no data.
pub type Table = BTreeMap<String, Row>;

impl Value {
    /// Interpret the value as an integer.
    ///
    /// Accepts plain integers, numeric text, and the enumerated
    /// `label(N)` form some resolvers emit (e.g. `"enabled(1)"`).
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Text(s) => {
                let trimmed = s.trim().trim_matches('"');
                trimmed.parse().ok().or_else(|| parse_enum_label(trimmed))
            }
            Self::Octets(_) => None,
        }
    }

    /// Interpret the value as display text. Blank strings count as absent.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Integer(n) => Some(n.to_string()),
            Self::Text(s) => {
                let trimmed = s.trim().trim_matches('"').trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            }
            Self::Octets(bytes) => {
                let printable = !bytes.is_empty()
                    && bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ');
                if printable {
                    String::from_utf8(bytes.clone())
                        .ok()
                        .map(|s| s.trim().to_owned())
                        .filter(|s| !s.is_empty())
                } else {
                    None
                }
            }
        }
    }

    /// Raw octets, if the resolver returned them untranslated.
    pub fn as_octets(&self) -> Option<&[u8]> {
        match self {
            Self::Octets(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Octets(bytes)
    }
}

/// Parse the `label(N)` enum rendering, returning `N`.
fn parse_enum_label(raw: &str) -> Option<i64> {
    let open = raw.rfind('(')?;
    let inner = raw.get(open + 1..)?.strip_suffix(')')?;
    inner.trim().parse().ok()
}

/// Unit id encoded in the first component of a table index.
///
/// Stack tables are indexed by unit (`"2"`), and some per-unit tables by
/// `unit.slot.x` (`"2.1.0"`). Zero and non-numeric components yield `None`.
pub fn leading_index(index: &str) -> Option<u32> {
    let first = index.trim().trim_start_matches('.').split('.').next()?;
    first.parse::<u32>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn integer_from_text_and_enum_label() {
        assert_eq!(Value::from("3").as_i64(), Some(3));
        assert_eq!(Value::from(" 128 ").as_i64(), Some(128));
        assert_eq!(Value::from("enabled(1)").as_i64(), Some(1));
        assert_eq!(Value::from("master").as_i64(), None);
        assert_eq!(Value::from(vec![1, 2]).as_i64(), None);
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(Value::from("   ").as_text(), None);
        assert_eq!(Value::from("\"\"").as_text(), None);
        assert_eq!(
            Value::from("\"BZA1234K00X\"").as_text().as_deref(),
            Some("BZA1234K00X")
        );
    }

    #[test]
    fn binary_octets_are_not_text() {
        let mac = Value::from(vec![0x00_u8, 0x1e, 0x2a, 0x3b, 0x4c, 0x5d]);
        assert_eq!(mac.as_text(), None);
        assert_eq!(mac.as_octets().unwrap().len(), 6);

        let printable = Value::from(b"ICX6450-48".to_vec());
        assert_eq!(printable.as_text().as_deref(), Some("ICX6450-48"));
    }

    #[test]
    fn leading_index_parses_unit() {
        assert_eq!(leading_index("2"), Some(2));
        assert_eq!(leading_index("3.1.0"), Some(3));
        assert_eq!(leading_index(".4"), Some(4));
        assert_eq!(leading_index("0"), None);
        assert_eq!(leading_index("abc"), None);
    }

    #[test]
    fn untagged_deserialization() {
        let values: Vec<Value> = serde_json::from_str(r#"[1, "two", [3, 4]]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Integer(1),
                Value::Text("two".into()),
                Value::Octets(vec![3, 4]),
            ]
        );
    }
}
