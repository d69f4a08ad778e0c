// ── Fixture-backed value source ──
//
// Replays recorded scalars and tables instead of talking to an agent.
// Used by tests and by the `ironstack probe` command. Every request is
// counted per OID so callers can assert which sources were consulted.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Error;
use crate::source::ValueSource;
use crate::value::{Row, Table, Value};

/// Recorded SNMP data for one device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Scalar values by OID or symbolic name.
    #[serde(default)]
    pub scalars: BTreeMap<String, Value>,

    /// Walked tables by OID or symbolic name.
    #[serde(default)]
    pub tables: BTreeMap<String, Table>,

    /// OIDs whose requests fail with a transport error.
    #[serde(default)]
    pub failures: BTreeSet<String>,

    /// OIDs whose requests never complete (exercises caller timeouts).
    #[serde(default)]
    pub stalled: BTreeSet<String>,
}

impl Snapshot {
    pub fn from_json_str(raw: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Load a `.json`, `.yaml` or `.yml` snapshot from disk.
    pub fn load(path: &Path) -> Result<Self, Error> {
        load_document(path)
    }
}

/// Read and parse a fixture document, choosing the format by extension.
///
/// Anything that embeds a [`Snapshot`] loads through here so every
/// fixture file accepts the same formats.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let raw = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(serde_json::from_str(&raw)?),
        Some("yaml" | "yml") => Ok(serde_yaml::from_str(&raw)?),
        _ => Err(Error::UnsupportedFixture {
            path: path.display().to_string(),
        }),
    }
}

/// A [`ValueSource`] answering from a [`Snapshot`].
#[derive(Debug, Default)]
pub struct FixtureSource {
    snapshot: Snapshot,
    calls: DashMap<String, usize>,
}

impl FixtureSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            calls: DashMap::new(),
        }
    }

    /// A source with no data at all: every scalar is absent, every walk empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    // ── Builders ─────────────────────────────────────────────────────

    pub fn with_scalar(mut self, oid: &str, value: impl Into<Value>) -> Self {
        self.snapshot.scalars.insert(oid.to_owned(), value.into());
        self
    }

    /// Add (or extend) one row of a table.
    pub fn with_row<'a>(
        mut self,
        table: &str,
        index: &str,
        columns: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Self {
        let row: &mut Row = self
            .snapshot
            .tables
            .entry(table.to_owned())
            .or_default()
            .entry(index.to_owned())
            .or_default();
        for (column, value) in columns {
            row.insert(column.to_owned(), value);
        }
        self
    }

    pub fn failing(mut self, oid: &str) -> Self {
        self.snapshot.failures.insert(oid.to_owned());
        self
    }

    pub fn stalling(mut self, oid: &str) -> Self {
        self.snapshot.stalled.insert(oid.to_owned());
        self
    }

    // ── Call accounting ──────────────────────────────────────────────

    /// Number of requests issued for `oid`.
    pub fn calls(&self, oid: &str) -> usize {
        self.calls.get(oid).map_or(0, |c| *c.value())
    }

    /// Number of requests issued across all OIDs.
    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|c| *c.value()).sum()
    }

    /// Every OID requested so far, sorted.
    pub fn requested(&self) -> Vec<String> {
        let mut oids: Vec<String> = self.calls.iter().map(|c| c.key().clone()).collect();
        oids.sort();
        oids
    }

    fn record(&self, oid: &str) {
        *self.calls.entry(oid.to_owned()).or_insert(0) += 1;
    }

    async fn gate(&self, oid: &str) -> Result<(), Error> {
        self.record(oid);
        if self.snapshot.stalled.contains(oid) {
            std::future::pending::<()>().await;
        }
        if self.snapshot.failures.contains(oid) {
            return Err(Error::Transport {
                oid: oid.to_owned(),
                message: "fixture marks this OID as failing".into(),
            });
        }
        Ok(())
    }
}

impl ValueSource for FixtureSource {
    async fn get(&self, oid: &str) -> Result<Option<Value>, Error> {
        self.gate(oid).await?;
        let value = self.snapshot.scalars.get(oid).cloned();
        trace!(oid, found = value.is_some(), "fixture get");
        Ok(value)
    }

    async fn walk(&self, oid: &str) -> Result<Table, Error> {
        self.gate(oid).await?;
        let table = self.snapshot.tables.get(oid).cloned().unwrap_or_default();
        trace!(oid, rows = table.len(), "fixture walk");
        Ok(table)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_scalar_and_empty_walk_are_not_errors() {
        let source = FixtureSource::empty();
        assert_eq!(source.get("sysDescr.0").await.unwrap(), None);
        assert!(source.walk("ifTable").await.unwrap().is_empty());
        assert_eq!(source.total_calls(), 2);
    }

    #[tokio::test]
    async fn failing_oid_returns_transport_error() {
        let source = FixtureSource::empty().failing("sysName.0");
        let err = source.get("sysName.0").await.unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
        assert_eq!(source.calls("sysName.0"), 1);
    }

    #[tokio::test]
    async fn rows_accumulate_columns() {
        let source = FixtureSource::empty()
            .with_row("t", "1", [("a", Value::from(1))])
            .with_row("t", "1", [("b", Value::from("x"))])
            .with_row("t", "2", [("a", Value::from(2))]);

        let table = source.walk("t").await.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["1"].len(), 2);
        assert_eq!(source.requested(), vec!["t".to_owned()]);
    }

    #[test]
    fn snapshot_parses_json_and_yaml() {
        let json = r#"{
            "scalars": { "sysName.0": "core_stack" },
            "tables": { "t": { "1": { "col": 3 } } },
            "failures": ["bad.0"]
        }"#;
        let from_json = Snapshot::from_json_str(json).unwrap();

        let yaml = "scalars:\n  sysName.0: core_stack\ntables:\n  t:\n    '1':\n      col: 3\nfailures:\n  - bad.0\n";
        let from_yaml = Snapshot::from_yaml_str(yaml).unwrap();

        assert_eq!(from_json, from_yaml);
        assert!(from_json.stalled.is_empty());
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.txt");
        std::fs::write(&path, "{}").unwrap();
        assert!(matches!(
            Snapshot::load(&path),
            Err(Error::UnsupportedFixture { .. })
        ));
    }

    #[test]
    fn documents_load_by_extension() {
        #[derive(Deserialize)]
        struct Wrapper {
            site: String,
            #[serde(flatten)]
            snapshot: Snapshot,
        }

        let dir = tempfile::tempdir().unwrap();
        let yml = dir.path().join("sw.yml");
        std::fs::write(&yml, "site: lab\nscalars:\n  sysName.0: sw\n").unwrap();
        let doc: Wrapper = load_document(&yml).unwrap();
        assert_eq!(doc.site, "lab");
        assert_eq!(doc.snapshot.scalars["sysName.0"], Value::from("sw"));

        let json = dir.path().join("sw.json");
        std::fs::write(&json, "{ \"scalars\": [] }").unwrap();
        assert!(matches!(
            load_document::<Snapshot>(&json),
            Err(Error::Json(_))
        ));

        let missing = dir.path().join("gone.yaml");
        assert!(matches!(
            load_document::<Snapshot>(&missing),
            Err(Error::Io(_))
        ));
    }
}
