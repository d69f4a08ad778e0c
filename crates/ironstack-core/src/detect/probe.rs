// ── Deadline-bounded value-source access ──
//
// Every request is wrapped in `tokio::time::timeout`. Timeouts and
// transport errors collapse to "no value" for the strategies; the
// observer hears about them separately.

use std::time::Duration;

use ironstack_snmp::{Table, Value, ValueSource};

use crate::model::DeviceId;
use crate::observer::{DiscoveryObserver, SourceFailure};

pub(crate) struct Probe<'a, S> {
    source: &'a S,
    device: DeviceId,
    timeout: Duration,
    debug: bool,
    observer: &'a dyn DiscoveryObserver,
}

impl<'a, S: ValueSource> Probe<'a, S> {
    pub(crate) fn new(
        source: &'a S,
        device: DeviceId,
        timeout: Duration,
        debug: bool,
        observer: &'a dyn DiscoveryObserver,
    ) -> Self {
        Self {
            source,
            device,
            timeout,
            debug,
            observer,
        }
    }

    pub(crate) fn device(&self) -> DeviceId {
        self.device
    }

    pub(crate) fn observer(&self) -> &'a dyn DiscoveryObserver {
        self.observer
    }

    pub(crate) async fn scalar(&self, oid: &str) -> Option<Value> {
        match tokio::time::timeout(self.timeout, self.source.get(oid)).await {
            Ok(Ok(value)) => {
                if self.debug {
                    self.observer
                        .query_completed(self.device, oid, value.is_some());
                }
                value
            }
            Ok(Err(err)) => {
                self.observer
                    .source_failed(self.device, oid, SourceFailure::Error(&err));
                None
            }
            Err(_) => {
                self.observer
                    .source_failed(self.device, oid, SourceFailure::TimedOut(self.timeout));
                None
            }
        }
    }

    pub(crate) async fn integer(&self, oid: &str) -> Option<i64> {
        self.scalar(oid).await.as_ref().and_then(Value::as_i64)
    }

    /// First non-absent value among `oids`, tried in order.
    pub(crate) async fn first_scalar(&self, oids: &[&str]) -> Option<Value> {
        for oid in oids {
            if let Some(value) = self.scalar(oid).await {
                return Some(value);
            }
        }
        None
    }

    pub(crate) async fn table(&self, oid: &str) -> Table {
        match tokio::time::timeout(self.timeout, self.source.walk(oid)).await {
            Ok(Ok(table)) => {
                if self.debug {
                    self.observer
                        .query_completed(self.device, oid, !table.is_empty());
                }
                table
            }
            Ok(Err(err)) => {
                self.observer
                    .source_failed(self.device, oid, SourceFailure::Error(&err));
                Table::new()
            }
            Err(_) => {
                self.observer
                    .source_failed(self.device, oid, SourceFailure::TimedOut(self.timeout));
                Table::new()
            }
        }
    }
}
