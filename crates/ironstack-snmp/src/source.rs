// ── Value source contract ──
//
// The transport/session and the MIB resolver live outside this workspace.
// Discovery only needs two capabilities: fetch one scalar, walk one table.

use std::future::Future;
use std::sync::Arc;

use crate::error::Error;
use crate::value::{Table, Value};

/// Converts an OID or symbolic MIB name into values.
///
/// Implementations must report "no data" as `Ok(None)` / an empty table
/// and reserve `Err` for requests that failed outright. Futures are `Send`
/// so one device's cycle can run on any worker of a multi-threaded runtime.
pub trait ValueSource: Send + Sync {
    /// Fetch a single scalar (e.g. `"SNMPv2-MIB::sysDescr.0"`).
    fn get(&self, oid: &str) -> impl Future<Output = Result<Option<Value>, Error>> + Send;

    /// Walk a table, returning rows keyed by instance index.
    fn walk(&self, oid: &str) -> impl Future<Output = Result<Table, Error>> + Send;
}

impl<T: ValueSource> ValueSource for &T {
    fn get(&self, oid: &str) -> impl Future<Output = Result<Option<Value>, Error>> + Send {
        (**self).get(oid)
    }

    fn walk(&self, oid: &str) -> impl Future<Output = Result<Table, Error>> + Send {
        (**self).walk(oid)
    }
}

impl<T: ValueSource> ValueSource for Arc<T> {
    fn get(&self, oid: &str) -> impl Future<Output = Result<Option<Value>, Error>> + Send {
        (**self).get(oid)
    }

    fn walk(&self, oid: &str) -> impl Future<Output = Result<Table, Error>> + Send {
        (**self).walk(oid)
    }
}
