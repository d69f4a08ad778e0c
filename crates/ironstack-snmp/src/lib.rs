// ironstack-snmp: value source contract for Foundry/Brocade stack discovery

pub mod error;
pub mod fixture;
pub mod oids;
pub mod source;
pub mod value;

pub use error::Error;
pub use fixture::{FixtureSource, Snapshot, load_document};
pub use source::ValueSource;
pub use value::{Row, Table, Value, leading_index};
