//! Line-oriented record store boundary.
//!
//! Four resources (inventory, suppliers, hospitals, distribution) are kept as
//! comma-delimited text, one record per line. Backends implement the raw
//! row-level [`RecordStore`] trait; [`RecordStoreExt`] layers typed
//! load/overwrite/append on top of any backend.

pub mod codec;
pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use codec::{MalformedPolicy, Record, RecordStoreExt};
pub use file::{FileRecordStore, ResourceFiles};
pub use in_memory::InMemoryRecordStore;
pub use r#trait::{RawRow, RecordStore, Resource, StoreError};
