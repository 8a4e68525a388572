use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four persisted record collections.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Inventory,
    Suppliers,
    Hospitals,
    Distribution,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Inventory,
        Resource::Suppliers,
        Resource::Hospitals,
        Resource::Distribution,
    ];

    /// Header row written at the top of the resource, if it carries one.
    ///
    /// The distribution log is a headerless append-only file.
    pub fn header(self) -> Option<&'static [&'static str]> {
        match self {
            Resource::Inventory => Some(&["ItemCode", "SupplierCode", "ItemName", "Quantity"]),
            Resource::Suppliers => Some(&["SupplierCode", "Name", "Location"]),
            Resource::Hospitals => Some(&["HospitalCode", "HospitalName"]),
            Resource::Distribution => None,
        }
    }

    /// Number of fields every record of this resource must have.
    pub fn field_count(self) -> usize {
        match self {
            Resource::Inventory => 4,
            Resource::Suppliers => 3,
            Resource::Hospitals => 2,
            Resource::Distribution => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Resource::Inventory => "inventory",
            Resource::Suppliers => "suppliers",
            Resource::Hospitals => "hospitals",
            Resource::Distribution => "distribution",
        }
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A record as read from the backend: split fields plus its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the resource (header included).
    pub line: u64,
    pub fields: Vec<String>,
}

/// Record store operation error.
///
/// Infrastructure errors only; business failures live in `DomainError`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{resource} resource not found ({location})")]
    ResourceMissing { resource: Resource, location: String },

    #[error("malformed {resource} record at line {line}: {reason}")]
    Malformed {
        resource: Resource,
        line: u64,
        reason: String,
    },

    #[error("I/O failure on {resource}: {source}")]
    Io {
        resource: Resource,
        #[source]
        source: std::io::Error,
    },

    #[error("delimited-text failure on {resource}: {source}")]
    Csv {
        resource: Resource,
        #[source]
        source: csv::Error,
    },

    #[error("record store lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub(crate) fn io(resource: Resource, source: std::io::Error) -> Self {
        Self::Io { resource, source }
    }

    pub(crate) fn csv(resource: Resource, source: csv::Error) -> Self {
        Self::Csv { resource, source }
    }
}

/// Row-level storage of the four resources.
///
/// ## Semantics
///
/// - `read_rows` returns data rows in file order, header excluded; a missing
///   resource is `StoreError::ResourceMissing`.
/// - `write_rows` replaces the whole resource (header rewritten) and must not
///   leave a truncated resource behind if interrupted.
/// - `append_row` adds one row at the end, creating the resource (with its
///   header, if any) when absent.
///
/// Backends serialize their own writes; callers still own read-modify-write
/// sequences, which are not atomic across calls.
pub trait RecordStore: Send + Sync {
    fn exists(&self, resource: Resource) -> Result<bool, StoreError>;

    fn read_rows(&self, resource: Resource) -> Result<Vec<RawRow>, StoreError>;

    fn write_rows(&self, resource: Resource, rows: &[Vec<String>]) -> Result<(), StoreError>;

    fn append_row(&self, resource: Resource, row: &[String]) -> Result<(), StoreError>;
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn exists(&self, resource: Resource) -> Result<bool, StoreError> {
        (**self).exists(resource)
    }

    fn read_rows(&self, resource: Resource) -> Result<Vec<RawRow>, StoreError> {
        (**self).read_rows(resource)
    }

    fn write_rows(&self, resource: Resource, rows: &[Vec<String>]) -> Result<(), StoreError> {
        (**self).write_rows(resource, rows)
    }

    fn append_row(&self, resource: Resource, row: &[String]) -> Result<(), StoreError> {
        (**self).append_row(resource, row)
    }
}

impl<S> RecordStore for &S
where
    S: RecordStore + ?Sized,
{
    fn exists(&self, resource: Resource) -> Result<bool, StoreError> {
        (**self).exists(resource)
    }

    fn read_rows(&self, resource: Resource) -> Result<Vec<RawRow>, StoreError> {
        (**self).read_rows(resource)
    }

    fn write_rows(&self, resource: Resource, rows: &[Vec<String>]) -> Result<(), StoreError> {
        (**self).write_rows(resource, rows)
    }

    fn append_row(&self, resource: Resource, row: &[String]) -> Result<(), StoreError> {
        (**self).append_row(resource, row)
    }
}
