//! Typed records on top of the row-level store.

use serde::{Deserialize, Serialize};

use ppetrack_core::{HospitalCode, ItemCode, SupplierCode};
use ppetrack_distribution::DistributionRecord;
use ppetrack_inventory::InventoryItem;
use ppetrack_parties::{Hospital, Supplier};

use super::r#trait::{RawRow, RecordStore, Resource, StoreError};

/// What read-only callers do with a row that does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Fail the whole load.
    #[default]
    Abort,
    /// Log the row and leave it out of the result.
    Skip,
}

/// A row type with a fixed field order in one resource.
pub trait Record: Sized {
    const RESOURCE: Resource;

    /// Decode the fields of one row; the error is a human-readable reason.
    fn from_fields(fields: &[String]) -> Result<Self, String>;

    fn to_fields(&self) -> Vec<String>;

    fn decode(row: &RawRow) -> Result<Self, StoreError> {
        let expected = Self::RESOURCE.field_count();
        let reason = if row.fields.len() != expected {
            format!("expected {expected} fields, found {}", row.fields.len())
        } else {
            match Self::from_fields(&row.fields) {
                Ok(record) => return Ok(record),
                Err(reason) => reason,
            }
        };

        Err(StoreError::Malformed {
            resource: Self::RESOURCE,
            line: row.line,
            reason,
        })
    }
}

fn parse_quantity(raw: &str) -> Result<u64, String> {
    raw.parse::<u64>()
        .map_err(|_| format!("quantity '{raw}' is not a non-negative integer"))
}

impl Record for InventoryItem {
    const RESOURCE: Resource = Resource::Inventory;

    fn from_fields(fields: &[String]) -> Result<Self, String> {
        Ok(InventoryItem::new(
            ItemCode::new(fields[0].as_str()).map_err(|e| e.to_string())?,
            SupplierCode::new(fields[1].as_str()).map_err(|e| e.to_string())?,
            fields[2].clone(),
            parse_quantity(&fields[3])?,
        ))
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.item_code.to_string(),
            self.supplier_code.to_string(),
            self.item_name.clone(),
            self.quantity.to_string(),
        ]
    }
}

impl Record for Supplier {
    const RESOURCE: Resource = Resource::Suppliers;

    fn from_fields(fields: &[String]) -> Result<Self, String> {
        let code = SupplierCode::new(fields[0].as_str()).map_err(|e| e.to_string())?;
        Supplier::new(code, fields[1].clone(), fields[2].clone()).map_err(|e| e.to_string())
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.supplier_code.to_string(),
            self.name.clone(),
            self.location.clone(),
        ]
    }
}

impl Record for Hospital {
    const RESOURCE: Resource = Resource::Hospitals;

    fn from_fields(fields: &[String]) -> Result<Self, String> {
        let code = HospitalCode::new(fields[0].as_str()).map_err(|e| e.to_string())?;
        Hospital::new(code, fields[1].clone()).map_err(|e| e.to_string())
    }

    fn to_fields(&self) -> Vec<String> {
        vec![self.hospital_code.to_string(), self.hospital_name.clone()]
    }
}

impl Record for DistributionRecord {
    const RESOURCE: Resource = Resource::Distribution;

    fn from_fields(fields: &[String]) -> Result<Self, String> {
        let quantity = parse_quantity(&fields[1])?;
        if quantity == 0 {
            return Err("distributed quantity must be positive".to_string());
        }
        Ok(DistributionRecord {
            item_code: ItemCode::new(fields[0].as_str()).map_err(|e| e.to_string())?,
            quantity,
            hospital_code: HospitalCode::new(fields[2].as_str()).map_err(|e| e.to_string())?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.item_code.to_string(),
            self.quantity.to_string(),
            self.hospital_code.to_string(),
        ]
    }
}

/// Typed operations available on every [`RecordStore`].
pub trait RecordStoreExt: RecordStore {
    /// Load every record of `R`'s resource, failing on the first malformed row.
    fn load_all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        self.read_rows(R::RESOURCE)?.iter().map(R::decode).collect()
    }

    /// Load every record, applying `policy` to rows that do not decode.
    fn load_with_policy<R: Record>(&self, policy: MalformedPolicy) -> Result<Vec<R>, StoreError> {
        if policy == MalformedPolicy::Abort {
            return self.load_all::<R>();
        }

        let mut records = Vec::new();
        for row in self.read_rows(R::RESOURCE)? {
            match R::decode(&row) {
                Ok(record) => records.push(record),
                Err(err) => tracing::warn!(error = %err, "skipping malformed record"),
            }
        }
        Ok(records)
    }

    /// Replace the resource content with `records`, in order.
    fn overwrite_all<R: Record>(&self, records: &[R]) -> Result<(), StoreError> {
        let rows: Vec<Vec<String>> = records.iter().map(R::to_fields).collect();
        self.write_rows(R::RESOURCE, &rows)
    }

    fn append<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        self.append_row(R::RESOURCE, &record.to_fields())
    }

    /// Create the resource with its header and `seed` unless it already exists.
    ///
    /// Returns whether the resource was created.
    fn initialize_if_missing<R: Record>(&self, seed: &[R]) -> Result<bool, StoreError> {
        if self.exists(R::RESOURCE)? {
            tracing::debug!(resource = %R::RESOURCE, "resource exists; left untouched");
            return Ok(false);
        }
        self.overwrite_all(seed)?;
        tracing::info!(resource = %R::RESOURCE, records = seed.len(), "created resource");
        Ok(true)
    }
}

impl<S: RecordStore + ?Sized> RecordStoreExt for S {}
