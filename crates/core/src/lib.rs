//! `ppetrack-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the inventory,
//! parties and distribution crates (no IO, no storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod quantity;

pub use entity::{Entity, find_by_id};
pub use error::{DomainError, DomainResult};
pub use id::{HospitalCode, ItemCode, SupplierCode};
pub use quantity::positive_quantity;
