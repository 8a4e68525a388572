//! Inventory domain module.
//!
//! This crate contains business rules for warehouse stock, implemented purely
//! as deterministic domain logic (no IO, no storage).

pub mod catalog;
pub mod item;

pub use catalog::{CatalogEntry, default_catalog};
pub use item::{Direction, InventoryItem, LOW_STOCK_THRESHOLD};
