//! Stock-mutation services over a [`RecordStore`](crate::record_store::RecordStore).
//!
//! Services load what they need, apply the pure domain rules from the domain
//! crates, and persist through the store. They hold no state of their own.

pub mod distribution;
pub mod error;
pub mod inventory;

pub use distribution::DistributionService;
pub use error::ServiceError;
pub use inventory::InventoryService;
