//! Distribution domain module.
//!
//! Distribution records form an append-only ledger of boxes shipped from the
//! warehouse to hospitals. This crate holds the record type and the pure
//! aggregations over it (no IO, no storage).

pub mod record;
pub mod tally;

pub use record::{DistributionRecord, totals_by_hospital, totals_for_item};
pub use tally::Tally;
