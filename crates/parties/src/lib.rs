//! Parties domain module (suppliers and hospitals).
//!
//! Both tables are written once at initialization and read-only afterwards.

pub mod party;

pub use party::{Hospital, Supplier};
