//! Infrastructure layer: flat-file record store, services, reports, config.

pub mod bootstrap;
pub mod config;
pub mod record_store;
pub mod reports;
pub mod services;
pub mod tracker;


pub use bootstrap::{InitOutcome, InitRequest};
pub use config::{AppConfig, ConfigError};
pub use record_store::{
    FileRecordStore, InMemoryRecordStore, MalformedPolicy, Record, RecordStore, RecordStoreExt,
    Resource, ResourceFiles, StoreError,
};
pub use reports::{ReportMonth, ReportingService, StockLine};
pub use services::{DistributionService, InventoryService, ServiceError};
pub use tracker::{Dispatched, Tracker};
