//! Application facade wiring configuration, store and services together.

use ppetrack_auth::CredentialTable;
use ppetrack_core::{HospitalCode, ItemCode};
use ppetrack_distribution::DistributionRecord;
use ppetrack_inventory::{Direction, InventoryItem};

use crate::bootstrap::{self, InitOutcome, InitRequest};
use crate::config::AppConfig;
use crate::record_store::{FileRecordStore, RecordStore};
use crate::reports::ReportingService;
use crate::services::{DistributionService, InventoryService, ServiceError};

/// Result of shipping stock to a hospital.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    /// The inventory item after the removal.
    pub item: InventoryItem,
    pub record: DistributionRecord,
}

/// Entry point used by the shell: one store, one configuration.
#[derive(Debug)]
pub struct Tracker<S> {
    store: S,
    config: AppConfig,
}

impl Tracker<FileRecordStore> {
    /// Open the file-backed tracker rooted at `config.data_dir`.
    pub fn open(config: AppConfig) -> Self {
        let store = FileRecordStore::new(config.data_dir.clone(), config.files.clone());
        tracing::debug!(dir = %store.dir().display(), "opened file record store");
        Self::new(store, config)
    }
}

impl<S: RecordStore> Tracker<S> {
    pub fn new(store: S, config: AppConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn credentials(&self) -> CredentialTable {
        self.config.credentials()
    }

    pub fn inventory(&self) -> InventoryService<&S> {
        InventoryService::new(&self.store)
    }

    pub fn distribution(&self) -> DistributionService<&S> {
        DistributionService::new(&self.store).with_policy(self.config.on_malformed)
    }

    pub fn reports(&self) -> ReportingService<&S> {
        ReportingService::new(&self.store).with_policy(self.config.on_malformed)
    }

    pub fn initialize(&self, request: &InitRequest) -> Result<InitOutcome, ServiceError> {
        bootstrap::initialize(&self.store, &self.config, request)
    }

    /// Remove `quantity` boxes from stock and record the shipment.
    ///
    /// The shipment is only recorded once the removal succeeded. If the
    /// append fails afterwards the stock stays decremented; the two files are
    /// not updated atomically.
    pub fn dispatch(
        &self,
        item_code: &ItemCode,
        quantity: i64,
        hospital_code: &HospitalCode,
    ) -> Result<Dispatched, ServiceError> {
        let item = self
            .inventory()
            .adjust_quantity(item_code, quantity, Direction::Remove)?;

        let record = self
            .distribution()
            .record_distribution(item_code, quantity, hospital_code)
            .inspect_err(|err| {
                tracing::error!(
                    item = %item_code,
                    quantity,
                    hospital = %hospital_code,
                    error = %err,
                    "stock removed but distribution not recorded"
                );
            })?;

        Ok(Dispatched { item, record })
    }
}
