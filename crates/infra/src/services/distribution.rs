use ppetrack_core::{HospitalCode, ItemCode};
use ppetrack_distribution::{DistributionRecord, Tally, totals_for_item};

use crate::record_store::{MalformedPolicy, RecordStore, RecordStoreExt};

use super::error::ServiceError;

/// Appends to and searches the distribution ledger.
#[derive(Debug, Clone)]
pub struct DistributionService<S> {
    store: S,
    policy: MalformedPolicy,
}

impl<S: RecordStore> DistributionService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: MalformedPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Append one shipment to the ledger.
    ///
    /// `item_code` and `hospital_code` are recorded as given; they are not
    /// checked against the inventory or hospital tables.
    pub fn record_distribution(
        &self,
        item_code: &ItemCode,
        quantity: i64,
        hospital_code: &HospitalCode,
    ) -> Result<DistributionRecord, ServiceError> {
        let record = DistributionRecord::new(item_code.clone(), quantity, hospital_code.clone())?;
        self.store.append(&record)?;

        tracing::info!(
            item = %record.item_code,
            quantity = record.quantity,
            hospital = %record.hospital_code,
            "recorded distribution"
        );
        Ok(record)
    }

    /// Total boxes of `item_code` shipped per hospital, in first-seen order.
    ///
    /// An empty tally means nothing was shipped; a missing ledger is an error.
    pub fn search_by_item(&self, item_code: &ItemCode) -> Result<Tally<HospitalCode>, ServiceError> {
        let ledger: Vec<DistributionRecord> = self.store.load_with_policy(self.policy)?;
        Ok(totals_for_item(&ledger, item_code))
    }
}
