//! First-run seeding of the four resources.

use ppetrack_core::{DomainError, ItemCode, SupplierCode, find_by_id};
use ppetrack_distribution::DistributionRecord;
use ppetrack_inventory::InventoryItem;
use ppetrack_parties::{Hospital, Supplier};

use crate::config::AppConfig;
use crate::record_store::{RecordStore, RecordStoreExt, Resource};
use crate::services::ServiceError;

/// Operator choices made at initialization time.
#[derive(Debug, Clone, Default)]
pub struct InitRequest {
    /// Per-item supplier assignments overriding the catalog defaults.
    pub suppliers: Vec<(ItemCode, SupplierCode)>,
    /// Hospitals to register; when empty, the configured hospitals are used.
    pub hospitals: Vec<Hospital>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// The inventory resource already existed; nothing was written.
    AlreadyInitialized,
    Initialized {
        items: usize,
        suppliers: usize,
        hospitals: usize,
    },
}

/// Seed inventory, suppliers, hospitals and an empty distribution log.
///
/// A no-op once the inventory resource exists. Supplier codes that are not in
/// the supplier table fall back to the first configured supplier. Inputs are
/// validated before anything is written.
pub fn initialize<S: RecordStore>(
    store: &S,
    config: &AppConfig,
    request: &InitRequest,
) -> Result<InitOutcome, ServiceError> {
    if store.exists(Resource::Inventory)? {
        tracing::info!("inventory already created; initialization skipped");
        return Ok(InitOutcome::AlreadyInitialized);
    }

    let suppliers: &[Supplier] = &config.suppliers;
    let fallback = suppliers
        .first()
        .map(|s| s.supplier_code.clone())
        .ok_or_else(|| DomainError::validation("no suppliers configured"))?;

    let hospitals = if request.hospitals.is_empty() {
        &config.hospitals
    } else {
        &request.hospitals
    };
    if hospitals.is_empty() {
        return Err(DomainError::validation("at least one hospital is required").into());
    }

    if let Some((code, _)) = request
        .suppliers
        .iter()
        .find(|(code, _)| !config.catalog.iter().any(|e| &e.item_code == code))
    {
        return Err(DomainError::validation(format!("{code} is not a catalog item")).into());
    }

    let items: Vec<InventoryItem> = config
        .catalog
        .iter()
        .map(|entry| {
            let requested = request
                .suppliers
                .iter()
                .rev()
                .find(|(code, _)| code == &entry.item_code)
                .map(|(_, supplier)| supplier)
                .unwrap_or(&entry.supplier_code);

            let supplier_code = if find_by_id(suppliers, requested).is_some() {
                requested.clone()
            } else {
                tracing::warn!(
                    item = %entry.item_code,
                    supplier = %requested,
                    fallback = %fallback,
                    "unknown supplier code; using fallback"
                );
                fallback.clone()
            };

            InventoryItem::new(
                entry.item_code.clone(),
                supplier_code,
                entry.item_name.clone(),
                config.initial_quantity,
            )
        })
        .collect();

    store.initialize_if_missing(&items)?;
    store.initialize_if_missing(suppliers)?;
    store.initialize_if_missing(hospitals)?;
    store.initialize_if_missing::<DistributionRecord>(&[])?;

    tracing::info!(
        items = items.len(),
        suppliers = suppliers.len(),
        hospitals = hospitals.len(),
        "inventory initialized"
    );
    Ok(InitOutcome::Initialized {
        items: items.len(),
        suppliers: suppliers.len(),
        hospitals: hospitals.len(),
    })
}
