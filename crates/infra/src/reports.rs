//! Read-side joins over the four resources.
//!
//! Reports load their inputs once and hand back a value whose entries are
//! computed lazily while the caller iterates.

use std::collections::HashMap;
use std::convert::Infallible;

use chrono::{Datelike, NaiveDate};

use ppetrack_core::{DomainError, DomainResult, HospitalCode, ItemCode};
use ppetrack_distribution::{DistributionRecord, Tally, totals_by_hospital};
use ppetrack_inventory::InventoryItem;
use ppetrack_parties::{Hospital, Supplier};

use crate::record_store::{MalformedPolicy, RecordStore, RecordStoreExt};
use crate::services::ServiceError;

/// One line of the inventory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLine {
    pub item: InventoryItem,
    /// Quantity is below [`ppetrack_inventory::LOW_STOCK_THRESHOLD`].
    pub low_stock: bool,
}

/// Suppliers with the items they source.
#[derive(Debug, Clone)]
pub struct SupplierReport {
    suppliers: Vec<Supplier>,
    items: Vec<InventoryItem>,
}

/// A supplier and a lazy view of its items, in inventory file order.
#[derive(Debug, Clone, Copy)]
pub struct SupplierEntry<'a> {
    pub supplier: &'a Supplier,
    items: &'a [InventoryItem],
}

impl SupplierReport {
    pub fn entries(&self) -> impl Iterator<Item = SupplierEntry<'_>> {
        self.suppliers.iter().map(|supplier| SupplierEntry {
            supplier,
            items: &self.items,
        })
    }
}

impl<'a> SupplierEntry<'a> {
    pub fn items(&self) -> impl Iterator<Item = &'a InventoryItem> + use<'a> {
        let (supplier, items) = (self.supplier, self.items);
        items
            .iter()
            .filter(move |i| i.supplier_code == supplier.supplier_code)
    }
}

/// Hospitals with the item totals shipped to them.
#[derive(Debug, Clone)]
pub struct HospitalReport {
    hospitals: Vec<Hospital>,
    totals: HashMap<HospitalCode, Tally<ItemCode>>,
}

/// A hospital and its per-item totals; empty if nothing was shipped there.
#[derive(Debug, Clone, Copy)]
pub struct HospitalEntry<'a> {
    pub hospital: &'a Hospital,
    totals: Option<&'a Tally<ItemCode>>,
}

impl HospitalReport {
    pub fn entries(&self) -> impl Iterator<Item = HospitalEntry<'_>> {
        self.hospitals.iter().map(|hospital| HospitalEntry {
            hospital,
            totals: self.totals.get(&hospital.hospital_code),
        })
    }
}

impl<'a> HospitalEntry<'a> {
    pub fn items(&self) -> impl Iterator<Item = (&'a ItemCode, u64)> + use<'a> {
        let totals = self.totals;
        totals.into_iter().flat_map(|t| t.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_none_or(Tally::is_empty)
    }
}

/// A calendar month given as `MM/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth {
    pub year: i32,
    pub month: u32,
}

impl core::str::FromStr for ReportMonth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(&format!("01/{}", s.trim()), "%d/%m/%Y")
            .map_err(|_| DomainError::validation(format!("month must be MM/YYYY, got '{s}'")))?;
        Ok(Self {
            year: date.year(),
            month: date.month(),
        })
    }
}

impl core::fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

/// Produces supplier, hospital and stock summaries.
#[derive(Debug, Clone)]
pub struct ReportingService<S> {
    store: S,
    policy: MalformedPolicy,
}

impl<S: RecordStore> ReportingService<S> {
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

    /// Every supplier in file order, each with the items it sources.
    pub fn supplier_report(&self) -> Result<SupplierReport, ServiceError> {
        Ok(SupplierReport {
            suppliers: self.store.load_with_policy(self.policy)?,
            items: self.store.load_with_policy(self.policy)?,
        })
    }

    /// Every hospital in file order with its per-item distribution totals.
    pub fn hospital_report(&self) -> Result<HospitalReport, ServiceError> {
        let hospitals: Vec<Hospital> = self.store.load_with_policy(self.policy)?;
        let ledger: Vec<DistributionRecord> = self.store.load_with_policy(self.policy)?;
        Ok(HospitalReport {
            hospitals,
            totals: totals_by_hospital(&ledger),
        })
    }

    /// All items sorted by item code, flagged when low on stock.
    pub fn inventory_listing(&self) -> Result<Vec<StockLine>, ServiceError> {
        let mut items: Vec<InventoryItem> = self.store.load_with_policy(self.policy)?;
        items.sort_by(|a, b| a.item_code.cmp(&b.item_code));

        Ok(items
            .into_iter()
            .map(|item| StockLine {
                low_stock: item.is_low_stock(),
                item,
            })
            .collect())
    }

    /// Transactions for one month. Not implemented: the ledger carries no
    /// dates, so this validates `month_spec` and then always fails.
    pub fn monthly_report(&self, month_spec: &str) -> DomainResult<Infallible> {
        let month: ReportMonth = month_spec.parse()?;
        Err(DomainError::not_implemented(format!(
            "monthly transaction report for {month}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_store::{InMemoryRecordStore, Resource};

    fn store() -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        store
            .insert_raw(
                Resource::Inventory,
                [
                    ["MS", "S02", "Mask", "10"],
                    ["HC", "S01", "Head Cover", "30"],
                    ["FS", "S01", "Face Shield", "5"],
                ],
            )
            .unwrap();
        store
            .insert_raw(
                Resource::Suppliers,
                [
                    ["S01", "SDN", "Selangor"],
                    ["S02", "DND", "Kuala Lumpur"],
                    ["S03", "ADN", "Seremban"],
                ],
            )
            .unwrap();
        store
            .insert_raw(Resource::Hospitals, [["H01", "General"], ["H02", "District"]])
            .unwrap();
        store
            .insert_raw(
                Resource::Distribution,
                [
                    ["HC", "10", "H02"],
                    ["MS", "4", "H02"],
                    ["HC", "5", "H02"],
                    ["HC", "1", "H09"],
                ],
            )
            .unwrap();
        store
    }

    #[test]
    fn listing_is_sorted_and_flags_low_stock() {
        let store = store();
        let lines = ReportingService::new(&store).inventory_listing().unwrap();

        let view: Vec<(&str, u64, bool)> = lines
            .iter()
            .map(|l| (l.item.item_code.as_str(), l.item.quantity, l.low_stock))
            .collect();
        assert_eq!(
            view,
            vec![("FS", 5, true), ("HC", 30, false), ("MS", 10, true)]
        );
    }

    #[test]
    fn listing_is_idempotent() {
        let store = store();
        let service = ReportingService::new(&store);
        assert_eq!(
            service.inventory_listing().unwrap(),
            service.inventory_listing().unwrap()
        );
    }

    #[test]
    fn supplier_report_lists_items_per_supplier_in_file_order() {
        let store = store();
        let report = ReportingService::new(&store).supplier_report().unwrap();

        let view: Vec<(&str, Vec<&str>)> = report
            .entries()
            .map(|e| {
                (
                    e.supplier.supplier_code.as_str(),
                    e.items().map(|i| i.item_code.as_str()).collect(),
                )
            })
            .collect();
        assert_eq!(
            view,
            vec![
                ("S01", vec!["HC", "FS"]),
                ("S02", vec!["MS"]),
                ("S03", vec![]),
            ]
        );
    }

    #[test]
    fn hospital_report_joins_totals_in_hospital_order() {
        let store = store();
        let report = ReportingService::new(&store).hospital_report().unwrap();
        let entries: Vec<HospitalEntry<'_>> = report.entries().collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].hospital.hospital_code.as_str(), "H01");
        assert!(entries[0].is_empty());

        let h02: Vec<(&str, u64)> = entries[1].items().map(|(c, q)| (c.as_str(), q)).collect();
        assert_eq!(h02, vec![("HC", 15), ("MS", 4)]);
    }

    #[test]
    fn monthly_report_is_explicitly_unimplemented() {
        let store = store();
        let service = ReportingService::new(&store);

        match service.monthly_report("03/2024") {
            Err(DomainError::NotImplemented(msg)) => assert!(msg.contains("03/2024")),
            other => panic!("Expected NotImplemented, got {other:?}"),
        }
        assert!(matches!(
            service.monthly_report("13/2024"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn report_month_parses_single_digit_months() {
        let month: ReportMonth = "3/2024".parse().unwrap();
        assert_eq!(month, ReportMonth { year: 2024, month: 3 });
        assert_eq!(month.to_string(), "03/2024");
    }
}
