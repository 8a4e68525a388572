use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use ppetrack_core::{DomainResult, HospitalCode, ItemCode, positive_quantity};

use crate::tally::Tally;

/// One shipment of `quantity` boxes of `item_code` to `hospital_code`.
///
/// Neither code is checked against the inventory or hospital tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRecord {
    pub item_code: ItemCode,
    pub quantity: u64,
    pub hospital_code: HospitalCode,
}

impl DistributionRecord {
    /// Build a record from operator input; `quantity` must be positive.
    pub fn new(item_code: ItemCode, quantity: i64, hospital_code: HospitalCode) -> DomainResult<Self> {
        Ok(Self {
            item_code,
            quantity: positive_quantity(quantity)?,
            hospital_code,
        })
    }
}

/// Total boxes of `item_code` per hospital, in first-seen hospital order.
pub fn totals_for_item<'a, I>(records: I, item_code: &ItemCode) -> Tally<HospitalCode>
where
    I: IntoIterator<Item = &'a DistributionRecord>,
{
    records
        .into_iter()
        .filter(|r| &r.item_code == item_code)
        .map(|r| (r.hospital_code.clone(), r.quantity))
        .collect()
}

/// Per-hospital item totals across the whole ledger.
pub fn totals_by_hospital<'a, I>(records: I) -> HashMap<HospitalCode, Tally<ItemCode>>
where
    I: IntoIterator<Item = &'a DistributionRecord>,
{
    let mut totals: HashMap<HospitalCode, Tally<ItemCode>> = HashMap::new();
    for r in records {
        totals
            .entry(r.hospital_code.clone())
            .or_default()
            .add(r.item_code.clone(), r.quantity);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppetrack_core::DomainError;
    use proptest::prelude::*;

    fn record(item: &str, quantity: i64, hospital: &str) -> DistributionRecord {
        DistributionRecord::new(
            ItemCode::new(item).unwrap(),
            quantity,
            HospitalCode::new(hospital).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let err = DistributionRecord::new(
            ItemCode::new("HC").unwrap(),
            0,
            HospitalCode::new("H01").unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuantity(_)));
    }

    #[test]
    fn repeated_shipments_to_one_hospital_are_summed() {
        let ledger = vec![record("HC", 10, "H01"), record("HC", 5, "H01")];
        let totals = totals_for_item(&ledger, &ItemCode::new("HC").unwrap());
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get(&HospitalCode::new("H01").unwrap()), Some(15));
    }

    #[test]
    fn other_items_are_ignored() {
        let ledger = vec![record("MS", 10, "H01"), record("GL", 5, "H02")];
        assert!(totals_for_item(&ledger, &ItemCode::new("HC").unwrap()).is_empty());
    }

    #[test]
    fn totals_by_hospital_groups_then_sums_items() {
        let ledger = vec![
            record("HC", 10, "H01"),
            record("MS", 3, "H02"),
            record("HC", 5, "H01"),
            record("GL", 7, "H01"),
        ];
        let totals = totals_by_hospital(&ledger);
        let h01 = &totals[&HospitalCode::new("H01").unwrap()];
        let items: Vec<(&str, u64)> = h01.iter().map(|(k, q)| (k.as_str(), q)).collect();
        assert_eq!(items, vec![("HC", 15), ("GL", 7)]);
        assert_eq!(totals[&HospitalCode::new("H02").unwrap()].total(), 3);
    }

    proptest! {
        /// Property: per-item totals account for every box shipped of that item.
        #[test]
        fn item_totals_sum_to_ledger_total(
            shipments in prop::collection::vec((0usize..3, 1i64..100, 0usize..4), 0..50)
        ) {
            let items = ["HC", "MS", "GL"];
            let ledger: Vec<DistributionRecord> = shipments
                .iter()
                .map(|(i, q, h)| record(items[*i], *q, &format!("H0{h}")))
                .collect();

            for item in items {
                let code = ItemCode::new(item).unwrap();
                let expected: u64 = ledger
                    .iter()
                    .filter(|r| r.item_code == code)
                    .map(|r| r.quantity)
                    .sum();
                prop_assert_eq!(totals_for_item(&ledger, &code).total(), expected);
            }
        }
    }
}
