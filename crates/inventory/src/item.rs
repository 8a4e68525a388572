use serde::{Deserialize, Serialize};

use ppetrack_core::{DomainError, DomainResult, Entity, ItemCode, SupplierCode, positive_quantity};

/// Items holding fewer boxes than this are flagged as low stock.
pub const LOW_STOCK_THRESHOLD: u64 = 25;

/// Sign of a stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Add,
    Remove,
}

impl core::str::FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "add" => Ok(Direction::Add),
            "remove" => Ok(Direction::Remove),
            _ => Err(DomainError::validation(
                "invalid action; use 'add' or 'remove'",
            )),
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Direction::Add => f.write_str("add"),
            Direction::Remove => f.write_str("remove"),
        }
    }
}

/// One row of the inventory resource.
///
/// # Invariants
/// - `quantity` never goes below zero (enforced by the unsigned type and by
///   [`InventoryItem::adjusted_quantity`]).
/// - `item_code` is unique across the inventory resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item_code: ItemCode,
    pub supplier_code: SupplierCode,
    pub item_name: String,
    pub quantity: u64,
}

impl InventoryItem {
    pub fn new(
        item_code: ItemCode,
        supplier_code: SupplierCode,
        item_name: impl Into<String>,
        quantity: u64,
    ) -> Self {
        Self {
            item_code,
            supplier_code,
            item_name: item_name.into(),
            quantity,
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }

    /// Compute the quantity after applying `delta` in `direction`.
    ///
    /// Pure decision logic: the item itself is not modified.
    pub fn adjusted_quantity(&self, delta: i64, direction: Direction) -> DomainResult<u64> {
        let delta = positive_quantity(delta)?;

        match direction {
            Direction::Add => self.quantity.checked_add(delta).ok_or_else(|| {
                DomainError::invalid_quantity(format!(
                    "adding {delta} to {} overflows",
                    self.item_code
                ))
            }),
            Direction::Remove => {
                if self.quantity < delta {
                    return Err(DomainError::InsufficientStock {
                        item_code: self.item_code.to_string(),
                        available: self.quantity,
                        requested: delta,
                    });
                }
                Ok(self.quantity - delta)
            }
        }
    }
}

impl Entity for InventoryItem {
    type Id = ItemCode;

    fn id(&self) -> &Self::Id {
        &self.item_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(quantity: u64) -> InventoryItem {
        InventoryItem::new(
            ItemCode::new("HC").unwrap(),
            SupplierCode::new("S01").unwrap(),
            "Head Cover",
            quantity,
        )
    }

    #[test]
    fn remove_decrements_quantity() {
        assert_eq!(item(100).adjusted_quantity(30, Direction::Remove).unwrap(), 70);
    }

    #[test]
    fn remove_more_than_stock_reports_current_quantity() {
        let err = item(70).adjusted_quantity(1000, Direction::Remove).unwrap_err();
        assert_eq!(
            err,
            DomainError::InsufficientStock {
                item_code: "HC".to_string(),
                available: 70,
                requested: 1000,
            }
        );
    }

    #[test]
    fn remove_entire_stock_reaches_zero() {
        assert_eq!(item(25).adjusted_quantity(25, Direction::Remove).unwrap(), 0);
    }

    #[test]
    fn add_rejects_non_positive_delta() {
        for delta in [0, -5] {
            match item(10).adjusted_quantity(delta, Direction::Add) {
                Err(DomainError::InvalidQuantity(_)) => {}
                other => panic!("Expected InvalidQuantity, got {other:?}"),
            }
        }
    }

    #[test]
    fn add_overflow_is_rejected() {
        let err = item(u64::MAX).adjusted_quantity(1, Direction::Add).unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuantity(_)));
    }

    #[test]
    fn low_stock_boundary_is_exclusive() {
        assert!(item(24).is_low_stock());
        assert!(!item(25).is_low_stock());
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!(" Remove ".parse::<Direction>().unwrap(), Direction::Remove);
        assert_eq!("ADD".parse::<Direction>().unwrap(), Direction::Add);
        assert!("take".parse::<Direction>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: quantity never drops below zero whatever sequence of
        /// adjustments is attempted; failed adjustments leave it unchanged.
        #[test]
        fn quantity_stays_non_negative(
            start in 0u64..500,
            ops in prop::collection::vec((-50i64..200, any::<bool>()), 1..40)
        ) {
            let mut current = item(start);
            let mut model = start as i128;
            for (delta, add) in ops {
                let direction = if add { Direction::Add } else { Direction::Remove };
                let expected = if add { model + delta as i128 } else { model - delta as i128 };
                match current.adjusted_quantity(delta, direction) {
                    Ok(q) => {
                        prop_assert!(delta > 0);
                        prop_assert_eq!(q as i128, expected);
                        current.quantity = q;
                        model = expected;
                    }
                    Err(_) => prop_assert!(delta <= 0 || expected < 0),
                }
                prop_assert!(model >= 0);
                prop_assert_eq!(current.quantity as i128, model);
            }
        }
    }
}
