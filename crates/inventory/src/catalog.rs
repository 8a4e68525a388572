//! The fixed set of PPE item types seeded at initialization.

use serde::{Deserialize, Serialize};

use ppetrack_core::{DomainResult, ItemCode, SupplierCode};

/// One seedable item type and the supplier it is sourced from by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub item_code: ItemCode,
    pub item_name: String,
    pub supplier_code: SupplierCode,
}

impl CatalogEntry {
    pub fn new(item_code: &str, item_name: &str, supplier_code: &str) -> DomainResult<Self> {
        Ok(Self {
            item_code: ItemCode::new(item_code)?,
            item_name: item_name.to_string(),
            supplier_code: SupplierCode::new(supplier_code)?,
        })
    }
}

const DEFAULT_ITEMS: [(&str, &str); 6] = [
    ("HC", "Head Cover"),
    ("FS", "Face Shield"),
    ("MS", "Mask"),
    ("GL", "Gloves"),
    ("GW", "Gown"),
    ("SC", "Shoe Covers"),
];

/// The six standard item types, all sourced from `S01` until reassigned.
pub fn default_catalog() -> Vec<CatalogEntry> {
    DEFAULT_ITEMS
        .iter()
        .filter_map(|(code, name)| CatalogEntry::new(code, name, "S01").ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_six_unique_items() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 6);

        let mut codes: Vec<&str> = catalog.iter().map(|e| e.item_code.as_str()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 6);
    }
}
