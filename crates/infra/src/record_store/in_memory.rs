use std::collections::HashMap;
use std::sync::RwLock;

use super::r#trait::{RawRow, RecordStore, Resource, StoreError};

/// In-memory record store.
///
/// Intended for tests/dev. Rows are kept exactly as written; line numbers are
/// reported as if a header occupied line 1 for resources that have one.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    resources: RwLock<HashMap<Resource, Vec<Vec<String>>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a resource with raw rows, bypassing record encoding.
    pub fn insert_raw<I, R, F>(&self, resource: Resource, rows: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = F>,
        F: Into<String>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect())
            .collect();
        self.write_rows(resource, &rows)
    }
}

impl RecordStore for InMemoryRecordStore {
    fn exists(&self, resource: Resource) -> Result<bool, StoreError> {
        let resources = self.resources.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(resources.contains_key(&resource))
    }

    fn read_rows(&self, resource: Resource) -> Result<Vec<RawRow>, StoreError> {
        let resources = self.resources.read().map_err(|_| StoreError::LockPoisoned)?;
        let rows = resources
            .get(&resource)
            .ok_or_else(|| StoreError::ResourceMissing {
                resource,
                location: "memory".to_string(),
            })?;

        let first_line = if resource.header().is_some() { 2 } else { 1 };
        Ok(rows
            .iter()
            .enumerate()
            .map(|(idx, fields)| RawRow {
                line: first_line + idx as u64,
                fields: fields.clone(),
            })
            .collect())
    }

    fn write_rows(&self, resource: Resource, rows: &[Vec<String>]) -> Result<(), StoreError> {
        let mut resources = self.resources.write().map_err(|_| StoreError::LockPoisoned)?;
        resources.insert(resource, rows.to_vec());
        Ok(())
    }

    fn append_row(&self, resource: Resource, row: &[String]) -> Result<(), StoreError> {
        let mut resources = self.resources.write().map_err(|_| StoreError::LockPoisoned)?;
        resources.entry(resource).or_default().push(row.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_resource_is_reported() {
        let store = InMemoryRecordStore::new();
        assert!(!store.exists(Resource::Hospitals).unwrap());
        match store.read_rows(Resource::Hospitals) {
            Err(StoreError::ResourceMissing { resource, .. }) => {
                assert_eq!(resource, Resource::Hospitals)
            }
            other => panic!("Expected ResourceMissing, got {other:?}"),
        }
    }

    #[test]
    fn line_numbers_account_for_header() {
        let store = InMemoryRecordStore::new();
        store
            .insert_raw(Resource::Hospitals, [["H01", "General"], ["H02", "District"]])
            .unwrap();
        store
            .append_row(Resource::Distribution, &["HC".into(), "5".into(), "H01".into()])
            .unwrap();

        let lines: Vec<u64> = store
            .read_rows(Resource::Hospitals)
            .unwrap()
            .iter()
            .map(|r| r.line)
            .collect();
        assert_eq!(lines, vec![2, 3]);
        assert_eq!(store.read_rows(Resource::Distribution).unwrap()[0].line, 1);
    }

    #[test]
    fn concurrent_appends_through_shared_handle_are_all_kept() {
        let store = std::sync::Arc::new(InMemoryRecordStore::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    for n in 0..25 {
                        let row = vec![format!("I{t}"), (n + 1).to_string(), "H01".to_string()];
                        store.append_row(Resource::Distribution, &row).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.read_rows(Resource::Distribution).unwrap().len(), 100);
    }
}
