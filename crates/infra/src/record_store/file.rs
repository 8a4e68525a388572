use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::r#trait::{RawRow, RecordStore, Resource, StoreError};

/// File names of the four resources inside the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFiles {
    pub inventory: String,
    pub suppliers: String,
    pub hospitals: String,
    pub distribution: String,
}

impl Default for ResourceFiles {
    fn default() -> Self {
        Self {
            inventory: "ppe.txt".to_string(),
            suppliers: "suppliers.txt".to_string(),
            hospitals: "hospitals.txt".to_string(),
            distribution: "distribution.txt".to_string(),
        }
    }
}

impl ResourceFiles {
    pub fn file_name(&self, resource: Resource) -> &str {
        match resource {
            Resource::Inventory => &self.inventory,
            Resource::Suppliers => &self.suppliers,
            Resource::Hospitals => &self.hospitals,
            Resource::Distribution => &self.distribution,
        }
    }
}

/// Record store over comma-delimited text files in one directory.
///
/// Whole-resource rewrites go through a temporary sibling file that is
/// renamed over the original. Writes from this process are serialized; other
/// processes are not coordinated with.
#[derive(Debug)]
pub struct FileRecordStore {
    dir: PathBuf,
    files: ResourceFiles,
    write_lock: Mutex<()>,
}

impl FileRecordStore {
    pub fn new(dir: impl Into<PathBuf>, files: ResourceFiles) -> Self {
        Self {
            dir: dir.into(),
            files,
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, resource: Resource) -> PathBuf {
        self.dir.join(self.files.file_name(resource))
    }

    fn writer<W: Write>(inner: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(inner)
    }

    fn ensure_dir(&self, resource: Resource) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(resource, e))
    }

    /// Whether a non-empty file ends without a line terminator.
    fn lacks_trailing_newline(file: &mut File) -> std::io::Result<bool> {
        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(false);
        }
        file.seek(SeekFrom::Start(len - 1))?;
        let mut last = [0u8; 1];
        file.read_exact(&mut last)?;
        Ok(last[0] != b'\n')
    }
}

impl RecordStore for FileRecordStore {
    fn exists(&self, resource: Resource) -> Result<bool, StoreError> {
        self.path(resource)
            .try_exists()
            .map_err(|e| StoreError::io(resource, e))
    }

    fn read_rows(&self, resource: Resource) -> Result<Vec<RawRow>, StoreError> {
        let path = self.path(resource);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::ResourceMissing {
                    resource,
                    location: path.display().to_string(),
                });
            }
            Err(e) => return Err(StoreError::io(resource, e)),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let mut expect_header = resource.header();
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| StoreError::csv(resource, e))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if let Some(header) = expect_header.take() {
                if record.iter().eq(header.iter().copied()) {
                    continue;
                }
                tracing::warn!(%resource, line, "missing header row; first line read as data");
            }

            rows.push(RawRow {
                line,
                fields: record.iter().map(str::to_string).collect(),
            });
        }

        tracing::debug!(%resource, rows = rows.len(), path = %path.display(), "loaded resource");
        Ok(rows)
    }

    fn write_rows(&self, resource: Resource, rows: &[Vec<String>]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        self.ensure_dir(resource)?;

        let path = self.path(resource);
        let mut tmp =
            tempfile::NamedTempFile::new_in(&self.dir).map_err(|e| StoreError::io(resource, e))?;

        {
            let mut writer = Self::writer(&mut tmp);
            if let Some(header) = resource.header() {
                writer
                    .write_record(header)
                    .map_err(|e| StoreError::csv(resource, e))?;
            }
            for row in rows {
                writer
                    .write_record(row)
                    .map_err(|e| StoreError::csv(resource, e))?;
            }
            writer.flush().map_err(|e| StoreError::io(resource, e))?;
        }

        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io(resource, e))?;
        tmp.persist(&path)
            .map_err(|e| StoreError::io(resource, e.error))?;

        tracing::debug!(%resource, rows = rows.len(), path = %path.display(), "rewrote resource");
        Ok(())
    }

    fn append_row(&self, resource: Resource, row: &[String]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::LockPoisoned)?;
        self.ensure_dir(resource)?;

        let path = self.path(resource);
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)
            .map_err(|e| StoreError::io(resource, e))?;

        let is_new = file.metadata().map_err(|e| StoreError::io(resource, e))?.len() == 0;
        if Self::lacks_trailing_newline(&mut file).map_err(|e| StoreError::io(resource, e))? {
            file.write_all(b"\n")
                .map_err(|e| StoreError::io(resource, e))?;
        }

        let mut writer = Self::writer(&mut file);
        if is_new {
            if let Some(header) = resource.header() {
                writer
                    .write_record(header)
                    .map_err(|e| StoreError::csv(resource, e))?;
            }
        }
        writer
            .write_record(row)
            .map_err(|e| StoreError::csv(resource, e))?;
        writer.flush().map_err(|e| StoreError::io(resource, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, FileRecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRecordStore::new(dir.path(), ResourceFiles::default());
        (dir, store)
    }

    #[test]
    fn default_file_names_are_distinct() {
        let files = ResourceFiles::default();
        let mut names: Vec<&str> = Resource::ALL.iter().map(|r| files.file_name(*r)).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Resource::ALL.len());
    }

    #[test]
    fn missing_file_is_resource_missing() {
        let (_dir, store) = store();
        assert!(!store.exists(Resource::Inventory).unwrap());
        assert!(matches!(
            store.read_rows(Resource::Inventory),
            Err(StoreError::ResourceMissing { .. })
        ));
    }

    #[test]
    fn write_rows_emits_header_then_rows() {
        let (_dir, store) = store();
        store
            .write_rows(
                Resource::Suppliers,
                &[vec!["S01".into(), "SDN".into(), "Selangor".into()]],
            )
            .unwrap();

        let text = fs::read_to_string(store.path(Resource::Suppliers)).unwrap();
        assert_eq!(text, "SupplierCode,Name,Location\nS01,SDN,Selangor\n");
    }

    #[test]
    fn read_skips_header_blank_lines_and_trims_fields() {
        let (_dir, store) = store();
        fs::write(
            store.path(Resource::Hospitals),
            "HospitalCode,HospitalName\n H01 , General Hospital \n\nH02,District\n",
        )
        .unwrap();

        let rows = store.read_rows(Resource::Hospitals).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fields, vec!["H01", "General Hospital"]);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].fields, vec!["H02", "District"]);
    }

    #[test]
    fn headerless_file_keeps_its_first_record() {
        let (_dir, store) = store();
        fs::write(
            store.path(Resource::Suppliers),
            "S01,SDN,Selangor\nS02,DND,Kuala Lumpur\n",
        )
        .unwrap();

        let rows = store.read_rows(Resource::Suppliers).unwrap();
        let codes: Vec<&str> = rows.iter().map(|r| r.fields[0].as_str()).collect();
        assert_eq!(codes, vec!["S01", "S02"]);
        assert_eq!(rows[0].line, 1);
    }

    #[test]
    fn adjusting_a_headerless_inventory_preserves_every_item() {
        use crate::services::InventoryService;
        use ppetrack_core::ItemCode;
        use ppetrack_inventory::Direction;

        let (_dir, store) = store();
        fs::write(
            store.path(Resource::Inventory),
            "HC,S01,Head Cover,100\nFS,S01,Face Shield,100\n",
        )
        .unwrap();

        let updated = InventoryService::new(&store)
            .adjust_quantity(&ItemCode::new("FS").unwrap(), 1, Direction::Add)
            .unwrap();
        assert_eq!(updated.quantity, 101);

        let text = fs::read_to_string(store.path(Resource::Inventory)).unwrap();
        assert_eq!(
            text,
            "ItemCode,SupplierCode,ItemName,Quantity\n\
             HC,S01,Head Cover,100\n\
             FS,S01,Face Shield,101\n"
        );
    }

    #[test]
    fn fields_with_commas_survive_a_rewrite() {
        let (_dir, store) = store();
        let row = vec!["H01".to_string(), "St. Mary, North Wing".to_string()];
        store.write_rows(Resource::Hospitals, &[row.clone()]).unwrap();

        let rows = store.read_rows(Resource::Hospitals).unwrap();
        assert_eq!(rows[0].fields, row);
    }

    #[test]
    fn append_creates_headerless_distribution_log() {
        let (_dir, store) = store();
        store
            .append_row(Resource::Distribution, &["HC".into(), "10".into(), "H01".into()])
            .unwrap();
        store
            .append_row(Resource::Distribution, &["HC".into(), "5".into(), "H01".into()])
            .unwrap();

        let text = fs::read_to_string(store.path(Resource::Distribution)).unwrap();
        assert_eq!(text, "HC,10,H01\nHC,5,H01\n");
    }

    #[test]
    fn append_repairs_missing_trailing_newline() {
        let (_dir, store) = store();
        fs::write(store.path(Resource::Distribution), "HC,10,H01").unwrap();
        store
            .append_row(Resource::Distribution, &["MS".into(), "2".into(), "H02".into()])
            .unwrap();

        let rows = store.read_rows(Resource::Distribution).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].fields, vec!["MS", "2", "H02"]);
    }

    #[test]
    fn append_to_missing_headed_resource_writes_header() {
        let (_dir, store) = store();
        store
            .append_row(Resource::Hospitals, &["H01".into(), "General".into()])
            .unwrap();

        let text = fs::read_to_string(store.path(Resource::Hospitals)).unwrap();
        assert_eq!(text, "HospitalCode,HospitalName\nH01,General\n");
    }

    #[test]
    fn rewrite_leaves_no_temporary_files() {
        let (dir, store) = store();
        store.write_rows(Resource::Hospitals, &[]).unwrap();
        store.write_rows(Resource::Hospitals, &[]).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
