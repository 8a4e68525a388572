//! Configuration loading and representation.
//!
//! Every table the tracker used to hard-code (credentials, suppliers, the item
//! catalog) is injected through [`AppConfig`], so tests and deployments can
//! substitute their own.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ppetrack_auth::{CredentialTable, UserCredential};
use ppetrack_core::SupplierCode;
use ppetrack_inventory::{CatalogEntry, default_catalog};
use ppetrack_parties::{Hospital, Supplier};

use crate::record_store::{MalformedPolicy, ResourceFiles};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "PPETRACK_CONFIG";
/// Environment variable overriding `data_dir`.
pub const DATA_DIR_ENV: &str = "PPETRACK_DATA_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Process-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the four resource files.
    pub data_dir: PathBuf,
    pub files: ResourceFiles,
    /// Boxes of each catalog item at initialization.
    pub initial_quantity: u64,
    pub suppliers: Vec<Supplier>,
    /// Hospitals written at initialization unless the operator supplies some.
    pub hospitals: Vec<Hospital>,
    pub catalog: Vec<CatalogEntry>,
    pub users: Vec<UserCredential>,
    /// Applied by read-only operations; mutations always abort.
    pub on_malformed: MalformedPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            files: ResourceFiles::default(),
            initial_quantity: 100,
            suppliers: default_suppliers(),
            hospitals: Vec::new(),
            catalog: default_catalog(),
            users: (1..=4)
                .map(|n| UserCredential::from_plaintext(format!("user{n}"), &format!("password{n}")))
                .collect(),
            on_malformed: MalformedPolicy::Abort,
        }
    }
}

fn default_suppliers() -> Vec<Supplier> {
    [
        ("S01", "SDN", "Selangor"),
        ("S02", "DND", "Kuala Lumpur"),
        ("S03", "ADN", "Seremban"),
    ]
    .into_iter()
    .filter_map(|(code, name, location)| {
        Supplier::new(SupplierCode::new(code).ok()?, name, location).ok()
    })
    .collect()
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// `explicit` wins over `PPETRACK_CONFIG`; without either the defaults are
    /// used. `PPETRACK_DATA_DIR` overrides `data_dir` in every case.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(explicit, |key| std::env::var(key).ok())
    }

    /// As [`AppConfig::load`], reading variables through `env`.
    pub fn load_with_env(
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => {
                tracing::debug!("no config file given; using defaults");
                Self::default()
            }
        };

        if let Some(dir) = env(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: shown.clone(),
            source,
        })?;
        tracing::info!(path = %shown, "loaded config");
        Ok(config)
    }

    /// Reject tables the bootstrap could not seed consistently.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suppliers.is_empty() {
            return Err(ConfigError::Invalid("at least one supplier is required".to_string()));
        }

        // Deserialized entries bypass the constructors' name checks.
        for s in &self.suppliers {
            Supplier::new(s.supplier_code.clone(), s.name.as_str(), s.location.as_str()).map_err(
                |e| ConfigError::Invalid(format!("supplier {}: {e}", s.supplier_code)),
            )?;
        }
        for h in &self.hospitals {
            Hospital::new(h.hospital_code.clone(), h.hospital_name.as_str()).map_err(|e| {
                ConfigError::Invalid(format!("hospital {}: {e}", h.hospital_code))
            })?;
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.suppliers.iter().find(|s| !seen.insert(&s.supplier_code)) {
            return Err(ConfigError::Invalid(format!(
                "duplicate supplier code {}",
                dup.supplier_code
            )));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.catalog.iter().find(|e| !seen.insert(&e.item_code)) {
            return Err(ConfigError::Invalid(format!(
                "duplicate item code {}",
                dup.item_code
            )));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.hospitals.iter().find(|h| !seen.insert(&h.hospital_code)) {
            return Err(ConfigError::Invalid(format!(
                "duplicate hospital code {}",
                dup.hospital_code
            )));
        }

        Ok(())
    }

    pub fn credentials(&self) -> CredentialTable {
        CredentialTable::new(self.users.clone())
    }
}
