use serde::{Deserialize, Serialize};

use ppetrack_core::{DomainError, DomainResult, Entity, HospitalCode, SupplierCode};

/// A supplier shipping items into the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub supplier_code: SupplierCode,
    pub name: String,
    pub location: String,
}

impl Supplier {
    pub fn new(
        supplier_code: SupplierCode,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("supplier name cannot be empty"));
        }
        Ok(Self {
            supplier_code,
            name,
            location: location.into(),
        })
    }
}

impl Entity for Supplier {
    type Id = SupplierCode;

    fn id(&self) -> &Self::Id {
        &self.supplier_code
    }
}

/// A hospital receiving distributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    pub hospital_code: HospitalCode,
    pub hospital_name: String,
}

impl Hospital {
    pub fn new(hospital_code: HospitalCode, hospital_name: impl Into<String>) -> DomainResult<Self> {
        let hospital_name = hospital_name.into();
        if hospital_name.trim().is_empty() {
            return Err(DomainError::validation("hospital name cannot be empty"));
        }
        Ok(Self {
            hospital_code,
            hospital_name,
        })
    }

    /// Parse an operator-supplied `CODE=NAME` pair.
    pub fn parse_assignment(raw: &str) -> DomainResult<Self> {
        let (code, name) = raw
            .split_once('=')
            .ok_or_else(|| DomainError::validation(format!("expected CODE=NAME, got '{raw}'")))?;
        Self::new(HospitalCode::new(code)?, name.trim())
    }
}

impl Entity for Hospital {
    type Id = HospitalCode;

    fn id(&self) -> &Self::Id {
        &self.hospital_code
    }
}
