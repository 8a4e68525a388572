//! Strongly-typed natural keys used across the domain.
//!
//! Codes are short operator-chosen strings (`HC`, `S01`, `H01`). They are
//! compared verbatim after trimming surrounding whitespace.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Code of an inventory item (e.g. `HC`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemCode(String);

/// Code of a supplier (e.g. `S01`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SupplierCode(String);

/// Code of a hospital (e.g. `H01`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HospitalCode(String);

macro_rules! impl_code_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Build a code, rejecting empty input and embedded line breaks.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!($name, " cannot be empty")));
                }
                if trimmed.contains(['\n', '\r']) {
                    return Err(DomainError::validation(concat!(
                        $name,
                        " cannot contain line breaks"
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(code: $t) -> Self {
                code.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_code_newtype!(ItemCode, "ItemCode");
impl_code_newtype!(SupplierCode, "SupplierCode");
impl_code_newtype!(HospitalCode, "HospitalCode");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_trimmed() {
        let code: ItemCode = "  HC ".parse().unwrap();
        assert_eq!(code.as_str(), "HC");
    }

    #[test]
    fn empty_code_is_rejected() {
        let err = SupplierCode::new("   ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn line_breaks_are_rejected() {
        assert!(HospitalCode::new("H0\n1").is_err());
    }

    #[test]
    fn deserialization_goes_through_validation() {
        let code: HospitalCode = serde_json::from_str(r#"" H01 ""#).unwrap();
        assert_eq!(code.as_str(), "H01");
        assert!(serde_json::from_str::<HospitalCode>(r#""""#).is_err());
        assert!(serde_json::from_str::<ItemCode>(r#""H\nC""#).is_err());
        assert_eq!(serde_json::to_string(&code).unwrap(), r#""H01""#);
    }

    #[test]
    fn codes_order_lexicographically() {
        let mut codes = vec![
            ItemCode::new("MS").unwrap(),
            ItemCode::new("FS").unwrap(),
            ItemCode::new("HC").unwrap(),
        ];
        codes.sort();
        let names: Vec<&str> = codes.iter().map(ItemCode::as_str).collect();
        assert_eq!(names, vec!["FS", "HC", "MS"]);
    }
}
