//! Quantity validation shared by stock adjustments and distributions.

use crate::error::{DomainError, DomainResult};

/// Validate an operator-supplied quantity: it must be strictly positive.
pub fn positive_quantity(value: i64) -> DomainResult<u64> {
    if value <= 0 {
        return Err(DomainError::invalid_quantity(format!(
            "quantity must be positive (got {value})"
        )));
    }
    Ok(value as u64)
}
