//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, lookups). Storage concerns belong to the infra layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Operator input failed validation (e.g. empty code, bad month spec).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A quantity was zero, negative or out of range.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Removing stock would drive the quantity below zero.
    #[error("insufficient stock for {item_code}: requested {requested}, current stock {available}")]
    InsufficientStock {
        item_code: String,
        available: u64,
        requested: u64,
    },

    /// No inventory item carries the requested code.
    #[error("item {0} not found")]
    ItemNotFound(String),

    /// The operation exists as a placeholder only.
    #[error("not implemented: {0}")]
    NotImplemented(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn item_not_found(code: impl Into<String>) -> Self {
        Self::ItemNotFound(code.into())
    }

    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::NotImplemented(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message_reports_current_stock() {
        let err = DomainError::InsufficientStock {
            item_code: "HC".to_string(),
            available: 70,
            requested: 1000,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for HC: requested 1000, current stock 70"
        );
    }
}
