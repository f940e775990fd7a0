//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// invariants, conflicts). Persistence concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A funded operation's cost exceeds the funding account's balance.
    #[error("insufficient funds in account '{0}'")]
    InsufficientFunds(String),

    /// A sale requested more units than are on hand.
    #[error("insufficient stock for product '{0}'")]
    InsufficientStock(String),

    /// A referenced account/product/agreement is absent.
    #[error("not found")]
    NotFound,

    /// The account name is already registered.
    #[error("account '{0}' already exists")]
    DuplicateAccount(String),

    /// The product name is already registered.
    #[error("product '{0}' already exists")]
    DuplicateProduct(String),

    /// The resulting quantity would go below zero.
    #[error("quantity would go negative")]
    Negative,

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn insufficient_funds(account: impl Into<String>) -> Self {
        Self::InsufficientFunds(account.into())
    }

    pub fn insufficient_stock(product: impl Into<String>) -> Self {
        Self::InsufficientStock(product.into())
    }

    pub fn duplicate_account(name: impl Into<String>) -> Self {
        Self::DuplicateAccount(name.into())
    }

    pub fn duplicate_product(name: impl Into<String>) -> Self {
        Self::DuplicateProduct(name.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
