//! Domain error model.

use thiserror::Error;

use crate::id::SweetId;
use crate::validation::ValidationFailure;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Coarse classification of a [`DomainError`] for the boundary layer.
///
/// Callers translating errors into transport responses must keep these three
/// apart: a malformed request, a missing entity, and a rejected business rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller sent something malformed (client error).
    InvalidRequest,
    /// The targeted entity does not exist.
    NotFound,
    /// The request was well formed but a business rule rejected it.
    RuleViolation,
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts). Every variant is detected before any state is
/// mutated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// One or more entity fields failed validation.
    #[error("validation failed: {0}")]
    Validation(ValidationFailure),

    /// The entity reference itself was absent (e.g. a JSON `null`).
    #[error("invalid entity: {0}")]
    InvalidEntity(String),

    /// A malformed identifier or argument was passed to an operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A stock transition amount was not a positive whole number.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// An entity with the same identifier already exists.
    #[error("sweet with id {0} already exists")]
    DuplicateId(SweetId),

    /// No entity with the given identifier exists.
    #[error("sweet with id {0} not found")]
    NotFound(SweetId),

    /// A purchase asked for more than the available stock.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u64, available: u64 },

    /// Search price range has `min > max`.
    #[error("invalid price range: minPrice {min} is greater than maxPrice {max}")]
    InvalidRange { min: f64, max: f64 },

    /// A search request named no usable criterion.
    #[error("at least one valid search criterion is required")]
    EmptyCriteria,
}

impl DomainError {
    pub fn validation(failure: impl Into<ValidationFailure>) -> Self {
        Self::Validation(failure.into())
    }

    pub fn invalid_entity(msg: impl Into<String>) -> Self {
        Self::InvalidEntity(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn duplicate(id: SweetId) -> Self {
        Self::DuplicateId(id)
    }

    pub fn not_found(id: SweetId) -> Self {
        Self::NotFound(id)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation(_)
            | DomainError::InvalidEntity(_)
            | DomainError::InvalidArgument(_)
            | DomainError::InvalidQuantity(_)
            | DomainError::InvalidRange { .. }
            | DomainError::EmptyCriteria => ErrorKind::InvalidRequest,
            DomainError::NotFound(_) => ErrorKind::NotFound,
            DomainError::DuplicateId(_) | DomainError::InsufficientStock { .. } => {
                ErrorKind::RuleViolation
            }
        }
    }
}
