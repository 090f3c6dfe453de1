//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`NutriHubError`] via `#[from]`, so adapters can map one enum onto
//! their own failure surface (HTTP status codes, exit codes, …).

/// Top-level error for every use-case.
#[derive(Debug, thiserror::Error)]
pub enum NutriHubError {
    /// Input failed a domain invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The write would violate a uniqueness rule.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// A stored value could not be decoded.
    #[error(transparent)]
    Corrupted(#[from] CorruptedDataError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("code must not be empty")]
    EmptyCode,

    #[error("food group must not be empty")]
    EmptyFoodGroup,

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("price must not be negative")]
    NegativePrice,

    #[error("amount must be positive")]
    NonPositiveAmount,

    #[error("AI scan limit must not be negative")]
    NegativeScanLimit,

    #[error("validity days must be positive")]
    NonPositiveValidity,

    #[error("end date must not be before start date")]
    EndBeforeStart,

    #[error("{field} must be a finite, non-negative number")]
    InvalidNutrient { field: &'static str },

    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

/// A lookup by identifier returned nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A unique key is already taken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} with {field} '{value}' already exists")]
pub struct ConflictError {
    pub entity: &'static str,
    pub field: &'static str,
    pub value: String,
}

/// A stored value exists but cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CorruptedDataError {
    pub message: &'static str,
}
