//! Errors raised when a product record or identifier is unusable.

use thiserror::Error;

/// Shorthand for fallible record checks.
pub type DomainResult<T> = Result<T, DomainError>;

/// What is wrong with a record received from the listing endpoint.
///
/// Rendering never fails on these; callers log them and carry on. HTTP and
/// decoding failures are `storefront_client::ApiError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A price field is unusable, such as `NaN` or infinity.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The pricing rule `list_price >= discount >= 0` does not hold.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A product id was blank.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
