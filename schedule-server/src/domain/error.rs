//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from storage and HTTP errors.

/// Domain-level errors for entity validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A required text field is empty after trimming
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// A route must connect two different places
    #[error("origin and destination must differ (both are {0:?})")]
    SameOriginAndDestination(String),
}
