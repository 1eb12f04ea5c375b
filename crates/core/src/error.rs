//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only deterministic business failures live here. Both variants leave state
/// untouched, so callers can surface them without any rollback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input violated a business rule. The message is meant for the caller.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced entity does not exist.
    #[error("{entity} not found.")]
    NotFound { entity: &'static str },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    /// Caller-facing message, without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            DomainError::Validation(msg) => msg.clone(),
            DomainError::NotFound { .. } => self.to_string(),
        }
    }
}
