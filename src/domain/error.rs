use thiserror::Error;

use crate::domain::identifier::IdentifierError;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("domain entity `{entity}` not found")]
    NotFound { entity: &'static str },
    #[error("domain validation failed: {message}")]
    Validation { message: String },
}

impl DomainError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<IdentifierError> for DomainError {
    fn from(error: IdentifierError) -> Self {
        Self::Validation {
            message: error.to_string(),
        }
    }
}
