use thiserror::Error;

use crate::contract::model::UserId;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: UserId },

    #[error("Validation failed: {field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },
}

impl DomainError {
    pub fn user_not_found(id: UserId) -> Self {
        Self::UserNotFound { id }
    }

    pub fn missing_field(field: &'static str) -> Self {
        Self::Validation {
            field,
            message: "is required",
        }
    }
}
