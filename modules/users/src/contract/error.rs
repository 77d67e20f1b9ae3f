use thiserror::Error;

use crate::contract::model::UserId;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsersError {
    #[error("User not found: {id}")]
    NotFound { id: UserId },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl UsersError {
    pub fn not_found(id: UserId) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<crate::domain::error::DomainError> for UsersError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            UserNotFound { id } => Self::not_found(id),
            Validation { field, message } => Self::validation(format!("{}: {}", field, message)),
        }
    }
}
