use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::rest::dto::ErrorBody;
use crate::domain::error::DomainError;

pub const MISSING_FIELDS: &str = "Missing fields";
pub const USER_NOT_FOUND: &str = "User not found";
pub const INVALID_BODY: &str = "Invalid request body";
pub const BODY_TOO_LARGE: &str = "Request body too large";

/// Client-facing REST error: a status plus the `{"error": ...}` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub fn missing_fields() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: MISSING_FIELDS,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: USER_NOT_FOUND,
        }
    }

    pub fn invalid_body() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: INVALID_BODY,
        }
    }
}

impl ApiError {
    /// The body could not be read at all: over the size limit or a broken stream.
    pub fn unreadable_body(rejection: &BytesRejection) -> Self {
        let status = rejection.status();
        let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
            BODY_TOO_LARGE
        } else {
            INVALID_BODY
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = self.status.as_u16(), error = self.message, "request failed");
        (
            self.status,
            Json(ErrorBody {
                error: self.message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Map domain error to its REST representation
pub fn map_domain_error(e: &DomainError) -> ApiError {
    match e {
        DomainError::UserNotFound { .. } => ApiError::not_found(),
        DomainError::Validation { .. } => ApiError::missing_fields(),
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        map_domain_error(&e)
    }
}
