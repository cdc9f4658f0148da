//! Platform Error Types

use thiserror::Error;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response, Json},
};
use utoipa::ToSchema;

use crate::role::validation::RoleValidationError;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Too many requests")]
    RateLimited,
}

impl PlatformError {
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable { message: message.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            PlatformError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            PlatformError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            PlatformError::ServiceUnavailable { .. } => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            PlatformError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            PlatformError::Configuration { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Message shown to API callers. Validation and availability messages
    /// pass through verbatim.
    fn public_message(&self) -> String {
        match self {
            PlatformError::Validation { message } | PlatformError::ServiceUnavailable { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<RoleValidationError> for PlatformError {
    fn from(err: RoleValidationError) -> Self {
        PlatformError::validation(err.to_string())
    }
}

/// Malformed bodies (bad JSON, wrong field types, missing content type)
/// are reported as validation failures.
impl From<JsonRejection> for PlatformError {
    fn from(rejection: JsonRejection) -> Self {
        PlatformError::validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for PlatformError {
    fn from(rejection: QueryRejection) -> Self {
        PlatformError::validation(format!("Invalid query parameters: {}", rejection.body_text()))
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Error response body
#[derive(Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_code();

        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (PlatformError::not_found("Role", "x"), StatusCode::NOT_FOUND),
            (PlatformError::validation("bad"), StatusCode::BAD_REQUEST),
            (PlatformError::service_unavailable("off"), StatusCode::SERVICE_UNAVAILABLE),
            (PlatformError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            (PlatformError::configuration("bad"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err: PlatformError = RoleValidationError::TitleRequired.into();
        assert_eq!(err.public_message(), "Title is required");
    }

    #[test]
    fn test_not_found_message() {
        let err = PlatformError::not_found("Role", "abc");
        assert_eq!(err.public_message(), "Entity not found: Role with id abc");
    }
}
