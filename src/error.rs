use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::application::errors::LinkError;
use crate::domain::errors::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    Unauthorized { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::Unauthorized { message, details } => ("unauthorized", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = self.to_error_info();
        write!(f, "{}: {}", info.code, info.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], Json(body)).into_response();
        }

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation { constraint } => AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": constraint }),
            ),
            StoreError::Database(message) => {
                error!(error = %message, "Database error");
                AppError::internal("Database error", json!({}))
            }
        }
    }
}

impl From<LinkError> for AppError {
    fn from(e: LinkError) -> Self {
        let reason = json!({ "reason": e.kind() });

        match e {
            LinkError::InvalidUrl(_)
            | LinkError::InvalidKey(_)
            | LinkError::InvalidDuration(_)
            | LinkError::MissingKey => AppError::bad_request(e.to_string(), reason),
            LinkError::KeyConflict(ref key) => AppError::conflict(
                e.to_string(),
                json!({ "reason": e.kind(), "short_key": key }),
            ),
            LinkError::NotFound
            | LinkError::Expired
            | LinkError::PasskeyRequired
            | LinkError::InvalidPasskey => AppError::not_found(e.to_string(), reason),
            LinkError::ExhaustedKeyspace { .. } | LinkError::Passkey(_) => {
                error!(error = %e, "Short link operation failed");
                AppError::internal("Internal server error", reason)
            }
            LinkError::Store(store) => {
                error!(error = %store, "Store failure");
                AppError::internal("Internal server error", reason)
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Validation failed",
            serde_json::to_value(&errors).unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_error_status_mapping() {
        let cases = [
            (LinkError::InvalidUrl("x".into()), StatusCode::BAD_REQUEST),
            (LinkError::InvalidKey("x".into()), StatusCode::BAD_REQUEST),
            (LinkError::InvalidDuration("x".into()), StatusCode::BAD_REQUEST),
            (LinkError::MissingKey, StatusCode::BAD_REQUEST),
            (LinkError::KeyConflict("x".into()), StatusCode::CONFLICT),
            (LinkError::NotFound, StatusCode::NOT_FOUND),
            (LinkError::Expired, StatusCode::NOT_FOUND),
            (LinkError::PasskeyRequired, StatusCode::NOT_FOUND),
            (LinkError::InvalidPasskey, StatusCode::NOT_FOUND),
            (
                LinkError::ExhaustedKeyspace { attempts: 20 },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                LinkError::Store(StoreError::Database("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let kind = error.kind();
            let app_error = AppError::from(error);
            assert_eq!(app_error.status(), expected, "{kind}");
            assert_eq!(app_error.to_error_info().details["reason"], kind);
        }
    }

    #[test]
    fn test_store_error_message_is_not_leaked() {
        let app_error = AppError::from(LinkError::Store(StoreError::Database(
            "password authentication failed for user".into(),
        )));

        let info = app_error.to_error_info();
        assert_eq!(info.code, "internal_error");
        assert!(!info.message.contains("password"));
    }

    #[test]
    fn test_unauthorized_sets_www_authenticate() {
        let response = AppError::unauthorized("Unauthorized", json!({})).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_display() {
        let error = AppError::not_found("URL not found", json!({}));
        assert_eq!(error.to_string(), "not_found: URL not found");
    }
}
