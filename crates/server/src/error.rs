//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`,
//! so a store failure is always distinguishable from an empty result.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::registry::CheckinError;

/// Application-level error type for the registry service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// RSVP submission failed.
    #[error("Checkin error: {0}")]
    Checkin(#[from] CheckinError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Database(_) | Self::Checkin(CheckinError::Store(_))
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Checkin(err) => match err {
                CheckinError::InvalidName(_) | CheckinError::InvalidCompanions(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                CheckinError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(RepositoryError::NotFound) => "Not found".to_string(),
            Self::Database(_) | Self::Checkin(CheckinError::Store(_)) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use figclover_core::GuestNameError;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("gift-123".to_string());
        assert_eq!(err.to_string(), "Not found: gift-123");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::DataCorruption(
                "bad row".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_failure_maps_to_internal_server_error() {
        let err = AppError::Checkin(CheckinError::Store(RepositoryError::DataCorruption(
            "bad row".to_string(),
        )));
        assert_eq!(get_status(err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_maps_to_unprocessable_entity() {
        let err = AppError::Checkin(CheckinError::InvalidName(GuestNameError::TooShort {
            min: 3,
        }));
        assert_eq!(get_status(err), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
