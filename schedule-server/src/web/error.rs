//! HTTP error mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::domain::DomainError;
use crate::store::StoreError;

use super::dto::ErrorResponse;

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message }
            | AppError::NotFound { message }
            | AppError::Conflict { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        let message = e.to_string();
        match e {
            StoreError::NotFound { .. } => AppError::NotFound { message },
            StoreError::DuplicateLineName(_) | StoreError::HasDependents { .. } => {
                AppError::Conflict { message }
            }
            StoreError::IdsExhausted { .. } | StoreError::Snapshot { .. } => {
                AppError::Internal { message }
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::bad_request(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(%status, error = %self.message(), "request failed");
        } else {
            warn!(%status, error = %self.message(), "request rejected");
        }

        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_status() {
        let cases = [
            (
                StoreError::NotFound {
                    entity: "line",
                    id: 1,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                StoreError::DuplicateLineName("60".into()),
                StatusCode::CONFLICT,
            ),
            (
                StoreError::HasDependents {
                    entity: "route",
                    id: 2,
                    dependents: "timetable entries",
                },
                StatusCode::CONFLICT,
            ),
            (
                StoreError::IdsExhausted { entity: "line" },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StoreError::Snapshot {
                    message: "disk full".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let message = err.to_string();
            let app_err = AppError::from(err);
            assert_eq!(app_err.status(), expected);
            assert_eq!(app_err.message(), message);
        }
    }

    #[test]
    fn domain_errors_are_bad_requests() {
        let err = AppError::from(DomainError::EmptyField("name"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "name must not be empty");
    }

    #[test]
    fn response_has_status() {
        let response = AppError::Conflict {
            message: "taken".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
