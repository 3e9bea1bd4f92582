use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use crate::application::outcome::{Envelope, VALIDATION_FAILED};
use crate::domain::error::DomainError;

/// Failures that never reach a use case outcome, rendered in the envelope shape.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Extractor rejection, keeping the status axum chose (400, 413, 415, 422).
    #[error("rejected request ({0}): {1}")]
    Rejected(StatusCode, String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl AppError {
    fn field_errors(&self) -> Vec<String> {
        match self {
            AppError::Domain(DomainError::Validation { field, message }) => {
                vec![format!("{field}: {message}")]
            }
            AppError::Validation(errors) => {
                let mut lines = errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(field, failures)| {
                        failures.iter().map(move |failure| {
                            let reason = failure
                                .message
                                .as_ref()
                                .map(|message| message.to_string())
                                .unwrap_or_else(|| failure.code.to_string());
                            format!("{field}: {reason}")
                        })
                    })
                    .collect::<Vec<_>>();
                lines.sort();
                lines
            }
            _ => Vec::new(),
        }
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Domain(err) => match err {
                DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::AlreadyExists(_) => (StatusCode::CONFLICT, err.to_string()),
                DomainError::Unauthenticated | DomainError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, err.to_string())
                }
                DomainError::Unexpected(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                ),
            },
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, VALIDATION_FAILED.to_string()),
            AppError::Rejected(status, msg) => (*status, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        }

        Envelope::failure(status.as_u16(), message)
            .with_errors(self.field_errors())
            .into_response()
    }
}
