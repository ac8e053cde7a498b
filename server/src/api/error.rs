use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nutrichef_core::{FeasibilityError, PipelineError};

use super::ErrorResponse;
use crate::store::StoreError;

/// Error returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(&'static str),
    InvalidReference(i32),
    Infeasible(FeasibilityError),
    Conflict(String),
    Generation(String),
    Internal(String),
    Store(StoreError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidReference(_) | ApiError::Infeasible(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Generation(_) | ApiError::Internal(_) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message sent to the client. Server-side details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Validation(message) | ApiError::Conflict(message) => message.clone(),
            ApiError::NotFound(message) => message.to_string(),
            ApiError::InvalidReference(id) => format!("Recipe {} does not exist", id),
            ApiError::Infeasible(e) => e.to_string(),
            ApiError::Generation(_) => "Failed to generate recipe".to_string(),
            ApiError::Internal(_) | ApiError::Store(_) => "Internal server error".to_string(),
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Generation(detail) | ApiError::Internal(detail) => detail.clone(),
            ApiError::Store(e) => e.to_string(),
            other => other.public_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), error = %self.detail(), "Request failed");
        } else {
            tracing::warn!(status = %status.as_u16(), error = %self.detail(), "Request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound("Recipe not found"),
            StoreError::InvalidReference(id) => ApiError::InvalidReference(id),
            StoreError::Duplicate => ApiError::Conflict(
                "A recipe with this title and instructions already exists".to_string(),
            ),
            e => ApiError::Store(e),
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Validation(message) => ApiError::Validation(message),
            PipelineError::Infeasible(e) => ApiError::Infeasible(e),
            PipelineError::Generation(e) => ApiError::Generation(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
