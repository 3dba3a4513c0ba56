use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

use crate::predict::PredictError;
use crate::repo::RepoError;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")] BadRequest(String),
    #[error("{0}")] NotFound(String),
    /// Model service answered with a non-success status; mirrored to the caller.
    #[error("Error from prediction service: {body}")] Upstream { status: u16, body: String },
    #[error("Failed to connect to prediction service or process prediction.")] Unreachable(String),
    #[error("internal error")] Internal,
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(what) => ApiError::NotFound(format!("{what} not found.")),
            RepoError::Internal(msg) => {
                tracing::error!("store failure: {msg}");
                ApiError::Internal
            }
        }
    }
}

impl From<PredictError> for ApiError {
    fn from(e: PredictError) -> Self {
        match e {
            PredictError::Rejected { status, body } => ApiError::Upstream { status, body },
            PredictError::Unreachable(detail) | PredictError::InvalidResponse(detail) => ApiError::Unreachable(detail),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Unreachable(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            ApiError::Unreachable(detail) => Some(detail.clone()),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ApiErrorBody { message: self.to_string(), error })
    }
}
