use crate::models::ErrorResponse;
use crate::services::{MatchStoreError, StoreError};
use crate::setup::SetupStep;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Errors surfaced by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing or invalid access token")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("Profile is incomplete, setup stopped at {0:?}")]
    ProfileIncomplete(SetupStep),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("You already have a match with this player")]
    AlreadyMatched,

    #[error("Profile store error: {0}")]
    Store(StoreError),

    #[error("Match store error: {0}")]
    MatchStore(MatchStoreError),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "unauthorized",
            AppError::Validation(_) => "validation_failed",
            AppError::ProfileIncomplete(_) => "profile_incomplete",
            AppError::NotFound(_) => "not_found",
            AppError::AlreadyMatched => "already_matched",
            AppError::Store(_) => "profile_store_error",
            AppError::MatchStore(_) => "match_store_error",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AppError::NotFound(what),
            other => AppError::Store(other),
        }
    }
}

impl From<MatchStoreError> for AppError {
    fn from(err: MatchStoreError) -> Self {
        match err {
            MatchStoreError::DuplicateMatch => AppError::AlreadyMatched,
            MatchStoreError::InvalidInput(msg) => AppError::Validation(msg),
            other => AppError::MatchStore(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::ProfileIncomplete(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyMatched => StatusCode::CONFLICT,
            AppError::Store(_) => StatusCode::BAD_GATEWAY,
            AppError::MatchStore(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}
