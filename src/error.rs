use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::enums::AttributeType;
use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("code '{0}' already exists")]
    DuplicateCode(String),

    #[error("option code '{0}' already exists for this attribute")]
    DuplicateOptionCode(String),

    #[error("attribute type '{0}' does not support options")]
    WrongAttributeType(AttributeType),

    #[error("option '{0}' does not belong to this attribute")]
    ForeignOption(Uuid),

    #[error("reorder list must cover all {expected} options, got {given}")]
    IncompleteSet { expected: usize, given: usize },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

/// Concurrent writers racing on a unique code lose at commit time; surface
/// that as the same conflict the pre-check would have produced.
pub fn map_unique_violation(err: sea_orm::DbErr, conflict: AppError) -> AppError {
    match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => conflict,
        _ => AppError::OrmError(err),
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateCode(_) | AppError::DuplicateOptionCode(_) => StatusCode::CONFLICT,
            AppError::WrongAttributeType(_)
            | AppError::ForeignOption(_)
            | AppError::IncompleteSet { .. }
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
