// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use naturemate::{PatchError, StoreError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Storage Error: {0}")]
  Store(StoreError),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),
}

impl From<StoreError> for AppError {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::NotFound { id } => AppError::NotFound(format!("Product with ID {} not found.", id)),
      other => AppError::Store(other),
    }
  }
}

impl From<PatchError> for AppError {
  fn from(err: PatchError) -> Self {
    AppError::Validation(err.to_string())
  }
}

impl From<naturemate::model::ValidationError> for AppError {
  fn from(err: naturemate::model::ValidationError) -> Self {
    AppError::Validation(err.to_string())
  }
}

impl AppError {
  /// Stable machine-readable kind sent alongside the message.
  pub fn code(&self) -> &'static str {
    match self {
      AppError::Validation(_) => "invalid_request",
      AppError::NotFound(_) => "not_found",
      AppError::Config(_) => "configuration_error",
      AppError::Store(err) => err.kind(),
      AppError::Sqlx(_) => "database_error",
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Config(_) | AppError::Store(_) | AppError::Sqlx(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let code = self.code();
    match self {
      // Client errors carry their message; it only describes the request.
      AppError::Validation(m) | AppError::NotFound(m) => {
        tracing::warn!(application_error = %self, "Responding with client error");
        HttpResponse::build(self.status_code()).json(json!({"error": m, "code": code}))
      }
      // Server-side detail stays in the log.
      AppError::Store(_) | AppError::Sqlx(_) => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": "Database operation failed", "code": code}))
      }
      AppError::Config(_) => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "code": code}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
