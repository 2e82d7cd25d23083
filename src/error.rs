//!
//! # Custom Error Handling
//!
//! Defines the `AppError` type used throughout the application and its mapping
//! onto HTTP responses. `AppError` implements `actix_web::error::ResponseError`
//! so handlers can return `Result<_, AppError>` and let the framework render
//! the right status code with a JSON `{"error": "..."}` body.
//!
//! `From` impls for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error`, and `bcrypt::BcryptError` keep the `?`
//! operator usable at every call site.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// All error conditions the application distinguishes.
///
/// Each variant carries a human-readable message; no structured error codes
/// are exposed to clients.
#[derive(Debug)]
pub enum AppError {
    /// Bad credentials or an invalid/expired token (HTTP 401).
    Unauthorized(String),
    /// A malformed or otherwise unusable request (HTTP 400).
    BadRequest(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// An unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// A persistence failure from `sqlx` (HTTP 500).
    DatabaseError(String),
    /// Input that deserialized but failed validation, including duplicate
    /// values for unique columns (HTTP 400).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::BadRequest(msg) | AppError::ValidationError(msg) => {
                HttpResponse::BadRequest().json(json!({
                    "error": msg
                }))
            }
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            // Storage failures surface as generic internal errors.
            AppError::InternalServerError(msg) | AppError::DatabaseError(msg) => {
                HttpResponse::InternalServerError().json(json!({
                    "error": msg
                }))
            }
        }
    }
}

/// `sqlx::Error::RowNotFound` maps to 404; a unique-constraint violation maps
/// to a validation error so concurrent duplicate inserts surface as 400, not
/// 500. Everything else is a storage failure.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("record not found".into()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::ValidationError("duplicate value for a unique field".into())
            }
            other => AppError::DatabaseError(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
