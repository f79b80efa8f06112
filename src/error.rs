//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a request can hit, from a missing field to a broken record file,
//! ends up as one of its variants.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers and middleware can
//! return it directly and Actix turns it into a JSON body of the form `{"error": "..."}`.
//! Storage and internal failures are logged with their detail but answered with a fixed
//! generic message.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Message returned to clients for every 500-class failure.
pub const GENERIC_SERVER_ERROR: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Required fields are missing or empty (HTTP 400).
    ValidationError(String),
    /// The request body could not be parsed (HTTP 400).
    BadRequest(String),
    /// The resource already exists, e.g. a duplicate username (HTTP 400).
    Conflict(String),
    /// Credentials are wrong or no bearer token was presented (HTTP 401).
    Unauthorized(String),
    /// A bearer token was presented but is invalid or expired (HTTP 403).
    Forbidden(String),
    /// No record matches the requested id (HTTP 404).
    NotFound(String),
    /// Reading or writing a record file failed (HTTP 500).
    StorageError(String),
    /// Anything else that went wrong on the server side (HTTP 500).
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::StorageError(msg) => write!(f, "Storage Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// 500-class variants are logged here, since this is the one place every error passes
/// through, and the client only ever sees [`GENERIC_SERVER_ERROR`].
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StorageError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::ValidationError(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg) => msg.as_str(),
            AppError::StorageError(_) | AppError::InternalServerError(_) => {
                log::error!("{}", self);
                GENERIC_SERVER_ERROR
            }
        };

        HttpResponse::build(self.status_code()).json(json!({
            "error": message
        }))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("password hashing failed: {}", error))
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::InternalServerError`.
///
/// Only token *signing* goes through this path; verification failures are reported as
/// `TokenError` and mapped by the auth middleware.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::InternalServerError(format!("token signing failed: {}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> AppError {
        AppError::StorageError(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> AppError {
        AppError::StorageError(format!("malformed record file: {}", error))
    }
}
