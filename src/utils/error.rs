use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use once_cell::sync::OnceCell;
use serde_json::json;
use thiserror::Error;

use crate::article::store::StoreError;

static SERVICE_NAME: OnceCell<String> = OnceCell::new();

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("Bad Request: {0}")]
    BadRequestError(String),

    #[error("Not Found: {0}")]
    NotFoundError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailableError(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl CustomError {
    /// Stable machine-readable code carried in the `error` field of the body.
    pub fn code(&self) -> &'static str {
        match *self {
            CustomError::BadRequestError(..) => "BAD_REQUEST_ERROR",
            CustomError::NotFoundError(..) => "NOT_FOUND_ERROR",
            CustomError::ServiceUnavailableError(..) => "SERVICE_UNAVAILABLE",
            CustomError::InternalServerError(..) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl From<StoreError> for CustomError {
    fn from(err: StoreError) -> Self {
        log::error!("article store failure: {}", err);
        match err {
            StoreError::Unavailable(_) => {
                CustomError::ServiceUnavailableError("Article store is unreachable".into())
            }
            StoreError::Operation(_) => {
                CustomError::InternalServerError("Article store operation failed".into())
            }
        }
    }
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::BadRequestError(..) => StatusCode::BAD_REQUEST,
            CustomError::NotFoundError(..) => StatusCode::NOT_FOUND,
            CustomError::ServiceUnavailableError(..) => StatusCode::SERVICE_UNAVAILABLE,
            CustomError::InternalServerError(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(error_body(
            self.status_code(),
            &self.to_string(),
            self.code(),
        ))
    }
}

/// The JSON envelope every failure is reported with.
pub fn error_body(status: StatusCode, message: &str, code: &str) -> serde_json::Value {
    json!({
        "success": false,
        "message": message,
        "httpStatusCode": status.as_u16(),
        "error": code,
        "service": service_name(),
    })
}

/// Records the name reported in error bodies. Only the first call takes effect.
pub fn set_service_name(name: String) {
    if let Err(ignored) = SERVICE_NAME.set(name) {
        log::warn!("service name already set, ignoring `{}`", ignored);
    }
}

pub fn service_name() -> &'static str {
    SERVICE_NAME.get().map(String::as_str).unwrap_or("Unknown")
}
