//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::QueryRejection,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error returned by opaque collaborators (client setup).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("config not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("config parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("config read error in {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("model {model} declares reserved field '{field}'")]
    ReservedFieldCollision { model: String, field: String },
    #[error("slug '{0}' is used by both {1} and {2}")]
    DuplicateSlug(String, String, String),
    #[error("model {0} is registered twice")]
    DuplicateName(String),
    #[error("model name '{0}' is not a CamelCase identifier")]
    InvalidName(String),
    #[error("model {model} has invalid slug '{slug}'")]
    InvalidSlug { model: String, slug: String },
}

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigLoadError),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error("client setup failed: {0}")]
    Clients(#[source] BoxError),
}

/// Failure reported by a query or search engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("engine: {0}")]
    Internal(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed"),
            AppError::Engine(EngineError::InvalidRequest(_)) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Engine(EngineError::Unavailable(_)) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
            AppError::Engine(EngineError::Internal(_)) => (StatusCode::BAD_GATEWAY, "engine_error"),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::METHOD_NOT_ALLOWED {
            // data routes are read-only
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET, HEAD"));
        }
        response
    }
}
