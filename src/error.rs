//! Unified error types for the farmland API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;

/// Unified error type for process-level failures.
#[derive(Error, Debug)]
pub enum FarmError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but not usable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Storage error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Document storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// MongoDB driver error.
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Value could not be encoded as BSON.
    #[error("bson encoding error: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    /// An `_id` collided with an existing document.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// A document inserted a moment ago could not be read back.
    #[error("document {0} vanished after insert")]
    MissingAfterInsert(String),
}

/// Resource named in not-found responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Farmer or landowner account.
    Profile,
    /// Land listing.
    Land,
}

impl Resource {
    fn label(&self) -> &'static str {
        match self {
            Resource::Profile => "Profile",
            Resource::Land => "Land",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Request outcomes surfaced to API clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Signup email already registered for the role.
    #[error("Email already exists")]
    EmailExists,

    /// No account matched the email/password pair.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Identifier is well-formed but nothing has it.
    #[error("{0} not found")]
    NotFound(Resource),

    /// Identifier is not a valid ObjectId.
    #[error("{resource} not found: malformed identifier {id:?}")]
    MalformedId {
        /// What was being looked up.
        resource: Resource,
        /// The raw identifier.
        id: String,
    },

    /// Storage failed underneath the request.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<mongodb::bson::ser::Error> for ApiError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ApiError::Store(StoreError::Encode(err))
    }
}

/// JSON error body: `{"detail": "..."}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub detail: String,
}

impl ApiError {
    /// HTTP status for this outcome.
    ///
    /// Malformed and absent identifiers share 404.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmailExists => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) | ApiError::MalformedId { .. } => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body.
    pub fn detail(&self) -> String {
        match self {
            ApiError::MalformedId { resource, .. } => format!("{resource} not found"),
            ApiError::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(e) => error!("Request failed: {}", e),
            ApiError::MalformedId { .. } => debug!("{}", self),
            _ => {}
        }

        let body = ErrorBody {
            detail: self.detail(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, FarmError>;
