use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Why a Hostaway `submittedAt` value was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimestampError {
    #[error("Invalid input: expected a non-empty string")]
    Empty,

    #[error("Invalid date format: expected 'YYYY-MM-DD HH:mm:ss', got '{value}'")]
    Format { value: String },

    #[error("Invalid date: '{value}' does not represent a valid date - {reason}")]
    InvalidDate { value: String, reason: String },
}

/// A review that could not be normalized; aborts the whole batch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("Invalid submittedAt format for review {id}: {source}")]
    InvalidTimestamp {
        id: i64,
        #[source]
        source: TimestampError,
    },

    #[error("Invalid listingName for review {id}: cannot create valid slug")]
    InvalidListingSlug { id: i64 },
}

impl NormalizeError {
    /// Id of the review that failed
    pub fn review_id(&self) -> i64 {
        match self {
            NormalizeError::InvalidTimestamp { id, .. } => *id,
            NormalizeError::InvalidListingSlug { id } => *id,
        }
    }

    /// Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            NormalizeError::InvalidTimestamp { .. } => "invalid_timestamp",
            NormalizeError::InvalidListingSlug { .. } => "invalid_listing_slug",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Errors surfaced to HTTP clients. Bodies are `{"detail": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body failed schema validation before reaching a handler
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    BadRequest(#[from] NormalizeError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
