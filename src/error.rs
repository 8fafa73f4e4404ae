//! # Error Handling
//!
//! Unified error responses for the channel management API. Every failure
//! path returns the structured envelope `{"status": <code>, "message": ...}`,
//! optionally extended with per-field validation messages; a bare exception
//! never escapes a handler.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;
use utoipa::ToSchema;

/// Status code used for persistence-layer catch-all failures. Outside the
/// IANA registry on purpose: dashboards filter on it to separate store
/// outages from ordinary 5xx handler bugs.
const COULD_NOT_ACCESS_DB: u16 = 536;

/// The failure classes a request can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("Invalid ID")]
    InvalidId,
    #[error("Missing parameter")]
    MissingParameter,
    #[error("Error when parsing data")]
    ValidationData,
    #[error("Channel name already exists")]
    DuplicateName,
    #[error("Not found")]
    NotFound,
    #[error("Could not retrieve data from database")]
    CouldNotRetrieveData,
    #[error("Could not save data to database")]
    CouldNotSaveData,
    #[error("Could not remove data from database")]
    CouldNotRemoveData,
}

impl ErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::InvalidId | ErrorKind::MissingParameter | ErrorKind::ValidationData => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::DuplicateName => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::CouldNotRetrieveData
            | ErrorKind::CouldNotSaveData
            | ErrorKind::CouldNotRemoveData => StatusCode::from_u16(COULD_NOT_ACCESS_DB)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

/// Structured API error response.
#[derive(Debug, Clone, ToSchema)]
pub struct ApiError {
    /// Failure class driving the HTTP status
    #[schema(value_type = String)]
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Field-level validation messages, when the body failed validation
    #[schema(value_type = Object)]
    pub errors: Option<BTreeMap<String, String>>,
}

impl ApiError {
    /// Creates an error carrying the kind's default message.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.to_string(),
            errors: None,
        }
    }

    /// Overrides the default message.
    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches field-level validation messages.
    pub fn with_field_errors(mut self, errors: BTreeMap<String, String>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn invalid_id() -> Self {
        Self::new(ErrorKind::InvalidId)
    }

    pub fn missing_parameter(name: &str) -> Self {
        Self::new(ErrorKind::MissingParameter)
            .with_message(format!("Missing required parameter '{name}'"))
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::new(ErrorKind::ValidationData).with_message(message)
    }

    pub fn duplicate_name(name: &str) -> Self {
        Self::new(ErrorKind::DuplicateName)
            .with_message(format!("A channel named '{name}' already exists"))
    }

    pub fn not_found(what: &str) -> Self {
        Self::new(ErrorKind::NotFound).with_message(format!("{what} not found"))
    }

    /// Maps a repository read failure, logging the underlying cause.
    pub fn retrieve(err: anyhow::Error) -> Self {
        tracing::error!(error = ?err, "failed to retrieve data");
        Self::new(ErrorKind::CouldNotRetrieveData)
    }

    /// Maps a repository write failure, logging the underlying cause.
    pub fn save(err: anyhow::Error) -> Self {
        tracing::error!(error = ?err, "failed to save data");
        Self::new(ErrorKind::CouldNotSaveData)
    }

    /// Maps a repository delete failure, logging the underlying cause.
    pub fn remove(err: anyhow::Error) -> Self {
        tracing::error!(error = ?err, "failed to remove data");
        Self::new(ErrorKind::CouldNotRemoveData)
    }
}

impl Serialize for ApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("status", &self.kind.status_code().as_u16())?;
        map.serialize_entry("message", &self.message)?;
        if let Some(errors) = &self.errors {
            map.serialize_entry("errors", errors)?;
        }
        map.end()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.kind.status_code(), axum::Json(self)).into_response()
    }
}
