//! # Common API Types
//!
//! The success envelope shared by every non-204 endpoint. Errors go
//! through [`crate::error::ApiError`], which serializes the matching
//! error envelope.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success response wrapper: `{"status": "success", "result": <payload>}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    /// Always the literal string `success`
    pub status: String,
    /// Endpoint-specific payload
    pub result: T,
}

impl<T> Envelope<T> {
    pub fn success(result: T) -> Self {
        Self {
            status: "success".to_string(),
            result,
        }
    }
}
