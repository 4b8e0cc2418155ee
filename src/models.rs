//! Data models for the customer API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Customer identifier, generated by the caller
pub type CustomerId = Uuid;

/// Customer record
///
/// Immutable value; updates replace the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    /// Caller-generated identifier, used as the store key
    pub id: CustomerId,

    /// Free-text full name
    pub fullname: String,
}

impl Customer {
    pub fn new(id: CustomerId, fullname: impl Into<String>) -> Self {
        Self {
            id,
            fullname: fullname.into(),
        }
    }

    /// Canonical resource path, used for the `Location` header
    pub fn location(&self) -> String {
        format!("/customers/{}", self.id)
    }
}

/// Error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}
