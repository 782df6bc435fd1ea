//! # Store Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Cart / Domain  │  │  Configuration  │  │   Serialization         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Core(..)       │  │  InvalidConfig  │  │  Json                   │ │
//! │  │   ItemNotFound  │  │  ConfigRead     │  │                         │ │
//! │  │   EmptyCart     │  │  ConfigParse    │  │                         │ │
//! │  │   Validation    │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use meal_cart_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the cart store and its configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Cart Errors
    // =========================================================================
    /// A cart transition or checkout rule was violated.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid store configuration.
    #[error("Invalid cart configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read.
    #[error("Failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Config file is not valid TOML for `StoreConfig`.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // =========================================================================
    // Serialization Errors
    // =========================================================================
    /// JSON encoding/decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

impl StoreError {
    /// Returns true for `ItemNotFound` (the "NotFound" condition).
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::ItemNotFound { .. }))
    }

    /// Returns true for validation failures (the "InvalidArgument" condition).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StoreError::Core(CoreError::Validation(_)))
    }
}
