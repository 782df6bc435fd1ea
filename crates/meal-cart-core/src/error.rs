//! # Error Types
//!
//! Domain-specific error types for meal-cart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  meal-cart-core errors (this file)                                     │
//! │  ├── CoreError        - Cart transition / checkout failures            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  meal-cart-store errors (separate crate)                               │
//! │  └── StoreError       - Config loading, policy, serialization          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → UI                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Unknown action kinds are absorbed as identity transitions by the reducer.
//! They never surface here.

use thiserror::Error;

use crate::types::MealId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and checkout errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A removal targeted an id that is not in the cart.
    ///
    /// ## When This Occurs
    /// - Double-click on "-" after the last unit was already removed
    /// - A stale view dispatching against a cart that was cleared meanwhile
    ///
    /// The store decides whether to surface or absorb this
    /// (`MissingItemPolicy`).
    #[error("Item not in cart: {id}")]
    ItemNotFound { id: MealId },

    /// Checkout was requested with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any transition runs, so a failed validation never changes
/// cart state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed email, malformed price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
