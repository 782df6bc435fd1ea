//! # Validation Module
//!
//! Input validation for cart candidates and checkout customer data.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form fields (browser)                                        │
//! │  └── `required`, `type="email"` for immediate feedback                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization (serde)                                      │
//! │  └── Missing `id` / wrong types never become a `Meal`                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  └── Empty ids, negative prices, malformed emails                      │
//! │                                                                         │
//! │  The reducer itself trusts its input and never validates.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use meal_cart_core::validation::{validate_email, validate_meal};
//! use meal_cart_core::{Meal, Money};
//!
//! validate_meal(&Meal::new("m1", "Mac & Cheese", Money::from_cents(899))).unwrap();
//! assert!(validate_email("no-at-sign").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Meal, MealId};
use crate::{MAX_FIELD_LEN, MAX_MEAL_ID_LEN, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Cart Candidates
// =============================================================================

/// Validates a meal id.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most `MAX_MEAL_ID_LEN` (64) characters
pub fn validate_meal_id(id: &MealId) -> ValidationResult<()> {
    let id = id.as_str().trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.chars().count() > MAX_MEAL_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_MEAL_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a candidate before it is added to the cart.
///
/// ## Rules
/// - Valid id (see [`validate_meal_id`])
/// - Price between 0 and `MAX_PRICE_CENTS` (zero is allowed for free items)
///
/// Name, description and image are display-only and not checked.
pub fn validate_meal(meal: &Meal) -> ValidationResult<()> {
    validate_meal_id(&meal.id)?;

    if meal.price.is_negative() || meal.price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Checkout Fields
// =============================================================================

/// Validates a required free-text checkout field (name, street, city, ...).
///
/// ## Returns
/// The trimmed value.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_FIELD_LEN,
        });
    }

    Ok(value.to_string())
}

/// Validates an email address.
///
/// ## Rules
/// - Required (see [`validate_required`])
/// - Exactly one `@` with non-empty text on both sides
/// - No whitespace
///
/// Deliverability is the order service's problem.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = validate_required("email", email)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(invalid("must look like name@example.com")),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
