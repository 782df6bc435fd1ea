//! # meal-cart-core: Pure Cart Logic for the Meal Ordering UI
//!
//! This crate is the state engine behind the cart. Everything in it is a
//! pure function: no I/O, no locks, no logging.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Meal Ordering Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    View Components                              │   │
//! │  │    Header ──► Meals ──► Cart modal ──► Checkout form            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartHandle (injected)                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               meal-cart-store                                   │   │
//! │  │    CartStore: lock, subscriptions, config, checkout payload     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ meal-cart-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │   Meal    │  │   Money   │  │ CartState │  │   rules   │  │   │
//! │  │   │ LineItem  │  │           │  │  reduce   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • PURE FUNCTIONS                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - `CartState`, `CartAction` and the `reduce` transition function
//! - [`types`] - `Meal`, `MealId`, `LineItem`
//! - [`money`] - Integer-cents `Money`
//! - [`progress`] - Which ordering modal is open
//! - [`error`] - Domain error types
//! - [`validation`] - Candidate and checkout field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use meal_cart_core::{reduce, CartAction, CartSnapshot, Meal, Money};
//!
//! let pizza = Meal::new("a", "Pizza", Money::from_cents(900));
//!
//! let cart = CartSnapshot::default();
//! let cart = reduce(&cart, &CartAction::AddItem { item: pizza.clone() }).unwrap();
//! let cart = reduce(&cart, &CartAction::AddItem { item: pizza }).unwrap();
//! assert_eq!(cart.items()[0].quantity, 2);
//!
//! let cart = reduce(&cart, &CartAction::ClearCart).unwrap();
//! assert!(cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod progress;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{reduce, CartAction, CartSnapshot, CartState};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use progress::{ProgressAction, UserProgress};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a meal id.
///
/// Listing ids are short (`"m1"`); anything longer is almost certainly a
/// mangled payload rather than a product.
pub const MAX_MEAL_ID_LEN: usize = 64;

/// Maximum length of a free-text checkout field.
pub const MAX_FIELD_LEN: usize = 200;

/// Highest unit price a candidate may carry, in cents ($10,000.00).
///
/// Keeps `price × u32::MAX` inside `i64`, so a single line total cannot
/// overflow.
pub const MAX_PRICE_CENTS: i64 = 1_000_000;
