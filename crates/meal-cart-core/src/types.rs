//! # Domain Types
//!
//! The product and line-item types the cart engine works with.
//!
//! ## Type Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐  add_item   ┌─────────────────────┐               │
//! │  │      Meal       │ ──────────► │      LineItem       │               │
//! │  │  ─────────────  │             │  ─────────────────  │               │
//! │  │  id (MealId)    │             │  meal (frozen copy) │               │
//! │  │  name           │             │  quantity ≥ 1       │               │
//! │  │  price (Money)  │             └─────────────────────┘               │
//! │  │  description?   │                                                   │
//! │  │  image?         │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `LineItem` keeps the `Meal` exactly as it looked when first added.
//! Adding the same id again only bumps `quantity`; the listing's current
//! name or price never overwrites the stored copy.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Meal Id
// =============================================================================

/// Stable product identifier (`"m1"`, `"m2"`, ... in the listing backend).
///
/// Unique per product, not per line: the cart holds at most one line per id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MealId(String);

impl MealId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        MealId(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MealId {
    fn from(id: &str) -> Self {
        MealId::new(id)
    }
}

impl From<String> for MealId {
    fn from(id: String) -> Self {
        MealId(id)
    }
}

// =============================================================================
// Meal
// =============================================================================

/// A meal offered by the listing; the candidate passed to `add_item`.
///
/// Every field except `id` is opaque to the cart engine. A `quantity` key
/// in incoming JSON is ignored: serde drops unknown fields, and the reducer
/// always decides quantity itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Meal {
    /// Product identifier.
    pub id: MealId,

    /// Display name shown in the listing, cart and checkout.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Optional blurb from the listing card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub description: Option<String>,

    /// Optional image path from the listing card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image: Option<String>,
}

impl Meal {
    /// Creates a meal with just the fields the cart displays.
    pub fn new(id: impl Into<MealId>, name: impl Into<String>, price: Money) -> Self {
        Meal {
            id: id.into(),
            name: name.into(),
            price,
            description: None,
            image: None,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart with its quantity.
///
/// Serialized flat, the way the cart UI consumes it:
/// `{"id":"m1","name":"Mac & Cheese","price":899,"quantity":2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Meal data frozen at first add.
    #[serde(flatten)]
    pub meal: Meal,

    /// Units in the cart, always ≥ 1 inside a `CartState`.
    pub quantity: u32,
}

impl LineItem {
    /// Creates the first line for a meal (quantity 1).
    pub(crate) fn first_unit(meal: Meal) -> Self {
        LineItem { meal, quantity: 1 }
    }

    /// Copy of this line with a different quantity; descriptive fields kept.
    pub(crate) fn with_quantity(&self, quantity: u32) -> Self {
        LineItem {
            meal: self.meal.clone(),
            quantity,
        }
    }

    /// Product identifier.
    #[inline]
    pub fn id(&self) -> &MealId {
        &self.meal.id
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.meal.name
    }

    /// Unit price.
    #[inline]
    pub fn price(&self) -> Money {
        self.meal.price
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.meal.price * self.quantity
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
