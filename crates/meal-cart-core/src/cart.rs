//! # Cart State Engine
//!
//! The cart's state-transition rules: a pure reducer over immutable states.
//!
//! ## Transition Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Action                  id in cart?      Result                        │
//! │  ──────                  ───────────      ──────                        │
//! │                                                                         │
//! │  AddItem(meal) ────────► yes (at k) ────► items[k].quantity + 1         │
//! │                          no ────────────► push {meal, quantity: 1}      │
//! │                                                                         │
//! │  RemoveItem(id) ───────► yes, qty == 1 ─► items.remove(k)               │
//! │                          yes, qty > 1 ──► items[k].quantity - 1         │
//! │                          no ────────────► Err(ItemNotFound)             │
//! │                                                                         │
//! │  ClearCart ────────────────────────────► items = []                     │
//! │                                                                         │
//! │  Unknown ──────────────────────────────► same snapshot (identity)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Immutability
//! A `CartState` is never modified after construction: every method takes
//! `&self` and returns a fresh state. Items are held as `Arc<LineItem>`, so
//! a new state shares the untouched lines with its predecessor and only
//! allocates the line that changed.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{LineItem, Meal, MealId};

/// A shared, read-only cart state handed to consumers.
pub type CartSnapshot = Arc<CartState>;

// =============================================================================
// Cart State
// =============================================================================

/// The ordered line items of a cart.
///
/// ## Invariants
/// - Items are unique by id
/// - Every item has `quantity >= 1`
/// - Order is the order in which ids were first added
///
/// Decoding goes through [`CartState::from_items`], so a payload that
/// breaks an invariant is rejected instead of becoming a state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CartState {
    items: Vec<Arc<LineItem>>,
}

/// Shape of a serialized cart before its invariants are checked.
#[derive(Deserialize)]
struct CartStateWire {
    items: Vec<LineItem>,
}

impl<'de> Deserialize<'de> for CartState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = CartStateWire::deserialize(deserializer)?;
        CartState::from_items(wire.items).map_err(serde::de::Error::custom)
    }
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Rebuilds a cart from previously captured lines.
    ///
    /// ## Errors
    /// - `ValidationError::OutOfRange` for a line with quantity 0
    /// - `ValidationError::InvalidFormat` when two lines share an id
    pub fn from_items(items: Vec<LineItem>) -> CoreResult<CartState> {
        let mut seen = HashSet::with_capacity(items.len());

        for item in &items {
            if item.quantity == 0 {
                return Err(ValidationError::OutOfRange {
                    field: "quantity".to_string(),
                    min: 1,
                    max: i64::from(u32::MAX),
                }
                .into());
            }
            if !seen.insert(item.id()) {
                return Err(ValidationError::InvalidFormat {
                    field: "items".to_string(),
                    reason: format!("duplicate id {}", item.id()),
                }
                .into());
            }
        }

        Ok(CartState {
            items: items.into_iter().map(Arc::new).collect(),
        })
    }

    /// The line items in first-add order.
    #[inline]
    pub fn items(&self) -> &[Arc<LineItem>] {
        &self.items
    }

    /// Iterates the line items in first-add order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().map(|item| item.as_ref())
    }

    /// Number of distinct meals in the cart.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up the line for a meal.
    pub fn find(&self, id: &MealId) -> Option<&LineItem> {
        self.iter().find(|item| item.id() == id)
    }

    fn position(&self, id: &MealId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Total units across all lines (the header's cart badge).
    pub fn total_quantity(&self) -> u64 {
        self.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Σ price × quantity, for the cart and checkout displays.
    pub fn total_price(&self) -> Money {
        self.iter().map(LineItem::line_total).sum()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Returns the state after adding one unit of `candidate`.
    ///
    /// An existing line keeps its stored name, price and position; only its
    /// quantity moves. A new id is appended with quantity 1.
    ///
    /// A line already at `u32::MAX` stays there: the add still returns a
    /// fresh state, but its quantity does not grow.
    ///
    /// ## Example
    /// ```rust
    /// use meal_cart_core::{CartState, Meal, Money};
    ///
    /// let pizza = Meal::new("a", "Pizza", Money::from_cents(900));
    /// let cart = CartState::new().with_added(&pizza).with_added(&pizza);
    ///
    /// assert_eq!(cart.len(), 1);
    /// assert_eq!(cart.items()[0].quantity, 2);
    /// ```
    pub fn with_added(&self, candidate: &Meal) -> CartState {
        let mut items = self.items.clone();

        match self.position(&candidate.id) {
            Some(index) => {
                let existing = &self.items[index];
                let quantity = existing.quantity.saturating_add(1);
                items[index] = Arc::new(existing.with_quantity(quantity));
            }
            None => items.push(Arc::new(LineItem::first_unit(candidate.clone()))),
        }

        CartState { items }
    }

    /// Returns the state after removing one unit of `id`.
    ///
    /// The last unit removes the line entirely; a zero-quantity line is
    /// never kept.
    ///
    /// ## Errors
    /// `CoreError::ItemNotFound` when no line has this id.
    pub fn with_removed(&self, id: &MealId) -> CoreResult<CartState> {
        let index = self
            .position(id)
            .ok_or_else(|| CoreError::ItemNotFound { id: id.clone() })?;

        let mut items = self.items.clone();
        let existing = &self.items[index];

        if existing.quantity <= 1 {
            items.remove(index);
        } else {
            items[index] = Arc::new(existing.with_quantity(existing.quantity - 1));
        }

        Ok(CartState { items })
    }
}

// =============================================================================
// Cart Action
// =============================================================================

/// A requested cart operation.
///
/// Serialized with a `type` tag so the UI can send the same objects it
/// dispatches locally:
/// ```json
/// {"type": "ADD_ITEM", "item": {"id": "m1", "name": "Mac & Cheese", "price": 899}}
/// {"type": "REMOVE_ITEM", "id": "m1"}
/// {"type": "CLEAR_CART"}
/// ```
/// Any other `type` deserializes to [`CartAction::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    /// Add one unit of a meal.
    AddItem { item: Meal },

    /// Remove one unit of a meal.
    RemoveItem { id: MealId },

    /// Drop every line.
    ClearCart,

    /// An action kind this build does not know about.
    #[serde(other)]
    Unknown,
}

impl CartAction {
    /// The wire tag, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            CartAction::AddItem { .. } => "ADD_ITEM",
            CartAction::RemoveItem { .. } => "REMOVE_ITEM",
            CartAction::ClearCart => "CLEAR_CART",
            CartAction::Unknown => "UNKNOWN",
        }
    }
}

// =============================================================================
// Reducer
// =============================================================================

/// Applies one action to a snapshot and returns the next snapshot.
///
/// Identity transitions return the very same `Arc`, so callers can use
/// `Arc::ptr_eq` to tell "nothing happened" from "new state".
///
/// ## Errors
/// Only `RemoveItem` for an id that is not in the cart fails
/// (`CoreError::ItemNotFound`); the input snapshot is untouched either way.
pub fn reduce(state: &CartSnapshot, action: &CartAction) -> CoreResult<CartSnapshot> {
    match action {
        CartAction::AddItem { item } => Ok(Arc::new(state.with_added(item))),
        CartAction::RemoveItem { id } => state.with_removed(id).map(Arc::new),
        CartAction::ClearCart => Ok(Arc::new(CartState::new())),
        CartAction::Unknown => Ok(Arc::clone(state)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pizza() -> Meal {
        Meal::new("a", "Pizza", Money::from_cents(900))
    }

    fn salad() -> Meal {
        Meal::new("b", "Salad", Money::from_cents(650))
    }

    fn apply(state: &CartSnapshot, action: CartAction) -> CartSnapshot {
        reduce(state, &action).unwrap()
    }

    fn ids(state: &CartState) -> Vec<&str> {
        state.iter().map(|item| item.id().as_str()).collect()
    }

    #[test]
    fn test_add_to_empty_cart() {
        let empty = CartSnapshot::default();
        let cart = apply(&empty, CartAction::AddItem { item: pizza() });

        assert_eq!(cart.len(), 1);
        let line = &cart.items()[0];
        assert_eq!(line.id().as_str(), "a");
        assert_eq!(line.name(), "Pizza");
        assert_eq!(line.price().cents(), 900);
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_add_same_meal_increments_quantity() {
        let cart = CartSnapshot::default();
        let cart = apply(&cart, CartAction::AddItem { item: pizza() });
        let cart = apply(&cart, CartAction::AddItem { item: pizza() });

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_remove_decrements_then_deletes() {
        let cart = CartSnapshot::default();
        let cart = apply(&cart, CartAction::AddItem { item: pizza() });
        let cart = apply(&cart, CartAction::AddItem { item: pizza() });

        let cart = apply(&cart, CartAction::RemoveItem { id: "a".into() });
        assert_eq!(cart.items()[0].quantity, 1);

        let cart = apply(&cart, CartAction::RemoveItem { id: "a".into() });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_after_adds() {
        let cart = CartSnapshot::default();
        let cart = apply(&cart, CartAction::AddItem { item: pizza() });
        let cart = apply(&cart, CartAction::AddItem { item: salad() });
        let cart = apply(&cart, CartAction::ClearCart);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_empty_cart_stays_empty() {
        let empty = CartSnapshot::default();
        let cart = apply(&empty, CartAction::ClearCart);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_first_keeps_survivor() {
        let cart = CartSnapshot::default();
        let cart = apply(&cart, CartAction::AddItem { item: pizza() });
        let cart = apply(&cart, CartAction::AddItem { item: salad() });
        let survivor = Arc::clone(&cart.items()[1]);

        let cart = apply(&cart, CartAction::RemoveItem { id: "a".into() });

        assert_eq!(ids(&cart), vec!["b"]);
        assert_eq!(cart.items()[0].quantity, 1);
        assert!(Arc::ptr_eq(&cart.items()[0], &survivor));
    }

    #[test]
    fn test_add_existing_keeps_stored_fields() {
        let cart = CartSnapshot::default();
        let cart = apply(&cart, CartAction::AddItem { item: pizza() });

        let repriced = Meal::new("a", "Pizza (large)", Money::from_cents(1400));
        let cart = apply(&cart, CartAction::AddItem { item: repriced });

        let line = &cart.items()[0];
        assert_eq!(line.quantity, 2);
        assert_eq!(line.name(), "Pizza");
        assert_eq!(line.price().cents(), 900);
    }

    #[test]
    fn test_quantity_change_keeps_position() {
        let cart = CartSnapshot::default();
        let cart = apply(&cart, CartAction::AddItem { item: pizza() });
        let cart = apply(&cart, CartAction::AddItem { item: salad() });
        let cart = apply(&cart, CartAction::AddItem { item: pizza() });

        assert_eq!(ids(&cart), vec!["a", "b"]);
        assert_eq!(cart.find(&"a".into()).map(|l| l.quantity), Some(2));
    }

    #[test]
    fn test_transition_leaves_previous_snapshot_untouched() {
        let before = apply(&CartSnapshot::default(), CartAction::AddItem { item: pizza() });
        let before_copy = (*before).clone();

        let after = apply(&before, CartAction::AddItem { item: pizza() });

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, before_copy);
        assert_eq!(before.items()[0].quantity, 1);
        assert!(!Arc::ptr_eq(&before.items()[0], &after.items()[0]));
    }

    #[test]
    fn test_untouched_lines_are_shared() {
        let cart = CartSnapshot::default();
        let cart = apply(&cart, CartAction::AddItem { item: pizza() });
        let cart = apply(&cart, CartAction::AddItem { item: salad() });

        let next = apply(&cart, CartAction::AddItem { item: salad() });

        assert!(Arc::ptr_eq(&cart.items()[0], &next.items()[0]));
        assert!(!Arc::ptr_eq(&cart.items()[1], &next.items()[1]));
    }

    #[test]
    fn test_remove_absent_id_fails_without_change() {
        let cart = apply(&CartSnapshot::default(), CartAction::AddItem { item: pizza() });

        let err = reduce(&cart, &CartAction::RemoveItem { id: "zz".into() }).unwrap_err();

        assert_eq!(err, CoreError::ItemNotFound { id: "zz".into() });
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_unknown_action_is_identity() {
        let cart = apply(&CartSnapshot::default(), CartAction::AddItem { item: pizza() });
        let next = apply(&cart, CartAction::Unknown);
        assert!(Arc::ptr_eq(&cart, &next));
    }

    #[test]
    fn test_action_wire_format() {
        let add: CartAction = serde_json::from_str(
            r#"{"type":"ADD_ITEM","item":{"id":"m1","name":"Mac & Cheese","price":899}}"#,
        )
        .unwrap();
        assert_eq!(
            add,
            CartAction::AddItem {
                item: Meal::new("m1", "Mac & Cheese", Money::from_cents(899))
            }
        );

        let remove: CartAction = serde_json::from_str(r#"{"type":"REMOVE_ITEM","id":"m1"}"#).unwrap();
        assert_eq!(remove, CartAction::RemoveItem { id: "m1".into() });

        let clear: CartAction = serde_json::from_str(r#"{"type":"CLEAR_CART"}"#).unwrap();
        assert_eq!(clear, CartAction::ClearCart);

        assert_eq!(
            serde_json::to_value(CartAction::RemoveItem { id: "m2".into() }).unwrap(),
            serde_json::json!({"type": "REMOVE_ITEM", "id": "m2"})
        );
    }

    #[test]
    fn test_unrecognized_wire_type_becomes_unknown() {
        let action: CartAction =
            serde_json::from_str(r#"{"type":"APPLY_COUPON","code":"SPRING"}"#).unwrap();
        assert_eq!(action, CartAction::Unknown);
        assert_eq!(action.kind(), "UNKNOWN");
    }

    #[test]
    fn test_totals() {
        let cart = CartState::new()
            .with_added(&pizza())
            .with_added(&pizza())
            .with_added(&salad());

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.total_price().cents(), 900 * 2 + 650);
    }

    #[test]
    fn test_add_at_quantity_ceiling_stays_at_ceiling() {
        let full = LineItem {
            meal: pizza(),
            quantity: u32::MAX,
        };
        let cart = CartState::from_items(vec![full]).unwrap();

        let next = cart.with_added(&pizza());

        assert_eq!(next.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_total_price_of_max_priced_lines_does_not_overflow() {
        let caviar = Meal::new("c", "Caviar", Money::from_cents(crate::MAX_PRICE_CENTS));
        let mut cart = CartState::new();
        for _ in 0..5 {
            cart = cart.with_added(&caviar);
        }
        assert_eq!(cart.total_price().cents(), crate::MAX_PRICE_CENTS * 5);

        let huge = Meal::new("h", "Huge", Money::from_cents(i64::MAX / 2 + 1));
        let cart = cart.with_added(&huge).with_added(&huge);
        assert_eq!(cart.total_price().cents(), i64::MAX);
    }

    #[test]
    fn test_decode_round_trips_valid_cart() {
        let cart = CartState::new()
            .with_added(&pizza())
            .with_added(&pizza())
            .with_added(&salad());

        let json = serde_json::to_string(&cart).unwrap();
        let decoded: CartState = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let err = serde_json::from_str::<CartState>(
            r#"{"items":[
                {"id":"a","name":"Pizza","price":900,"quantity":1},
                {"id":"a","name":"Pizza","price":900,"quantity":3}
            ]}"#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("duplicate id a"));
    }

    #[test]
    fn test_decode_rejects_zero_quantity() {
        let result = serde_json::from_str::<CartState>(
            r#"{"items":[{"id":"a","name":"Pizza","price":900,"quantity":0}]}"#,
        );
        assert!(result.is_err());

        let err = CartState::from_items(vec![LineItem {
            meal: pizza(),
            quantity: 0,
        }])
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_snapshot_serializes_items_flat() {
        let cart = CartState::new().with_added(&pizza());
        assert_eq!(
            serde_json::to_value(&cart).unwrap(),
            serde_json::json!({"items": [{"id": "a", "name": "Pizza", "price": 900, "quantity": 1}]})
        );
    }
}
