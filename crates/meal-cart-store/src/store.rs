//! # Cart Store
//!
//! The live cart: the only sanctioned way to change cart contents.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  View Action              Store Method            Reducer Action        │
//! │  ───────────              ────────────            ──────────────        │
//! │                                                                         │
//! │  "Add to Cart" ──────────► add_item(meal) ──────► AddItem { item }      │
//! │                                                                         │
//! │  "-" in cart ────────────► remove_item(id) ─────► RemoveItem { id }     │
//! │                                                                         │
//! │  "+" in cart ────────────► add_item(meal) ──────► AddItem { item }      │
//! │                                                                         │
//! │  Order placed ───────────► clear_cart() ────────► ClearCart             │
//! │                                                                         │
//! │  Render ─────────────────► current_items() ─────► (read only)           │
//! │                                                                         │
//! │  NOTE: every write runs find → compute → install under one lock        │
//! │        (the watch channel's), then wakes subscribers once.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dependency Injection
//! View components take a `&impl CartHandle` (or a cloned `CartStore`)
//! instead of reaching for a global. Tests hand them a fresh store.

use std::sync::Arc;

use meal_cart_core::validation::validate_meal;
use meal_cart_core::{reduce, CartAction, CartSnapshot, CoreError, Meal, MealId};
use tokio::sync::watch;
use tracing::debug;

use crate::config::{CartSettings, MissingItemPolicy};
use crate::error::StoreResult;

// =============================================================================
// Cart Handle
// =============================================================================

/// The four cart operations, as seen by view components.
pub trait CartHandle {
    /// Adds one unit of `candidate`.
    fn add_item(&self, candidate: Meal) -> StoreResult<CartSnapshot>;

    /// Removes one unit of `id`.
    fn remove_item(&self, id: &MealId) -> StoreResult<CartSnapshot>;

    /// Empties the cart.
    fn clear_cart(&self) -> CartSnapshot;

    /// Read-only view of the current items.
    fn current_items(&self) -> CartSnapshot;
}

// =============================================================================
// Cart Store
// =============================================================================

/// Shared cart state plus its change notifications.
///
/// Cloning is cheap and every clone drives the same cart.
///
/// ## Thread Safety
/// The current snapshot lives inside a `watch::Sender`. Each transition
/// runs inside `send_if_modified`, which holds the channel's write lock for
/// the whole read-modify-write, so concurrent adds of the same id never
/// lose an update.
#[derive(Debug, Clone)]
pub struct CartStore {
    state: Arc<watch::Sender<CartSnapshot>>,
    settings: CartSettings,
}

impl CartStore {
    /// Creates an empty cart with default settings.
    pub fn new() -> Self {
        Self::with_settings(CartSettings::default())
    }

    /// Creates an empty cart with the given settings.
    pub fn with_settings(settings: CartSettings) -> Self {
        let (state, _) = watch::channel(CartSnapshot::default());
        CartStore {
            state: Arc::new(state),
            settings,
        }
    }

    /// The settings this store was built with.
    pub fn settings(&self) -> &CartSettings {
        &self.settings
    }

    /// Subscribes to cart changes.
    ///
    /// The receiver starts at the current snapshot and is marked changed
    /// after every transition that produced a new state. Identity
    /// transitions and rejected operations do not wake it.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let mut rx = store.subscribe();
    /// while rx.changed().await.is_ok() {
    ///     render(&rx.borrow_and_update());
    /// }
    /// ```
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.state.subscribe()
    }

    /// Applies one action and returns the resulting snapshot.
    ///
    /// ## Behavior
    /// - `AddItem`: candidate validated first when `validate_items` is on
    /// - `RemoveItem` of an absent id: per `on_missing_item`
    /// - `Unknown`: current snapshot returned, nobody notified
    ///
    /// ## Errors
    /// - `CoreError::Validation` for a rejected candidate
    /// - `CoreError::ItemNotFound` under `MissingItemPolicy::Reject`
    pub fn dispatch(&self, action: CartAction) -> StoreResult<CartSnapshot> {
        if let CartAction::AddItem { item } = &action {
            if self.settings.validate_items {
                validate_meal(item)?;
            }
        }

        let mut outcome = None;

        self.state.send_if_modified(|current| match reduce(current, &action) {
            Ok(next) if Arc::ptr_eq(current, &next) => {
                debug!(action = action.kind(), "Identity transition, cart unchanged");
                outcome = Some(Ok(next));
                false
            }
            Ok(next) => {
                debug!(
                    action = action.kind(),
                    lines = next.len(),
                    units = next.total_quantity(),
                    "Cart transition"
                );
                *current = Arc::clone(&next);
                outcome = Some(Ok(next));
                true
            }
            Err(CoreError::ItemNotFound { id })
                if self.settings.on_missing_item == MissingItemPolicy::Ignore =>
            {
                debug!(id = %id, "Remove of item not in cart ignored");
                outcome = Some(Ok(Arc::clone(current)));
                false
            }
            Err(e) => {
                debug!(action = action.kind(), error = %e, "Cart transition rejected");
                outcome = Some(Err(e.into()));
                false
            }
        });

        outcome.unwrap_or_else(|| Ok(self.current_items()))
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartHandle for CartStore {
    fn add_item(&self, candidate: Meal) -> StoreResult<CartSnapshot> {
        self.dispatch(CartAction::AddItem { item: candidate })
    }

    fn remove_item(&self, id: &MealId) -> StoreResult<CartSnapshot> {
        self.dispatch(CartAction::RemoveItem { id: id.clone() })
    }

    fn clear_cart(&self) -> CartSnapshot {
        let cleared = CartSnapshot::default();
        let previous = self.state.send_replace(Arc::clone(&cleared));
        debug!(dropped_lines = previous.len(), "Cart cleared");
        cleared
    }

    fn current_items(&self) -> CartSnapshot {
        Arc::clone(&self.state.borrow())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
