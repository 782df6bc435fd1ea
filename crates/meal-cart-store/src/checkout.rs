//! # Checkout Payload
//!
//! Builds the body the checkout form POSTs to the order service. Sending
//! it is the submitter's job; this module only snapshots the cart and
//! validates the customer fields.
//!
//! ## Checkout Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Lifecycle                                   │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Cart    │────►│ Checkout │────►│ Payload  │────►│  Order   │       │
//! │  │  modal   │     │  form    │     │ prepared │     │  placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                                         │                │              │
//! │                               CheckoutRequest::prepare   │              │
//! │                                                           ▼              │
//! │                                               complete_checkout         │
//! │                                          (clear cart, close modal)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! ```json
//! {"order": {"id": "…", "items": [{"id": "m1", "name": "…", "price": 899, "quantity": 2}],
//!            "customer": {"name": "…", "email": "…", "street": "…", "postal-code": "…", "city": "…"},
//!            "total": 1798, "createdAt": "2026-01-01T12:00:00Z"}}
//! ```

use chrono::{DateTime, Utc};
use meal_cart_core::validation::{validate_email, validate_required, ValidationResult};
use meal_cart_core::{CartState, CoreError, LineItem, Money, ProgressAction, UserProgress};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::store::CartHandle;

// =============================================================================
// Customer Data
// =============================================================================

/// The checkout form's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerData {
    pub name: String,
    pub email: String,
    pub street: String,
    #[serde(rename = "postal-code")]
    pub postal_code: String,
    pub city: String,
}

impl CustomerData {
    /// Returns a trimmed copy, or the first field that fails validation.
    pub fn validated(&self) -> ValidationResult<CustomerData> {
        Ok(CustomerData {
            name: validate_required("name", &self.name)?,
            email: validate_email(&self.email)?,
            street: validate_required("street", &self.street)?,
            postal_code: validate_required("postal-code", &self.postal_code)?,
            city: validate_required("city", &self.city)?,
        })
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order as submitted by the checkout form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Client-generated id, lets the order service drop double submits.
    #[ts(as = "String")]
    pub id: Uuid,

    /// Cart lines at the moment the form was submitted.
    pub items: Vec<LineItem>,

    pub customer: CustomerData,

    /// Σ price × quantity of `items`.
    pub total: Money,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    pub order: Order,
}

impl CheckoutRequest {
    /// Snapshots `cart` and builds the request.
    ///
    /// ## Errors
    /// - `CoreError::EmptyCart` if there is nothing to order
    /// - `CoreError::Validation` for the first invalid customer field
    pub fn prepare(cart: &impl CartHandle, customer: &CustomerData) -> StoreResult<Self> {
        Self::from_snapshot(&cart.current_items(), customer)
    }

    /// Builds the request from an explicit snapshot.
    pub fn from_snapshot(snapshot: &CartState, customer: &CustomerData) -> StoreResult<Self> {
        if snapshot.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let customer = customer.validated()?;

        let order = Order {
            id: Uuid::new_v4(),
            items: snapshot.iter().cloned().collect(),
            customer,
            total: snapshot.total_price(),
            created_at: Utc::now(),
        };

        info!(
            order_id = %order.id,
            lines = order.items.len(),
            total = %order.total,
            "Checkout request prepared"
        );

        Ok(CheckoutRequest { order })
    }

    /// Serializes the request body.
    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Finishes a successful checkout: empties the cart and closes the form.
pub fn complete_checkout(cart: &impl CartHandle, progress: UserProgress) -> UserProgress {
    cart.clear_cart();
    let next = progress.apply(ProgressAction::HideCheckout);
    debug!(?progress, ?next, "Checkout completed");
    next
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CartStore;
    use meal_cart_core::Meal;

    fn customer() -> CustomerData {
        CustomerData {
            name: " Max Schwarz ".to_string(),
            email: "max@example.com".to_string(),
            street: "Main Street 5".to_string(),
            postal_code: "12345".to_string(),
            city: "Springfield".to_string(),
        }
    }

    fn filled_store() -> CartStore {
        let store = CartStore::new();
        let mac = Meal::new("m1", "Mac & Cheese", Money::from_cents(899));
        store.add_item(mac.clone()).unwrap();
        store.add_item(mac).unwrap();
        store
            .add_item(Meal::new("m2", "Margherita Pizza", Money::from_cents(1299)))
            .unwrap();
        store
    }

    #[test]
    fn test_prepare_snapshots_cart() {
        let store = filled_store();

        let request = CheckoutRequest::prepare(&store, &customer()).unwrap();

        assert_eq!(request.order.items.len(), 2);
        assert_eq!(request.order.items[0].quantity, 2);
        assert_eq!(request.order.total.cents(), 899 * 2 + 1299);
        assert_eq!(request.order.customer.name, "Max Schwarz");
    }

    #[test]
    fn test_later_cart_changes_do_not_leak_into_request() {
        let store = filled_store();
        let request = CheckoutRequest::prepare(&store, &customer()).unwrap();

        store.clear_cart();

        assert_eq!(request.order.items.len(), 2);
    }

    #[test]
    fn test_empty_cart_rejected() {
        let store = CartStore::new();
        let err = CheckoutRequest::prepare(&store, &customer()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::StoreError::Core(CoreError::EmptyCart)
        ));
    }

    #[test]
    fn test_invalid_customer_rejected() {
        let store = filled_store();
        let mut bad = customer();
        bad.email = "not-an-email".to_string();

        let err = CheckoutRequest::prepare(&store, &bad).unwrap_err();
        assert!(err.is_invalid_argument());

        bad = customer();
        bad.city = "  ".to_string();
        let err = CheckoutRequest::prepare(&store, &bad).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: city is required");
    }

    #[test]
    fn test_wire_format() {
        let store = filled_store();
        let request = CheckoutRequest::prepare(&store, &customer()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        let order = &value["order"];

        assert_eq!(order["items"][0]["id"], "m1");
        assert_eq!(order["items"][0]["quantity"], 2);
        assert_eq!(order["customer"]["postal-code"], "12345");
        assert_eq!(order["total"], 3097);
        assert!(order["createdAt"].is_string());
        assert!(order["id"].is_string());
    }

    #[test]
    fn test_complete_checkout_resets_cart_and_modal() {
        let store = filled_store();

        let progress = complete_checkout(&store, UserProgress::Checkout);

        assert_eq!(progress, UserProgress::Idle);
        assert!(store.current_items().is_empty());
    }
}
