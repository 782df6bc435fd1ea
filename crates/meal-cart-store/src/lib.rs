//! # meal-cart-store: The Live Cart
//!
//! Wraps the pure reducer from `meal-cart-core` for use by view components.
//!
//! ## Module Organization
//! ```text
//! meal_cart_store/
//! ├── lib.rs          ◄─── You are here (re-exports, tracing setup)
//! ├── store.rs        ◄─── CartStore + CartHandle
//! ├── config.rs       ◄─── StoreConfig (cart.toml + env)
//! ├── checkout.rs     ◄─── Checkout request payload
//! ├── error.rs        ◄─── StoreError
//! └── bin/replay.rs   ◄─── Replay a JSON action log
//! ```
//!
//! ## Wiring
//! ```rust
//! use meal_cart_store::{CartHandle, CartStore, StoreConfig};
//! use meal_cart_core::{Meal, Money};
//!
//! let config = StoreConfig::default();
//! let store = CartStore::with_settings(config.cart.clone());
//!
//! // Each view gets its own handle to the same cart.
//! let meals_view = store.clone();
//! let header_view = store.clone();
//!
//! meals_view.add_item(Meal::new("m1", "Mac & Cheese", Money::from_cents(899))).unwrap();
//! assert_eq!(header_view.current_items().total_quantity(), 1);
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod store;

pub use checkout::{complete_checkout, CheckoutRequest, CustomerData, Order};
pub use config::{CartSettings, LoggingSettings, MissingItemPolicy, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use store::{CartHandle, CartStore};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set (e.g. `RUST_LOG=meal_cart_store=trace`)
/// - Otherwise `fallback_filter` (usually `StoreConfig.logging.filter`)
///
/// Returns false if a global subscriber was already installed.
pub fn init_tracing(fallback_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
