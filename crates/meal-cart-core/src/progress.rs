//! # User Progress
//!
//! Which ordering modal is open. The cart modal leads to the checkout form;
//! closing either returns to the listing.
//!
//! ```text
//!            ShowCart              ShowCheckout
//!   Idle ───────────────► Cart ───────────────────► Checkout
//!    ▲                     │                           │
//!    └──── HideCart ───────┘                           │
//!    └──────────────────── HideCheckout ───────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The modal currently shown over the meal listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UserProgress {
    /// No modal; browsing the listing.
    #[default]
    Idle,
    /// Cart modal open.
    Cart,
    /// Checkout form open.
    Checkout,
}

/// Requests to open or close a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProgressAction {
    ShowCart,
    HideCart,
    ShowCheckout,
    HideCheckout,
}

impl UserProgress {
    /// Next modal state.
    ///
    /// Checkout opens only from the cart (or is already open); hiding a
    /// modal that is not shown changes nothing.
    pub fn apply(self, action: ProgressAction) -> UserProgress {
        match (self, action) {
            (_, ProgressAction::ShowCart) => UserProgress::Cart,
            (UserProgress::Cart | UserProgress::Checkout, ProgressAction::ShowCheckout) => {
                UserProgress::Checkout
            }
            (UserProgress::Idle, ProgressAction::ShowCheckout) => self,
            (UserProgress::Cart, ProgressAction::HideCart) => UserProgress::Idle,
            (UserProgress::Checkout, ProgressAction::HideCheckout) => UserProgress::Idle,
            (_, ProgressAction::HideCart | ProgressAction::HideCheckout) => self,
        }
    }

    /// Checks if any modal is open.
    pub fn is_modal_open(self) -> bool {
        self != UserProgress::Idle
    }
}
