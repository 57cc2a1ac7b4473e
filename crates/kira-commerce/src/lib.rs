//! Cart and checkout domain core for the Kira storefront.
//!
//! This crate owns the client-side state that matters: the shopping cart and
//! the checkout flow that turns it into an order.
//!
//! - **Cart**: ordered line items, unique per product, with merge-on-add,
//!   fresh derived totals, write-through persistence, and change
//!   notifications for UI layers.
//! - **Checkout**: precondition checks, snapshot-based submission to the
//!   order API, and cart reconciliation (clear on success, untouched on
//!   failure).
//! - **Catalog**: the product display shape the cart snapshots at add-time.
//!
//! Collaborators (persistence, the order API, the credential source) are
//! injected through traits, so everything here runs against in-memory test
//! doubles.
//!
//! # Example
//!
//! ```rust,ignore
//! use kira_cache::MemoryStore;
//! use kira_commerce::prelude::*;
//! use std::cell::RefCell;
//!
//! let cart = RefCell::new(CartStore::load(MemoryStore::new()));
//! cart.borrow_mut().add_item(&product, 2)?;
//!
//! let flow = CheckoutFlow::new(orders_client, auth_state);
//! let order = flow.submit(&cart).await?;
//! println!("placed order {}", order.id);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::{CartError, CheckoutError, OrderApiError};
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CartError, CheckoutError, OrderApiError};
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::Product;

    // Cart
    pub use crate::cart::{
        CartEvent, CartSnapshot, CartStore, EventKind, LineItem, ObserverId,
    };

    // Checkout
    pub use crate::checkout::{
        AuthToken, CheckoutConfig, CheckoutFlow, CheckoutState, CredentialSource,
        IdempotencyKey, OrderApi, OrderStatus, OrderSubmission, PlacedOrder, SubmissionItem,
    };
}
