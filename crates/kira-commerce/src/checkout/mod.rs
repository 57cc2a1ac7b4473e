//! Checkout module.
//!
//! Converts a cart snapshot into one order submission and reconciles the
//! cart with the outcome. The order API and the credential source are
//! injected traits so the flow can be exercised without a network.

mod api;
mod flow;
mod submission;

pub use api::{AuthToken, CredentialSource, OrderApi};
pub use flow::{CheckoutConfig, CheckoutFlow, CheckoutState};
pub use submission::{
    IdempotencyKey, OrderStatus, OrderSubmission, PlacedOrder, SubmissionItem,
};
