//! Cart and checkout error types.

use thiserror::Error;

/// Errors that can occur when mutating the cart.
#[derive(Error, Debug)]
pub enum CartError {
    /// Quantity must be a positive integer.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds the per-item ceiling.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Arithmetic overflow in a money calculation.
    #[error("Arithmetic overflow in cart total")]
    Overflow,
}

/// Errors produced by the order API seam.
///
/// Defined next to the [`OrderApi`](crate::checkout::OrderApi) trait rather
/// than in the HTTP crate so that the checkout flow stays independent of any
/// particular transport.
#[derive(Error, Debug)]
pub enum OrderApiError {
    /// The server answered with a non-2xx status. The message is the error
    /// payload's `message` field when present, otherwise a generic
    /// description of the status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never completed (connection failure, abort).
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered 2xx but the body was not the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur during checkout.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// The cart has no line items; nothing was submitted.
    #[error("Cart is empty")]
    EmptyCart,

    /// No credential is available; the caller should send the user to a
    /// login surface. The cart is preserved.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// A submission is already in flight on this flow instance.
    #[error("A checkout is already in progress")]
    SubmissionInFlight,

    /// Reading the cart snapshot failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The order submission failed; the cart is untouched and the user may
    /// retry.
    #[error("Order submission failed: {0}")]
    Submission(String),
}
