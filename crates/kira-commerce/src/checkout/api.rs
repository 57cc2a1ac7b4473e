//! Collaborator seams for the checkout flow.

use crate::checkout::{IdempotencyKey, OrderSubmission, PlacedOrder};
use crate::error::OrderApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// An opaque bearer credential identifying the authenticated user.
///
/// Deliberately has no `Display` impl; tokens do not belong in logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the token as a string slice, e.g. for an `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Supplies the current user's credential to the checkout flow.
///
/// The credential is always passed explicitly; the flow never reads ambient
/// state, which keeps the authentication precondition independently testable.
pub trait CredentialSource {
    /// The bearer credential of the current user, or `None` when logged out.
    fn bearer_token(&self) -> Option<AuthToken>;
}

impl<C: CredentialSource + ?Sized> CredentialSource for &C {
    fn bearer_token(&self) -> Option<AuthToken> {
        (**self).bearer_token()
    }
}

impl<C: CredentialSource + ?Sized> CredentialSource for Rc<C> {
    fn bearer_token(&self) -> Option<AuthToken> {
        (**self).bearer_token()
    }
}

impl<C: CredentialSource> CredentialSource for RefCell<C> {
    fn bearer_token(&self) -> Option<AuthToken> {
        self.borrow().bearer_token()
    }
}

/// The order-creation endpoint the checkout flow submits to.
///
/// The single-threaded client model needs no `Send` bound; implementations
/// live in the HTTP layer, and tests substitute counting stubs.
#[async_trait(?Send)]
pub trait OrderApi {
    /// Persist an order. Returns the server's representation on 2xx.
    async fn create_order(
        &self,
        submission: &OrderSubmission,
        idempotency_key: &IdempotencyKey,
        token: &AuthToken,
    ) -> Result<PlacedOrder, OrderApiError>;
}
