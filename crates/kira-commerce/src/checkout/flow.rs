//! Checkout flow state machine.

use crate::cart::CartStore;
use crate::checkout::{CredentialSource, IdempotencyKey, OrderApi, OrderSubmission, PlacedOrder};
use crate::error::CheckoutError;
use kira_cache::KeyValue;
use std::cell::{Cell, RefCell};
use std::time::Duration;
use tracing::{info, warn};

/// Phase of the most recent checkout invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutState {
    /// No submission attempted yet (or the last in-flight one was abandoned).
    Idle,
    /// Preconditions being checked.
    Validating,
    /// Submission awaiting the order API.
    Submitting,
    /// The last invocation placed an order.
    Succeeded,
    /// The last invocation failed; the cart was left untouched.
    Failed,
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::Validating => "validating",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Succeeded => "succeeded",
            CheckoutState::Failed => "failed",
        }
    }
}

/// Checkout tuning knobs.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Bounded wait for the order API before the attempt is treated as
    /// failed.
    pub submit_timeout: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            submit_timeout: Duration::from_secs(30),
        }
    }
}

/// Converts the current cart into a single order submission.
///
/// Enforces the preconditions (non-empty cart, authenticated user), submits
/// a snapshot-built order, and reconciles the cart with the outcome: cleared
/// on observed success, untouched on any failure so the user can retry.
///
/// At most one submission may be in flight per flow instance; a second
/// `submit` while one is pending is rejected. The UI should disable
/// cart-mutating affordances while [`is_submitting`](Self::is_submitting)
/// reports true.
pub struct CheckoutFlow<A, C> {
    api: A,
    credentials: C,
    config: CheckoutConfig,
    state: Cell<CheckoutState>,
}

impl<A: OrderApi, C: CredentialSource> CheckoutFlow<A, C> {
    /// Create a flow with the default configuration.
    pub fn new(api: A, credentials: C) -> Self {
        Self::with_config(api, credentials, CheckoutConfig::default())
    }

    /// Create a flow with an explicit configuration.
    pub fn with_config(api: A, credentials: C, config: CheckoutConfig) -> Self {
        Self {
            api,
            credentials,
            config,
            state: Cell::new(CheckoutState::Idle),
        }
    }

    /// Phase of the most recent invocation.
    pub fn state(&self) -> CheckoutState {
        self.state.get()
    }

    /// Whether a submission is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.state.get() == CheckoutState::Submitting
    }

    /// Submit the current cart as one order.
    ///
    /// Cart borrows never live across the await: the snapshot is taken
    /// before submission, and the clear happens only after the API's success
    /// is observed. Dropping the returned future mid-flight abandons the
    /// request and leaves the cart as it was.
    pub async fn submit<S: KeyValue>(
        &self,
        cart: &RefCell<CartStore<S>>,
    ) -> Result<PlacedOrder, CheckoutError> {
        if self.state.get() == CheckoutState::Submitting {
            return Err(CheckoutError::SubmissionInFlight);
        }
        self.state.set(CheckoutState::Validating);

        let snapshot = {
            let cart = cart.borrow();
            if cart.is_empty() {
                self.state.set(CheckoutState::Failed);
                return Err(CheckoutError::EmptyCart);
            }
            match cart.snapshot() {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    self.state.set(CheckoutState::Failed);
                    return Err(err.into());
                }
            }
        };

        let Some(token) = self.credentials.bearer_token() else {
            self.state.set(CheckoutState::Failed);
            return Err(CheckoutError::AuthenticationRequired);
        };

        let submission = OrderSubmission::from_snapshot(&snapshot);
        let idempotency_key = IdempotencyKey::generate();

        self.state.set(CheckoutState::Submitting);
        let _guard = InFlightGuard(&self.state);
        info!(
            total = submission.total_amount,
            lines = submission.items.len(),
            "submitting order"
        );

        let outcome = tokio::time::timeout(
            self.config.submit_timeout,
            self.api.create_order(&submission, &idempotency_key, &token),
        )
        .await;

        match outcome {
            Ok(Ok(order)) => {
                self.state.set(CheckoutState::Succeeded);
                cart.borrow_mut().clear();
                info!(order_id = %order.id, "order placed");
                Ok(order)
            }
            Ok(Err(err)) => {
                self.state.set(CheckoutState::Failed);
                warn!(error = %err, "order submission failed");
                Err(CheckoutError::Submission(err.to_string()))
            }
            Err(_) => {
                self.state.set(CheckoutState::Failed);
                warn!(timeout = ?self.config.submit_timeout, "order submission timed out");
                Err(CheckoutError::Submission(format!(
                    "Timed out after {:?}",
                    self.config.submit_timeout
                )))
            }
        }
    }
}

/// Resets an abandoned in-flight submission back to `Idle`.
///
/// If the submit future is dropped while awaiting the API, the state would
/// otherwise stay `Submitting` forever and lock the flow out.
struct InFlightGuard<'a>(&'a Cell<CheckoutState>);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.0.get() == CheckoutState::Submitting {
            self.0.set(CheckoutState::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::checkout::{AuthToken, OrderStatus};
    use crate::error::OrderApiError;
    use crate::ids::{OrderId, ProductId, UserId};
    use async_trait::async_trait;
    use kira_cache::MemoryStore;
    use std::cell::Cell;
    use tokio::sync::oneshot;

    fn product(id: i64, price: f64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: "A product".to_string(),
            price,
            image_url: format!("/images/{id}.jpg"),
            category: "misc".to_string(),
            in_stock: true,
            quantity: 100,
        }
    }

    fn placed_order() -> PlacedOrder {
        PlacedOrder {
            id: OrderId::new(42),
            user_id: UserId::new(7),
            status: OrderStatus::Pending,
            total_amount: 20.0,
            created_at: "2024-03-01T10:00:00.000Z".to_string(),
        }
    }

    enum Reply {
        Created,
        Http(u16, &'static str),
        Gated(RefCell<Option<oneshot::Receiver<()>>>),
        Never,
    }

    struct StubApi {
        calls: Cell<usize>,
        seen: RefCell<Vec<(OrderSubmission, IdempotencyKey)>>,
        reply: Reply,
    }

    impl StubApi {
        fn new(reply: Reply) -> Self {
            Self {
                calls: Cell::new(0),
                seen: RefCell::new(Vec::new()),
                reply,
            }
        }
    }

    #[async_trait(?Send)]
    impl OrderApi for StubApi {
        async fn create_order(
            &self,
            submission: &OrderSubmission,
            idempotency_key: &IdempotencyKey,
            _token: &AuthToken,
        ) -> Result<PlacedOrder, OrderApiError> {
            self.calls.set(self.calls.get() + 1);
            self.seen
                .borrow_mut()
                .push((submission.clone(), idempotency_key.clone()));
            match &self.reply {
                Reply::Created => Ok(placed_order()),
                Reply::Http(status, message) => Err(OrderApiError::Http {
                    status: *status,
                    message: message.to_string(),
                }),
                Reply::Gated(gate) => {
                    let gate = gate.borrow_mut().take().expect("gate already consumed");
                    let _ = gate.await;
                    Ok(placed_order())
                }
                Reply::Never => futures::future::pending().await,
            }
        }
    }

    struct Authenticated;

    impl CredentialSource for Authenticated {
        fn bearer_token(&self) -> Option<AuthToken> {
            Some(AuthToken::new("token-123"))
        }
    }

    struct Anonymous;

    impl CredentialSource for Anonymous {
        fn bearer_token(&self) -> Option<AuthToken> {
            None
        }
    }

    fn cart_with_two_candles() -> RefCell<CartStore<MemoryStore>> {
        let mut cart = CartStore::load(MemoryStore::new());
        cart.add_item(&product(1, 10.0), 2).unwrap();
        RefCell::new(cart)
    }

    #[tokio::test]
    async fn test_successful_checkout_submits_and_clears_cart() {
        let cart = cart_with_two_candles();
        let flow = CheckoutFlow::new(StubApi::new(Reply::Created), Authenticated);

        let order = flow.submit(&cart).await.unwrap();
        assert_eq!(order.id, OrderId::new(42));
        assert_eq!(flow.state(), CheckoutState::Succeeded);
        assert!(cart.borrow().is_empty());

        let seen = flow.api.seen.borrow();
        assert_eq!(seen.len(), 1);
        let (submission, _) = &seen[0];
        assert_eq!(submission.total_amount, 20.0);
        assert_eq!(
            submission.items,
            vec![crate::checkout::SubmissionItem {
                product_id: ProductId::new(1),
                quantity: 2,
                price: 10.0,
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_cart_fails_without_api_call() {
        let cart = RefCell::new(CartStore::load(MemoryStore::new()));
        let flow = CheckoutFlow::new(StubApi::new(Reply::Created), Authenticated);

        let err = flow.submit(&cart).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
        assert_eq!(flow.api.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_unauthenticated_fails_and_preserves_cart() {
        let cart = cart_with_two_candles();
        let before = cart.borrow().items().to_vec();
        let flow = CheckoutFlow::new(StubApi::new(Reply::Created), Anonymous);

        let err = flow.submit(&cart).await.unwrap_err();
        assert!(matches!(err, CheckoutError::AuthenticationRequired));
        assert_eq!(flow.api.calls.get(), 0);
        assert_eq!(cart.borrow().items(), before.as_slice());
    }

    #[tokio::test]
    async fn test_api_failure_surfaces_message_and_preserves_cart() {
        let cart = cart_with_two_candles();
        let before = cart.borrow().items().to_vec();
        let flow = CheckoutFlow::new(
            StubApi::new(Reply::Http(400, "Invalid order data")),
            Authenticated,
        );

        let err = flow.submit(&cart).await.unwrap_err();
        match err {
            CheckoutError::Submission(message) => {
                assert!(message.contains("Invalid order data"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(flow.state(), CheckoutState::Failed);
        assert_eq!(cart.borrow().items(), before.as_slice());
    }

    #[tokio::test]
    async fn test_second_submit_while_in_flight_is_rejected() {
        let cart = cart_with_two_candles();
        let (open_gate, gate) = oneshot::channel();
        let flow = CheckoutFlow::new(
            StubApi::new(Reply::Gated(RefCell::new(Some(gate)))),
            Authenticated,
        );

        let mut first = Box::pin(flow.submit(&cart));
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(flow.is_submitting());

        let err = flow.submit(&cart).await.unwrap_err();
        assert!(matches!(err, CheckoutError::SubmissionInFlight));

        open_gate.send(()).unwrap();
        first.await.unwrap();
        assert_eq!(flow.api.calls.get(), 1);
        assert!(cart.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_dropped_submission_resets_flow_and_preserves_cart() {
        let cart = cart_with_two_candles();
        let before = cart.borrow().items().to_vec();
        let (_open_gate, gate) = oneshot::channel::<()>();
        let flow = CheckoutFlow::new(
            StubApi::new(Reply::Gated(RefCell::new(Some(gate)))),
            Authenticated,
        );

        let mut pending = Box::pin(flow.submit(&cart));
        assert!(futures::poll!(pending.as_mut()).is_pending());
        assert!(flow.is_submitting());

        drop(pending);
        assert_eq!(flow.state(), CheckoutState::Idle);
        assert_eq!(cart.borrow().items(), before.as_slice());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_times_out() {
        let cart = cart_with_two_candles();
        let before = cart.borrow().items().to_vec();
        let flow = CheckoutFlow::with_config(
            StubApi::new(Reply::Never),
            Authenticated,
            CheckoutConfig {
                submit_timeout: Duration::from_secs(5),
            },
        );

        let err = flow.submit(&cart).await.unwrap_err();
        match err {
            CheckoutError::Submission(message) => assert!(message.contains("Timed out")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(flow.state(), CheckoutState::Failed);
        assert_eq!(cart.borrow().items(), before.as_slice());
    }

    #[tokio::test]
    async fn test_retry_after_failure_uses_fresh_idempotency_key() {
        let cart = cart_with_two_candles();
        let flow = CheckoutFlow::new(
            StubApi::new(Reply::Http(500, "Failed to create order")),
            Authenticated,
        );

        flow.submit(&cart).await.unwrap_err();
        flow.submit(&cart).await.unwrap_err();

        let seen = flow.api.seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_ne!(seen[0].1, seen[1].1);
    }
}
