//! Order API client.

use crate::{FetchClient, FetchError, Response};
use async_trait::async_trait;
use kira_commerce::checkout::{
    AuthToken, IdempotencyKey, OrderApi, OrderStatus, OrderSubmission, PlacedOrder,
};
use kira_commerce::error::OrderApiError;
use kira_commerce::ids::{OrderId, ProductId};
use serde::Deserialize;
use tracing::debug;

/// Client for the storefront order endpoints.
///
/// Implements the [`OrderApi`] seam, so a [`CheckoutFlow`] built on it talks
/// to the real backend.
///
/// [`CheckoutFlow`]: kira_commerce::checkout::CheckoutFlow
pub struct OrdersClient {
    http: FetchClient,
}

impl OrdersClient {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: FetchClient::new().with_base_url(base_url),
        }
    }

    /// Fetch the authenticated user's order history, with line items.
    pub fn my_orders(&self, token: &AuthToken) -> Result<Vec<PastOrder>, FetchError> {
        let response = self
            .http
            .get("/api/my-orders")
            .bearer_auth(token.as_str())
            .send()?
            .error_for_status()?;
        let envelope: OrdersEnvelope = response.json()?;
        Ok(envelope.orders)
    }
}

#[async_trait(?Send)]
impl OrderApi for OrdersClient {
    async fn create_order(
        &self,
        submission: &OrderSubmission,
        idempotency_key: &IdempotencyKey,
        token: &AuthToken,
    ) -> Result<PlacedOrder, OrderApiError> {
        let response = self
            .http
            .post("/api/orders")
            .bearer_auth(token.as_str())
            .header("Idempotency-Key", idempotency_key.as_str())
            .json(submission)
            .map_err(|e| OrderApiError::Transport(e.to_string()))?
            .send()
            .map_err(|e| OrderApiError::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(OrderApiError::Http {
                status: response.status,
                message: error_message(&response),
            });
        }

        let envelope: CreatedEnvelope = response
            .json()
            .map_err(|e| OrderApiError::InvalidResponse(e.to_string()))?;
        debug!(order_id = %envelope.order.id, "order created");
        Ok(envelope.order)
    }
}

/// An order as returned by the order-history endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PastOrder {
    /// Server-assigned order id.
    pub id: OrderId,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Order total in whole currency units.
    pub total_amount: f64,
    /// Server-side creation timestamp.
    pub created_at: String,
    /// Line items of the order.
    #[serde(default)]
    pub items: Vec<PastOrderItem>,
}

/// One line of a [`PastOrder`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PastOrderItem {
    /// Product that was ordered.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit price paid, in whole currency units.
    pub price: f64,
}

#[derive(Debug, Deserialize)]
struct OrdersEnvelope {
    orders: Vec<PastOrder>,
}

#[derive(Debug, Deserialize)]
struct CreatedEnvelope {
    order: PlacedOrder,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: String,
}

/// Extract the API error envelope's `message`, falling back to the status.
fn error_message(response: &Response) -> String {
    response
        .json::<ErrorEnvelope>()
        .map(|envelope| envelope.message)
        .unwrap_or_else(|_| format!("HTTP {}", response.status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(status: u16, body: &str) -> Response {
        Response::new(status, HashMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_error_message_prefers_payload_message() {
        let resp = response(400, r#"{"message": "Invalid order data"}"#);
        assert_eq!(error_message(&resp), "Invalid order data");
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        let resp = response(502, "<html>Bad Gateway</html>");
        assert_eq!(error_message(&resp), "HTTP 502");
    }

    #[test]
    fn test_created_envelope_parses() {
        let resp = response(
            201,
            r#"{
                "message": "Order created successfully",
                "order": {
                    "id": 9,
                    "userId": 3,
                    "status": "pending",
                    "totalAmount": 20.0,
                    "createdAt": "2024-03-01T10:00:00.000Z"
                }
            }"#,
        );

        let envelope: CreatedEnvelope = resp.json().unwrap();
        assert_eq!(envelope.order.id, OrderId::new(9));
        assert_eq!(envelope.order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_order_history_parses_with_items() {
        let resp = response(
            200,
            r#"{
                "orders": [{
                    "id": 5,
                    "userId": 3,
                    "status": "completed",
                    "totalAmount": 31.0,
                    "createdAt": "2024-02-10T08:30:00.000Z",
                    "items": [
                        { "id": 11, "orderId": 5, "productId": 1, "quantity": 2, "price": 10.5 },
                        { "id": 12, "orderId": 5, "productId": 4, "quantity": 1, "price": 10.0 }
                    ]
                }]
            }"#,
        );

        let envelope: OrdersEnvelope = resp.json().unwrap();
        assert_eq!(envelope.orders.len(), 1);
        let order = &envelope.orders[0];
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].product_id, ProductId::new(1));
        assert_eq!(order.items[0].quantity, 2);
    }
}
