//! Order submission and order types.

use crate::cart::CartSnapshot;
use crate::ids::{OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// The request body of the order-creation endpoint.
///
/// Built only from a [`CartSnapshot`]; `total_amount` is computed from the
/// snapshot and never trusted from any other source. Owned by one checkout
/// invocation and discarded once the API call resolves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSubmission {
    /// Order total in whole currency units; equals the snapshot subtotal.
    pub total_amount: f64,
    /// Line items mirrored 1:1 from the snapshot.
    pub items: Vec<SubmissionItem>,
}

/// One line of an [`OrderSubmission`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionItem {
    /// Product being ordered.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit price at submission time, in whole currency units.
    pub price: f64,
}

impl OrderSubmission {
    /// Build a submission from a cart snapshot.
    pub fn from_snapshot(snapshot: &CartSnapshot) -> Self {
        Self {
            total_amount: snapshot.subtotal.to_decimal(),
            items: snapshot
                .items
                .iter()
                .map(|item| SubmissionItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: item.unit_price.to_decimal(),
                })
                .collect(),
        }
    }
}

/// Client-generated key identifying one submission attempt.
///
/// Sent as the `Idempotency-Key` header so a server-side dedupe can reject a
/// double apply of the same attempt. Each checkout invocation generates a
/// fresh key: a retry after an observed failure is a new order intent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Generate a new unique key.
    pub fn generate() -> Self {
        Self(format!("idem-{}", generate_unique_suffix()))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Order lifecycle status, as the server reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order confirmed and being prepared.
    Processing,
    /// Order fulfilled.
    Completed,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Check if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Check if the order can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

/// The server's representation of a created order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    /// Server-assigned order id.
    pub id: OrderId,
    /// The user the order belongs to.
    pub user_id: UserId,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Order total in whole currency units.
    pub total_amount: f64,
    /// Server-side creation timestamp, as serialized by the API.
    pub created_at: String,
}

/// Generate a unique suffix using timestamp and an atomic counter.
fn generate_unique_suffix() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);

    format!("{:x}-{:x}", timestamp as u64, counter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartSnapshot, LineItem};
    use crate::money::{Currency, Money};

    fn snapshot() -> CartSnapshot {
        let items = vec![
            LineItem {
                product_id: ProductId::new(1),
                name: "Candle".to_string(),
                unit_price: Money::new(1000, Currency::USD),
                image_url: "/images/candle.jpg".to_string(),
                quantity: 2,
            },
            LineItem {
                product_id: ProductId::new(4),
                name: "Soap".to_string(),
                unit_price: Money::new(550, Currency::USD),
                image_url: "/images/soap.jpg".to_string(),
                quantity: 1,
            },
        ];
        CartSnapshot {
            subtotal: Money::new(2550, Currency::USD),
            items,
        }
    }

    #[test]
    fn test_submission_mirrors_snapshot() {
        let submission = OrderSubmission::from_snapshot(&snapshot());
        assert_eq!(submission.total_amount, 25.5);
        assert_eq!(submission.items.len(), 2);
        assert_eq!(submission.items[0].product_id, ProductId::new(1));
        assert_eq!(submission.items[0].quantity, 2);
        assert_eq!(submission.items[0].price, 10.0);
    }

    #[test]
    fn test_submission_wire_shape() {
        let submission = OrderSubmission::from_snapshot(&snapshot());
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "total_amount": 25.5,
                "items": [
                    { "product_id": 1, "quantity": 2, "price": 10.0 },
                    { "product_id": 4, "quantity": 1, "price": 5.5 },
                ],
            })
        );
    }

    #[test]
    fn test_idempotency_keys_are_unique() {
        let a = IdempotencyKey::generate();
        let b = IdempotencyKey::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("idem-"));
    }

    #[test]
    fn test_placed_order_deserializes_api_shape() {
        let json = r#"{
            "id": 42,
            "userId": 7,
            "status": "pending",
            "totalAmount": 25.5,
            "createdAt": "2024-03-01T10:00:00.000Z"
        }"#;

        let order: PlacedOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, OrderId::new(42));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, 25.5);
    }

    #[test]
    fn test_order_status_transitions() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Processing.can_cancel());
        assert!(!OrderStatus::Completed.can_cancel());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
    }
}
