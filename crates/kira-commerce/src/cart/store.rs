//! The cart store.

use crate::cart::{CartEvent, EventKind, LineItem, ObserverId};
use crate::catalog::Product;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use kira_cache::{KeyValue, KeyValueExt};
use tracing::{debug, warn};

/// Fixed key of the cart's persistence slot.
pub const CART_STORAGE_KEY: &str = "kira.cart";

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A consistent read of the cart taken at one instant.
///
/// The subtotal is computed from the same items, so a submission built from a
/// snapshot stays internally consistent even if the live cart changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    /// Line items at snapshot time, in cart order.
    pub items: Vec<LineItem>,
    /// Sum of line totals at snapshot time.
    pub subtotal: Money,
}

/// Single source of truth for the user's in-progress cart.
///
/// The collection is ordered and unique by product id: adding a product that
/// is already present merges quantities instead of duplicating the row.
/// Every state-changing mutation writes the full item list through to the
/// injected [`KeyValue`] slot and notifies subscribed observers. Derived
/// values (subtotal, item count) are recomputed from the items on every read;
/// nothing aggregate is cached.
pub struct CartStore<S: KeyValue> {
    items: Vec<LineItem>,
    storage: S,
    observers: Vec<(ObserverId, Box<dyn Fn(&CartEvent)>)>,
    next_observer: u64,
}

impl<S: KeyValue> CartStore<S> {
    /// Restore the cart from its persisted snapshot, or start empty.
    ///
    /// Missing or unparsable persisted data is treated as "no cart", never as
    /// a fatal error: the storefront must stay usable even if the local slot
    /// was corrupted.
    pub fn load(storage: S) -> Self {
        let items = match storage.get::<Vec<LineItem>>(CART_STORAGE_KEY) {
            Ok(Some(items)) => {
                debug!(lines = items.len(), "restored cart from storage");
                items
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "discarding unreadable cart snapshot");
                Vec::new()
            }
        };
        Self {
            items,
            storage,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Add a product to the cart.
    ///
    /// If a line item with the same product id exists, its quantity is
    /// incremented; otherwise a new line item is appended using the product's
    /// current display fields. Rejects non-positive quantities, quantities
    /// past the per-item ceiling, and line totals that would overflow; a
    /// rejected call leaves the cart untouched.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        if let Some(pos) = self.items.iter().position(|i| i.product_id == product.id) {
            let merged = self.items[pos]
                .quantity
                .checked_add(quantity)
                .ok_or(CartError::Overflow)?;
            if merged > MAX_QUANTITY_PER_ITEM {
                return Err(CartError::QuantityExceedsLimit(
                    merged,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            self.items[pos]
                .unit_price
                .try_multiply(merged)
                .ok_or(CartError::Overflow)?;
            self.items[pos].quantity = merged;
        } else {
            let item = LineItem::new(product, quantity)?;
            self.items.push(item);
        }

        self.after_change(EventKind::ItemAdded(product.id));
        Ok(())
    }

    /// Remove the line item with the given product id.
    ///
    /// A no-op if the product is not in the cart; double-clicking "remove"
    /// must stay idempotent.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let len_before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        if self.items.len() < len_before {
            self.after_change(EventKind::ItemRemoved(product_id));
        }
    }

    /// Set a line item's quantity.
    ///
    /// A quantity of zero or less means the user wants the item gone and is
    /// equivalent to [`remove_item`](Self::remove_item). Unknown product ids
    /// are a no-op.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove_item(product_id);
            return Ok(());
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CartError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let Some(pos) = self.items.iter().position(|i| i.product_id == product_id) else {
            return Ok(());
        };
        self.items[pos]
            .unit_price
            .try_multiply(quantity)
            .ok_or(CartError::Overflow)?;
        self.items[pos].quantity = quantity;
        self.after_change(EventKind::QuantityChanged(product_id));
        Ok(())
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.after_change(EventKind::Cleared);
    }

    /// Line items in cart order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Check if the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of quantities), recomputed on each call.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals, recomputed on each call.
    pub fn subtotal(&self) -> Result<Money, CartError> {
        let totals = self
            .items
            .iter()
            .map(LineItem::line_total)
            .collect::<Result<Vec<_>, _>>()?;
        Money::try_sum(totals.iter(), Currency::USD).ok_or(CartError::Overflow)
    }

    /// Take a consistent snapshot of items and subtotal.
    pub fn snapshot(&self) -> Result<CartSnapshot, CartError> {
        Ok(CartSnapshot {
            subtotal: self.subtotal()?,
            items: self.items.clone(),
        })
    }

    /// Register an observer called after every state-changing mutation.
    pub fn subscribe(&mut self, observer: impl Fn(&CartEvent) + 'static) -> ObserverId {
        self.next_observer += 1;
        let id = ObserverId(self.next_observer);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a previously registered observer. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let len_before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() < len_before
    }

    fn after_change(&mut self, kind: EventKind) {
        self.persist();
        let event = CartEvent {
            kind,
            item_count: self.item_count(),
        };
        for (_, observer) in &self.observers {
            observer(&event);
        }
    }

    /// Write the full item list through to the persistence slot.
    ///
    /// The in-memory cart is the source of truth; a failed write is logged
    /// and the mutation still succeeds.
    fn persist(&self) {
        if let Err(err) = self.storage.set(CART_STORAGE_KEY, &self.items) {
            warn!(error = %err, "failed to persist cart");
        }
    }
}
