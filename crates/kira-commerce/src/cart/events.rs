//! Cart change notifications.
//!
//! The store notifies registered observers after every state-changing
//! mutation, so a UI layer can re-render badges and totals without polling.
//! The mechanism is framework-agnostic: an observer is any `Fn(&CartEvent)`.

use crate::ids::ProductId;

/// Handle returned by `CartStore::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// What changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A product was added (or merged into an existing line item).
    ItemAdded(ProductId),
    /// A line item was removed.
    ItemRemoved(ProductId),
    /// A line item's quantity was set to a new value.
    QuantityChanged(ProductId),
    /// The whole cart was emptied.
    Cleared,
}

/// A change notification delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartEvent {
    /// What changed.
    pub kind: EventKind,
    /// Total item count after the change (sum of quantities).
    pub item_count: i64,
}
