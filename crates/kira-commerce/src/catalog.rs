//! Catalog display types.
//!
//! The catalog itself lives behind the products API; this module only models
//! what the client sees. The cart copies a product's display fields at
//! add-time, so a later catalog edit does not rewrite carts.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product as served by the products API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Unit price in whole currency units, as the API serves it.
    pub price: f64,
    /// Image location for display.
    pub image_url: String,
    /// Category name.
    pub category: String,
    /// Whether the product is currently purchasable.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Units the catalog reports on hand.
    #[serde(default)]
    pub quantity: i64,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// The unit price as [`Money`]. Catalog prices are USD.
    pub fn unit_price(&self) -> Money {
        Money::from_decimal(self.price, Currency::USD)
    }
}
