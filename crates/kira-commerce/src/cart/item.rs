//! Cart line item.

use crate::cart::MAX_QUANTITY_PER_ITEM;
use crate::catalog::Product;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One product entry in the cart.
///
/// Name, price, and image are a display snapshot taken when the product was
/// added; they are not re-fetched from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name at add-time.
    pub name: String,
    /// Unit price at add-time.
    pub unit_price: Money,
    /// Image location at add-time.
    pub image_url: String,
    /// Quantity; always >= 1.
    pub quantity: i64,
}

impl LineItem {
    /// Create a line item from a product's display fields.
    ///
    /// Returns an error if the quantity is not positive, exceeds the
    /// per-item ceiling, or the line total would overflow.
    pub fn new(product: &Product, quantity: i64) -> Result<Self, CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CartError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        let item = Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.unit_price(),
            image_url: product.image_url.clone(),
            quantity,
        };
        item.line_total()?;
        Ok(item)
    }

    /// Total price for this line (`unit_price * quantity`), checked.
    pub fn line_total(&self) -> Result<Money, CartError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CartError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn product() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Rose Soap".to_string(),
            description: "Bar soap".to_string(),
            price: 7.25,
            image_url: "/images/rose-soap.jpg".to_string(),
            category: "bath".to_string(),
            in_stock: true,
            quantity: 50,
        }
    }

    #[test]
    fn test_line_item_snapshots_display_fields() {
        let item = LineItem::new(&product(), 3).unwrap();
        assert_eq!(item.name, "Rose Soap");
        assert_eq!(item.unit_price, Money::new(725, Currency::USD));
        assert_eq!(item.image_url, "/images/rose-soap.jpg");
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::new(&product(), 4).unwrap();
        assert_eq!(item.line_total().unwrap(), Money::new(2900, Currency::USD));
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        assert!(matches!(
            LineItem::new(&product(), 0),
            Err(CartError::InvalidQuantity(0))
        ));
        assert!(matches!(
            LineItem::new(&product(), -2),
            Err(CartError::InvalidQuantity(-2))
        ));
    }

    #[test]
    fn test_rejects_quantity_over_ceiling() {
        let result = LineItem::new(&product(), MAX_QUANTITY_PER_ITEM + 1);
        assert!(matches!(result, Err(CartError::QuantityExceedsLimit(_, _))));
    }
}
