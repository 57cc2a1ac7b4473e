//! Newtype IDs for type-safe identifiers.
//!
//! The storefront API assigns serial integer ids; the newtypes prevent
//! accidentally mixing them up, e.g. passing a `UserId` where a `ProductId`
//! is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs over `i64`.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create an ID from its integer value.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the integer value.
            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a catalog product.
    ProductId
);
define_id!(
    /// Identifier of a placed order, assigned by the server.
    OrderId
);
define_id!(
    /// Identifier of a registered user.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new(123);
        assert_eq!(id.value(), 123);
    }

    #[test]
    fn test_id_from_i64() {
        let id: ProductId = 456.into();
        assert_eq!(id.value(), 456);
        assert_eq!(i64::from(id), 456);
    }

    #[test]
    fn test_id_display() {
        let id = OrderId::new(789);
        assert_eq!(format!("{}", id), "789");
    }

    #[test]
    fn test_id_equality() {
        assert_eq!(ProductId::new(1), ProductId::new(1));
        assert_ne!(ProductId::new(1), ProductId::new(2));
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = ProductId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");

        let parsed: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, id);
    }
}
