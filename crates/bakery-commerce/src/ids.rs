//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a ProductId where a LineItemId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check whether the ID is empty or whitespace.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identity of a purchasable configuration (product plus variant).
    LineItemId
);
define_id!(
    /// Identity of the product before any variant is chosen.
    ProductId
);

impl LineItemId {
    /// Compose the id of a product/variant combination, e.g. `cake-1-vanilla`.
    pub fn for_variant(product_id: &ProductId, variant: &str) -> Self {
        Self(format!("{}-{}", product_id, variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ProductId::new("cake-1");
        assert_eq!(id.as_str(), "cake-1");
    }

    #[test]
    fn test_id_from_string() {
        let id: LineItemId = "cake-1-vanilla".into();
        assert_eq!(id.as_str(), "cake-1-vanilla");
    }

    #[test]
    fn test_variant_id() {
        let id = LineItemId::for_variant(&ProductId::new("cake-1"), "vanilla");
        assert_eq!(id, LineItemId::new("cake-1-vanilla"));
    }

    #[test]
    fn test_blank() {
        assert!(LineItemId::new("  ").is_blank());
        assert!(!LineItemId::new("x").is_blank());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&LineItemId::new("bun")).unwrap();
        assert_eq!(json, r#""bun""#);
    }
}
