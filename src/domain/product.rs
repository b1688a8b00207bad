use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifier of a sellable product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a product in the inventory listing.
///
/// Products are owned by the backend: the terminal only ever replaces its
/// copy wholesale when the catalog is refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(alias = "product_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    #[serde(rename = "qty", alias = "current_quantity")]
    pub on_hand_quantity: u32,
    #[serde(default)]
    pub reorder_threshold: u32,
    #[serde(default)]
    pub category: String,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, unit_price: Decimal, on_hand_quantity: u32) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            unit_price,
            on_hand_quantity,
            reorder_threshold: 0,
            category: String::new(),
        }
    }

    pub fn with_reorder_threshold(mut self, reorder_threshold: u32) -> Self {
        self.reorder_threshold = reorder_threshold;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// True when stock sits at or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.on_hand_quantity <= self.reorder_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_inventory_listing_row() {
        let json = r#"{"id": 7, "name": "Maize Flour 2kg", "category": "Staples",
                       "price": 3.5, "qty": 12, "reorder_threshold": 5}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId(7));
        assert_eq!(product.unit_price, dec!(3.5));
        assert_eq!(product.on_hand_quantity, 12);
        assert_eq!(product.reorder_threshold, 5);
        assert_eq!(product.category, "Staples");
    }

    #[test]
    fn test_deserialize_search_row_with_legacy_names() {
        let json = r#"{"product_id": 3, "name": "Sugar", "price": 1.25, "current_quantity": 0}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId(3));
        assert_eq!(product.on_hand_quantity, 0);
        assert_eq!(product.reorder_threshold, 0);
        assert!(product.category.is_empty());
        assert!(product.is_low_stock());
    }
}
