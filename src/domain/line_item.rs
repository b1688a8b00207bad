use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Product, ProductId};

/// One product-and-quantity entry in a cart.
///
/// `unit_price_snapshot` is captured when the product is first added and is
/// never re-read from the catalog, so a refresh that reprices a product does
/// not change a cart that is already being rung up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price_snapshot: Decimal,
    pub quantity: u32,
}

impl LineItem {
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price_snapshot: product.unit_price,
            quantity,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price_snapshot * Decimal::from(self.quantity)
    }
}
