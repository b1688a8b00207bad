//! Low-stock detection over a catalog snapshot.

use serde::Serialize;

use crate::domain::{Product, ProductId};

/// A product whose stock is at or below its reorder threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowStockWarning {
    /// Position of the product in the scanned catalog.
    pub catalog_index: usize,
    pub product_id: ProductId,
    pub name: String,
    pub on_hand_quantity: u32,
    pub reorder_threshold: u32,
}

impl LowStockWarning {
    fn from_product(catalog_index: usize, product: &Product) -> Self {
        Self {
            catalog_index,
            product_id: product.id,
            name: product.name.clone(),
            on_hand_quantity: product.on_hand_quantity,
            reorder_threshold: product.reorder_threshold,
        }
    }
}

pub struct StockAlertEvaluator;

impl StockAlertEvaluator {
    /// Scans `catalog` for low-stock products.
    ///
    /// Nothing is computed until the returned scan is iterated, and it can be
    /// iterated any number of times.
    pub fn evaluate(catalog: &[Product]) -> LowStockScan<'_> {
        LowStockScan { catalog }
    }
}

/// Lazy, restartable sequence of [`LowStockWarning`]s in catalog order.
#[derive(Debug, Clone, Copy)]
pub struct LowStockScan<'a> {
    catalog: &'a [Product],
}

impl<'a> LowStockScan<'a> {
    pub fn iter(&self) -> impl Iterator<Item = LowStockWarning> + 'a {
        self.catalog
            .iter()
            .enumerate()
            .filter(|(_, product)| product.is_low_stock())
            .map(|(index, product)| LowStockWarning::from_product(index, product))
    }

    pub fn is_empty(&self) -> bool {
        !self.catalog.iter().any(Product::is_low_stock)
    }

    /// See [`consolidated_message`].
    pub fn consolidated_message(&self) -> Option<String> {
        consolidated_message(&self.iter().collect::<Vec<_>>())
    }
}

/// Single alert text covering every warning, or `None` when there are none.
pub fn consolidated_message(warnings: &[LowStockWarning]) -> Option<String> {
    if warnings.is_empty() {
        return None;
    }
    let lines: Vec<String> = warnings
        .iter()
        .map(|w| format!("{} (Qty: {})", w.name, w.on_hand_quantity))
        .collect();
    Some(format!("LOW STOCK ALERT:\n\n{}", lines.join("\n")))
}

impl<'a> IntoIterator for LowStockScan<'a> {
    type Item = LowStockWarning;
    type IntoIter = Box<dyn Iterator<Item = LowStockWarning> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
