use serde::{Deserialize, Serialize};

use crate::domain::{LineItem, Product};

/// How strictly quantity changes are checked against stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityPolicy {
    /// `add` checks each request against on-hand stock; `+`/`-` adjustments
    /// are not re-validated.
    #[default]
    Lenient,
    /// `add` checks the cumulative cart quantity, and increments are
    /// re-validated against the catalog.
    Strict,
}

/// Commands the presentation layer sends to a cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds `quantity` units of `product`, merging with an existing line.
    Add { product: Product, quantity: u32 },
    /// Adjusts the line at `index` by a signed `delta`; a result of zero or
    /// less removes the line.
    ChangeQuantity { index: usize, delta: i64 },
    /// Removes the line at `index` unconditionally.
    Remove { index: usize },
    Clear,
}

/// Outcome of a successfully applied CartAction.
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    Added { index: usize, quantity: u32 },
    /// The line is still present with the new quantity.
    QuantityChanged { index: usize, quantity: u32 },
    /// The line left the cart, either explicitly or because its quantity hit zero.
    Removed(LineItem),
    Cleared,
}
