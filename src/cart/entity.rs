use tracing::debug;

use super::actions::{CartAction, CartActionResult, QuantityPolicy};
use crate::catalog::CatalogCache;
use crate::domain::{LineItem, Product};
use crate::error::CartError;

/// An ordered collection of line items, in the order they were rung up.
///
/// No two lines share a product id: adding a product that is already in the
/// cart grows its line in place. A line never stays in the cart with a
/// quantity of zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    policy: QuantityPolicy,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: QuantityPolicy) -> Self {
        Self {
            items: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> QuantityPolicy {
        self.policy
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` units of `product` and returns the index of its line.
    ///
    /// # Errors
    /// `InvalidQuantity` for a zero quantity, `InsufficientStock` when the
    /// product cannot cover the request. The cart is untouched on error.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<usize, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }

        let existing = self.items.iter().position(|item| item.product_id == product.id);
        let already_in_cart = match (self.policy, existing) {
            (QuantityPolicy::Strict, Some(index)) => self.items[index].quantity,
            _ => 0,
        };
        let available = product.on_hand_quantity.saturating_sub(already_in_cart);
        if quantity > available {
            return Err(CartError::InsufficientStock {
                requested: quantity,
                available,
            });
        }

        match existing {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item
                    .quantity
                    .checked_add(quantity)
                    .ok_or(CartError::InvalidQuantity(i64::from(quantity)))?;
                debug!(product_id = %product.id, quantity = item.quantity, "Merged into existing line");
                Ok(index)
            }
            None => {
                self.items.push(LineItem::from_product(product, quantity));
                debug!(product_id = %product.id, quantity, "Appended new line");
                Ok(self.items.len() - 1)
            }
        }
    }

    /// Adjusts the line at `index` by `delta` without consulting stock.
    ///
    /// Returns the new quantity, or `None` when the line was removed because
    /// it dropped to zero or below (later lines shift down by one).
    pub fn change_quantity(&mut self, index: usize, delta: i64) -> Result<Option<u32>, CartError> {
        let current = self.line(index)?.quantity;
        let next = i64::from(current)
            .checked_add(delta)
            .ok_or(CartError::InvalidQuantity(delta))?;

        if next <= 0 {
            self.items.remove(index);
            return Ok(None);
        }

        let next = u32::try_from(next).map_err(|_| CartError::InvalidQuantity(next))?;
        self.items[index].quantity = next;
        Ok(Some(next))
    }

    /// Like [`Cart::change_quantity`], but an increase must still be covered
    /// by the product's on-hand quantity in `catalog`. A product that has
    /// disappeared from the catalog counts as out of stock.
    pub fn change_quantity_checked(
        &mut self,
        index: usize,
        delta: i64,
        catalog: &CatalogCache,
    ) -> Result<Option<u32>, CartError> {
        let line = self.line(index)?;
        if delta > 0 {
            let available = catalog
                .get(line.product_id)
                .map_or(0, |product| product.on_hand_quantity);
            let requested = i64::from(line.quantity)
                .checked_add(delta)
                .ok_or(CartError::InvalidQuantity(delta))?;
            if requested > i64::from(available) {
                return Err(CartError::InsufficientStock {
                    requested: u32::try_from(requested).unwrap_or(u32::MAX),
                    available,
                });
            }
        }
        self.change_quantity(index, delta)
    }

    pub fn remove(&mut self, index: usize) -> Result<LineItem, CartError> {
        self.line(index)?;
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Applies a UI command. Quantity changes follow the cart's policy.
    pub fn apply(&mut self, action: CartAction, catalog: &CatalogCache) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::Add { product, quantity } => {
                let index = self.add(&product, quantity)?;
                Ok(CartActionResult::Added {
                    index,
                    quantity: self.items[index].quantity,
                })
            }
            CartAction::ChangeQuantity { index, delta } => {
                let before = self.line(index)?.clone();
                let changed = match self.policy {
                    QuantityPolicy::Lenient => self.change_quantity(index, delta)?,
                    QuantityPolicy::Strict => self.change_quantity_checked(index, delta, catalog)?,
                };
                Ok(match changed {
                    Some(quantity) => CartActionResult::QuantityChanged { index, quantity },
                    None => CartActionResult::Removed(before),
                })
            }
            CartAction::Remove { index } => self.remove(index).map(CartActionResult::Removed),
            CartAction::Clear => {
                self.clear();
                Ok(CartActionResult::Cleared)
            }
        }
    }

    fn line(&self, index: usize) -> Result<&LineItem, CartError> {
        self.items.get(index).ok_or(CartError::NoSuchLine {
            index,
            len: self.items.len(),
        })
    }
}
