use tracing::{debug, info, instrument};

use crate::actor_framework::BackendClient;
use crate::cart::{Cart, CartAction, CartActionResult, QuantityPolicy};
use crate::catalog::CatalogCache;
use crate::clients::{CheckoutCoordinator, CompletedSale};
use crate::domain::{CashierId, LineItem, Product, ProductId};
use crate::error::SessionError;
use crate::pricing::{compute_totals, Rates, Totals};

/// One cashier's working state: a cart and the catalog it is validated
/// against.
///
/// Created when the cashier starts, reset on logout. The UI drives it through
/// the named operations below and renders whatever they return.
#[derive(Debug)]
pub struct PosSession {
    cart: Cart,
    catalog: CatalogCache,
    backend: BackendClient,
    checkout: CheckoutCoordinator,
    cashier_id: CashierId,
}

impl PosSession {
    pub fn new(backend: BackendClient, rates: Rates, policy: QuantityPolicy, cashier_id: CashierId) -> Self {
        Self {
            cart: Cart::with_policy(policy),
            catalog: CatalogCache::new(),
            checkout: CheckoutCoordinator::new(backend.clone(), rates),
            backend,
            cashier_id,
        }
    }

    pub fn cashier_id(&self) -> CashierId {
        self.cashier_id
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    pub fn totals(&self) -> Totals {
        compute_totals(self.cart.items(), self.checkout.rates())
    }

    /// Catalog products whose name contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.catalog.search(query).collect()
    }

    /// Replaces the catalog with the backend's current listing.
    #[instrument(skip(self))]
    pub async fn refresh_catalog(&mut self) -> Result<usize, SessionError> {
        let products = self.backend.fetch_catalog().await?;
        let count = products.len();
        self.catalog.replace(products);
        info!(count, "Catalog refreshed");
        Ok(count)
    }

    /// Adds a product from the cached catalog.
    pub fn add_product(&mut self, product_id: ProductId, quantity: u32) -> Result<CartActionResult, SessionError> {
        let product = self
            .catalog
            .get(product_id)
            .cloned()
            .ok_or_else(|| SessionError::unknown_product(product_id))?;
        self.dispatch(CartAction::Add { product, quantity })
    }

    /// Looks the product up on the backend by name, then adds it. The stock
    /// check uses the freshly fetched quantity.
    #[instrument(skip(self))]
    pub async fn add_by_name(&mut self, name: &str, quantity: u32) -> Result<CartActionResult, SessionError> {
        let product = self
            .backend
            .fetch_product(name.to_string())
            .await?
            .ok_or_else(|| SessionError::UnknownProduct(name.to_string()))?;
        debug!(product_id = %product.id, on_hand = product.on_hand_quantity, "Product found");
        self.dispatch(CartAction::Add { product, quantity })
    }

    pub fn change_quantity(&mut self, index: usize, delta: i64) -> Result<CartActionResult, SessionError> {
        self.dispatch(CartAction::ChangeQuantity { index, delta })
    }

    pub fn remove(&mut self, index: usize) -> Result<CartActionResult, SessionError> {
        self.dispatch(CartAction::Remove { index })
    }

    pub fn dispatch(&mut self, action: CartAction) -> Result<CartActionResult, SessionError> {
        Ok(self.cart.apply(action, &self.catalog)?)
    }

    /// Checks out the current cart.
    pub async fn submit(&mut self) -> Result<CompletedSale, SessionError> {
        let sale = self
            .checkout
            .submit(&mut self.cart, &mut self.catalog, self.cashier_id)
            .await?;
        Ok(sale)
    }

    /// Logout: forget the cart and the catalog.
    pub fn reset(&mut self) {
        info!(cashier_id = %self.cashier_id, "Session reset");
        self.cart.clear();
        self.catalog.clear();
    }
}
