use chrono::{DateTime, Utc};
use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::BackendClient;
use crate::alerts::{LowStockWarning, StockAlertEvaluator};
use crate::cart::Cart;
use crate::catalog::CatalogCache;
use crate::domain::{CashierId, LineItem, SaleReceipt, SaleSubmission};
use crate::error::{BackendError, CheckoutError};
use crate::pricing::{compute_totals, Rates, Totals};

/// Outcome of a sale the backend accepted.
#[derive(Debug, Clone)]
pub struct CompletedSale {
    pub receipt: SaleReceipt,
    /// Cart lines as they were submitted.
    pub lines: Vec<LineItem>,
    /// Amounts to show: the backend's where it reported them, otherwise the
    /// local computation over `lines`, rounded.
    pub totals: Totals,
    /// Low-stock products in the refreshed catalog. Empty when the refresh failed.
    pub low_stock: Vec<LowStockWarning>,
    /// Set when the post-sale catalog refresh failed. The sale itself still stands.
    pub refresh_error: Option<BackendError>,
    pub completed_at: DateTime<Utc>,
}

impl CompletedSale {
    pub fn catalog_refreshed(&self) -> bool {
        self.refresh_error.is_none()
    }
}

/// Turns a cart into a committed sale and reconciles the catalog afterwards.
///
/// Validates the cart, submits it, then clears it and reloads the catalog,
/// since only the backend knows post-sale stock when several terminals sell
/// at once.
#[derive(Clone, Debug)]
pub struct CheckoutCoordinator {
    backend: BackendClient,
    rates: Rates,
}

impl CheckoutCoordinator {
    pub fn new(backend: BackendClient, rates: Rates) -> Self {
        Self { backend, rates }
    }

    pub fn rates(&self) -> &Rates {
        &self.rates
    }

    /// Submits the cart as a sale by `cashier_id`.
    ///
    /// # Errors
    /// `EmptyCart` without contacting the backend; `Submission` when the
    /// backend rejects or cannot be reached, with cart and catalog untouched.
    #[instrument(fields(cashier_id = %cashier_id, lines = cart.len()), skip(self, cart, catalog, cashier_id))]
    pub async fn submit(
        &self,
        cart: &mut Cart,
        catalog: &mut CatalogCache,
        cashier_id: CashierId,
    ) -> Result<CompletedSale, CheckoutError> {
        // Step 1: Validate cart
        if cart.is_empty() {
            warn!("Checkout attempted with an empty cart");
            return Err(CheckoutError::EmptyCart);
        }

        // Step 2: Snapshot before the first suspension point
        let submission = SaleSubmission::from_cart(cart.items(), cashier_id, &self.rates);
        let lines = cart.items().to_vec();

        // Step 3: Submit
        let receipt = match self.backend.submit_sale(submission).await {
            Ok(receipt) => receipt,
            Err(e) => {
                error!(error = %e, "Sale submission failed");
                return Err(CheckoutError::Submission { reason: e.to_string() });
            }
        };
        let totals = receipt.totals_or(&compute_totals(&lines, &self.rates)).rounded();
        if !receipt.has_server_totals() {
            debug!("Backend reported no totals; using local computation");
        }
        info!(transaction_id = %receipt.transaction_id, total = %totals.total, "Sale completed");
        cart.clear();

        // Step 4: Reconcile catalog; the sale is committed whatever happens here
        let (low_stock, refresh_error) = match self.backend.fetch_catalog().await {
            Ok(products) => {
                catalog.replace(products);
                let warnings: Vec<LowStockWarning> =
                    StockAlertEvaluator::evaluate(catalog.products()).into_iter().collect();
                for warning in &warnings {
                    warn!(
                        product_id = %warning.product_id,
                        on_hand = warning.on_hand_quantity,
                        threshold = warning.reorder_threshold,
                        "Low stock"
                    );
                }
                (warnings, None)
            }
            Err(e) => {
                warn!(error = %e, "Catalog refresh after sale failed; keeping previous catalog");
                (Vec::new(), Some(e))
            }
        };

        Ok(CompletedSale {
            receipt,
            lines,
            totals,
            low_stock,
            refresh_error,
            completed_at: Utc::now(),
        })
    }
}
