//! # pos-checkout
//!
//! Checkout core of a point-of-sale terminal: a line-item cart, its pricing,
//! submission of the sale to the inventory backend, and low-stock warnings
//! from the catalog the backend reports after the sale.
//!
//! ## Layout
//!
//! - **Domain types** - plain data shared by every component → [`domain`]
//! - **Cart** - line items and the commands that edit them → [`cart::Cart`]
//! - **Pricing** - subtotal, tax, discount, total → [`pricing::compute_totals`]
//! - **Catalog** - the cached inventory listing → [`catalog::CatalogCache`]
//! - **Backend actor** - the one task that talks to the backend, reached
//!   through a cloneable client → [`actor_framework::BackendClient`]
//! - **Checkout** - submit and reconcile → [`clients::CheckoutCoordinator`]
//! - **Alerts** - low-stock scan → [`alerts::StockAlertEvaluator`]
//! - **System** - wiring, sessions, config, tracing → [`app_system`]
//!
//! ## Example Usage
//!
//! ```no_run
//! use pos_checkout::app_system::{PosConfig, PosSystem};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let system = PosSystem::new(PosConfig::from_env()?)?;
//! let mut session = system.session();
//!
//! session.refresh_catalog().await?;
//! session.add_by_name("Rice 5kg", 2).await?;
//! let sale = session.submit().await?;
//! println!("Sold: {}", sale.receipt.transaction_id);
//!
//! drop(session);
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod alerts;
pub mod app_system;
pub mod cart;
pub mod catalog;
pub mod clients;
pub mod domain;
pub mod error;
pub mod pricing;
pub mod receipt;
pub mod transport;

#[cfg(test)]
mod mock_framework;
