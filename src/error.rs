use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::ProductId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
    #[error("No cart line at index {index} (cart has {len} lines)")]
    NoSuchLine { index: usize, len: usize },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    #[error("{name} must be between 0 and 1, got {value}")]
    RateOutOfRange { name: &'static str, value: Decimal },
}

/// Errors raised while talking to the inventory backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    #[error("Not found")]
    NotFound,
    #[error("Unauthorized: token missing or expired")]
    Unauthorized,
    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Could not decode response: {0}")]
    Decode(String),
    #[error("Backend actor closed")]
    ActorClosed,
    #[error("Backend actor dropped the request")]
    ActorDropped,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Sale submission failed: {reason}")]
    Submission { reason: String },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("Product not found: {0}")]
    UnknownProduct(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error(transparent)]
    Rate(#[from] PricingError),
    #[error("HTTP client could not be built: {0}")]
    HttpClient(String),
}

impl SessionError {
    pub fn unknown_product(id: ProductId) -> Self {
        SessionError::UnknownProduct(id.to_string())
    }
}
