//! Terminal configuration loaded from environment variables.

use serde::Serialize;
use std::str::FromStr;
use std::time::Duration;

use crate::cart::QuantityPolicy;
use crate::domain::CashierId;
use crate::error::ConfigError;
use crate::pricing::Rates;
use crate::transport::Endpoints;

/// Terminal configuration.
#[derive(Debug, Clone, Serialize)]
pub struct PosConfig {
    /// Base URL of the inventory backend
    pub api_base_url: String,
    /// Bearer token to start the session with, if already logged in
    pub api_token: Option<String>,
    pub rates: Rates,
    pub cashier_id: CashierId,
    pub quantity_policy: QuantityPolicy,
    pub request_timeout: Duration,
    /// Printed at the top of receipts
    pub store_name: String,
    pub endpoints: Endpoints,
    /// Capacity of the backend request channel
    pub channel_buffer: usize,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            api_token: None,
            rates: Rates::default(),
            cashier_id: CashierId(1),
            quantity_policy: QuantityPolicy::Lenient,
            request_timeout: Duration::from_secs(10),
            store_name: "Carol's Distributors".to_string(),
            endpoints: Endpoints::default(),
            channel_buffer: 32,
        }
    }
}

impl PosConfig {
    /// Loads `.env` if present, then reads `POS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Missing keys
    /// fall back to defaults; malformed values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let tax_rate = parse_or(&lookup, "POS_TAX_RATE", defaults.rates.tax_rate())?;
        let discount_rate = parse_or(&lookup, "POS_DISCOUNT_RATE", defaults.rates.discount_rate())?;
        let quantity_policy = match lookup("POS_QUANTITY_POLICY") {
            None => defaults.quantity_policy,
            Some(value) => match value.trim().to_lowercase().as_str() {
                "lenient" => QuantityPolicy::Lenient,
                "strict" => QuantityPolicy::Strict,
                _ => return Err(ConfigError::Invalid { key: "POS_QUANTITY_POLICY", value }),
            },
        };

        Ok(Self {
            api_base_url: lookup("POS_API_URL").unwrap_or(defaults.api_base_url),
            api_token: lookup("POS_API_TOKEN").filter(|t| !t.is_empty()),
            rates: Rates::new(tax_rate, discount_rate)?,
            cashier_id: CashierId(parse_or(&lookup, "POS_CASHIER_ID", defaults.cashier_id.0)?),
            quantity_policy,
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "POS_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            store_name: lookup("POS_STORE_NAME").unwrap_or(defaults.store_name),
            endpoints: Endpoints {
                product_search: lookup("POS_PRODUCT_SEARCH_PATH").unwrap_or(defaults.endpoints.product_search),
                inventory: lookup("POS_INVENTORY_PATH").unwrap_or(defaults.endpoints.inventory),
                sales: lookup("POS_SALES_PATH").unwrap_or(defaults.endpoints.sales),
            },
            channel_buffer: parse_or(&lookup, "POS_CHANNEL_BUFFER", defaults.channel_buffer)?,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
