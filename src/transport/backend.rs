use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::http::ApiTransport;
use crate::actor_framework::Backend;
use crate::domain::{Product, SaleReceipt, SaleSubmission};
use crate::error::BackendError;

/// Endpoint paths of the inventory backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    pub product_search: String,
    pub inventory: String,
    pub sales: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            product_search: "/products/search".to_string(),
            inventory: "/inventory/".to_string(),
            sales: "/sales/".to_string(),
        }
    }
}

/// [`Backend`] over the REST API.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    transport: ApiTransport,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(transport: ApiTransport, endpoints: Endpoints) -> Self {
        Self { transport, endpoints }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(skip(self))]
    async fn fetch_product(&self, name: &str) -> Result<Option<Product>, BackendError> {
        match self
            .transport
            .get_with_query::<Product, _>(&self.endpoints.product_search, &[("name", name)])
            .await
        {
            Ok(product) => Ok(Some(product)),
            Err(BackendError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    async fn fetch_catalog(&self) -> Result<Vec<Product>, BackendError> {
        self.transport.get(&self.endpoints.inventory).await
    }

    #[instrument(fields(cashier_id = %submission.cashier_id, lines = submission.items.len()), skip(self, submission))]
    async fn submit_sale(&self, submission: &SaleSubmission) -> Result<SaleReceipt, BackendError> {
        let receipt: SaleReceipt = self.transport.post(&self.endpoints.sales, submission).await?;
        info!(transaction_id = %receipt.transaction_id, "Sale accepted by backend");
        Ok(receipt)
    }
}
