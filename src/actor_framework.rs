use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::domain::{Product, SaleReceipt, SaleSubmission};
use crate::error::BackendError;

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Remote inventory source of truth, as seen by the checkout core.
///
/// Implementations own the transport; token handling and expiry belong to
/// them, not to the callers.
#[async_trait]
pub trait Backend: Send + Sync + 'static {
    /// Looks a product up by name. `Ok(None)` when the backend has no match.
    async fn fetch_product(&self, name: &str) -> Result<Option<Product>, BackendError>;

    /// Full inventory listing.
    async fn fetch_catalog(&self) -> Result<Vec<Product>, BackendError>;

    async fn submit_sale(&self, submission: &SaleSubmission) -> Result<SaleReceipt, BackendError>;
}

// =============================================================================
// 2. THE MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, BackendError>>;

#[derive(Debug)]
pub enum BackendRequest {
    FetchProduct {
        name: String,
        respond_to: Response<Option<Product>>,
    },
    FetchCatalog {
        respond_to: Response<Vec<Product>>,
    },
    SubmitSale {
        submission: SaleSubmission,
        respond_to: Response<SaleReceipt>,
    },
}

// =============================================================================
// 3. THE ACTOR
// =============================================================================

/// Serves [`BackendRequest`]s one at a time against a [`Backend`].
///
/// Stops when every [`BackendClient`] has been dropped.
pub struct BackendActor<B: Backend> {
    receiver: mpsc::Receiver<BackendRequest>,
    backend: B,
}

impl<B: Backend> BackendActor<B> {
    pub fn new(buffer_size: usize, backend: B) -> (Self, BackendClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, backend };
        (actor, BackendClient::new(sender))
    }

    #[instrument(name = "backend_actor", skip(self))]
    pub async fn run(mut self) {
        info!("BackendActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                BackendRequest::FetchProduct { name, respond_to } => {
                    let result = self.backend.fetch_product(&name).await;
                    reply(respond_to, result);
                }
                BackendRequest::FetchCatalog { respond_to } => {
                    let result = self.backend.fetch_catalog().await;
                    if let Ok(products) = &result {
                        debug!(count = products.len(), "Catalog fetched");
                    }
                    reply(respond_to, result);
                }
                BackendRequest::SubmitSale { submission, respond_to } => {
                    let result = self.backend.submit_sale(&submission).await;
                    reply(respond_to, result);
                }
            }
        }
        info!("BackendActor stopped");
    }
}

fn reply<T>(respond_to: Response<T>, result: Result<T, BackendError>) {
    if respond_to.send(result).is_err() {
        warn!("Requester went away before the backend answered");
    }
}

// =============================================================================
// 4. THE CLIENT
// =============================================================================

/// Cloneable handle for sending requests to the [`BackendActor`].
#[derive(Clone, Debug)]
pub struct BackendClient {
    sender: mpsc::Sender<BackendRequest>,
}

/// Generates a client method: one request message, one oneshot reply.
macro_rules! backend_method {
    (fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $variant:ident) => {
        #[instrument(skip_all)]
        pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, BackendError> {
            debug!("Sending request");
            let (respond_to, response) = oneshot::channel();
            self.sender
                .send(BackendRequest::$variant { $($param,)* respond_to })
                .await
                .map_err(|_| BackendError::ActorClosed)?;
            response.await.map_err(|_| BackendError::ActorDropped)?
        }
    };
}

impl BackendClient {
    pub fn new(sender: mpsc::Sender<BackendRequest>) -> Self {
        Self { sender }
    }

    backend_method!(fn fetch_product(name: String) -> Option<Product> as FetchProduct);
    backend_method!(fn fetch_catalog() -> Vec<Product> as FetchCatalog);
    backend_method!(fn submit_sale(submission: SaleSubmission) -> SaleReceipt as SubmitSale);
}

// =============================================================================
// 5. TESTS
// =============================================================================
