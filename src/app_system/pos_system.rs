use tracing::{error, info};

use super::config::PosConfig;
use super::session::PosSession;
use crate::actor_framework::{Backend, BackendActor, BackendClient};
use crate::error::ConfigError;
use crate::transport::{ApiTransport, HttpBackend, TokenStore};

/// The running terminal: the backend actor plus the configuration sessions
/// are created from.
///
/// Must be created inside a tokio runtime.
pub struct PosSystem {
    config: PosConfig,
    backend_client: BackendClient,
    tokens: TokenStore,
    handle: tokio::task::JoinHandle<()>,
}

impl PosSystem {
    /// Starts a system talking to the REST backend described by `config`.
    pub fn new(config: PosConfig) -> Result<Self, ConfigError> {
        let tokens = TokenStore::new(config.api_token.clone());
        let transport = ApiTransport::new(config.api_base_url.clone(), tokens.clone(), config.request_timeout)?;
        let backend = HttpBackend::new(transport, config.endpoints.clone());
        Ok(Self::with_backend(config, backend, tokens))
    }

    /// Starts a system on any [`Backend`] implementation.
    pub fn with_backend(config: PosConfig, backend: impl Backend, tokens: TokenStore) -> Self {
        info!(api = %config.api_base_url, "Starting POS system");
        let (actor, backend_client) = BackendActor::new(config.channel_buffer, backend);
        let handle = tokio::spawn(actor.run());

        Self {
            config,
            backend_client,
            tokens,
            handle,
        }
    }

    pub fn config(&self) -> &PosConfig {
        &self.config
    }

    /// Token slot shared with the transport; set it on login, clear on logout.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Opens a session for the configured cashier.
    pub fn session(&self) -> PosSession {
        PosSession::new(
            self.backend_client.clone(),
            self.config.rates,
            self.config.quantity_policy,
            self.config.cashier_id,
        )
    }

    /// Stops the backend actor. Sessions hold client handles, so drop them
    /// first or this waits for them.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.backend_client);

        if let Err(e) = self.handle.await {
            error!("Backend actor task failed: {:?}", e);
            return Err(format!("Backend actor task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
