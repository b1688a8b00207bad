//! # Mock Framework
//!
//! Utilities for testing code that talks to the backend, without a backend.
//!
//! Use [`create_mock_client`] to get a client and a receiver. Then use helpers
//! like [`expect_submit_sale`] or [`expect_fetch_catalog`] to assert what was
//! sent and script the reply.

use crate::actor_framework::{BackendClient, BackendRequest, Response};
use crate::domain::{Product, SaleReceipt, SaleSubmission};
use tokio::sync::mpsc;

/// Creates a mock client and a receiver for asserting requests.
///
/// Every request the code under test makes arrives on the receiver, so tests
/// decide the backend's answer (success, error, delay) and can check that no
/// further requests were made.
pub fn create_mock_client(buffer_size: usize) -> (BackendClient, mpsc::Receiver<BackendRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (BackendClient::new(sender), receiver)
}

/// Helper to verify that the next message is a FetchProduct request
pub async fn expect_fetch_product(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(String, Response<Option<Product>>)> {
    match receiver.recv().await {
        Some(BackendRequest::FetchProduct { name, respond_to }) => Some((name, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a FetchCatalog request
pub async fn expect_fetch_catalog(receiver: &mut mpsc::Receiver<BackendRequest>) -> Option<Response<Vec<Product>>> {
    match receiver.recv().await {
        Some(BackendRequest::FetchCatalog { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a SubmitSale request
pub async fn expect_submit_sale(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(SaleSubmission, Response<SaleReceipt>)> {
    match receiver.recv().await {
        Some(BackendRequest::SubmitSale { submission, respond_to }) => Some((submission, respond_to)),
        _ => None,
    }
}

/// True when no request is waiting on the receiver.
pub fn no_pending_requests(receiver: &mut mpsc::Receiver<BackendRequest>) -> bool {
    receiver.try_recv().is_err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let lookup = tokio::spawn(async move { client.fetch_product("Flour".to_string()).await });

        let (name, responder) = expect_fetch_product(&mut receiver).await.expect("Expected FetchProduct request");
        assert_eq!(name, "Flour");
        responder.send(Ok(Some(Product::new(3, "Flour", dec!(1.20), 4)))).unwrap();

        let result = lookup.await.unwrap().unwrap();
        assert_eq!(result.map(|p| p.id.0), Some(3));
        assert!(no_pending_requests(&mut receiver));
    }
}
