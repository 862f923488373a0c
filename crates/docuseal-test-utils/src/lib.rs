//! Shared test utilities for the docuseal-mcp workspace.
//!
//! [`MockTransport`] stands in for the network: it records every
//! [`HttpRequest`] the client sends and answers from a queue of canned
//! responses. Dev-dependency only, never published.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use docuseal_api::{Config, DocusealClient, Error, HttpRequest, HttpResponse, Result, Transport};
use serde_json::Value;

/// Base URL used by [`client_with_key`] and [`client_without_key`]
pub const TEST_BASE_URL: &str = "https://docuseal.test";

/// API key used by [`client_with_key`]
pub const TEST_API_KEY: &str = "test-api-key";

/// Recording transport with scripted responses.
///
/// When the queue is empty it answers `200 {}`.
#[derive(Debug, Default)]
pub struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse>>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a JSON response with the given status
    pub fn respond_json(&self, status: u16, body: Value) {
        self.respond_raw(status, body.to_string());
    }

    /// Queue a response with a raw body
    pub fn respond_raw(&self, status: u16, body: impl Into<String>) {
        self.lock_responses()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queue a transport-level failure
    pub fn fail(&self, message: impl Into<String>) {
        self.lock_responses()
            .push_back(Err(Error::Transport(message.into())));
    }

    /// Every request sent so far, in order
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of requests sent so far
    pub fn call_count(&self) -> usize {
        self.requests().len()
    }

    /// The only request sent; panics unless exactly one was made
    pub fn single_request(&self) -> HttpRequest {
        let mut requests = self.requests();
        assert_eq!(
            requests.len(),
            1,
            "expected exactly one outbound request, got {requests:?}"
        );
        requests.remove(0)
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<HttpResponse>>> {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        self.lock_responses()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "{}")))
    }
}

/// Client with [`TEST_API_KEY`] configured, backed by `transport`
pub fn client_with_key(transport: Arc<MockTransport>) -> DocusealClient {
    DocusealClient::new(
        Config::new(TEST_BASE_URL).with_api_key(TEST_API_KEY),
        transport,
    )
}

/// Client with no API key configured, backed by `transport`
pub fn client_without_key(transport: Arc<MockTransport>) -> DocusealClient {
    DocusealClient::new(Config::new(TEST_BASE_URL), transport)
}
