//! # Mock Transport & Testing Guide
//!
//! `MockTransport` implements [`HttpTransport`] entirely in memory. You queue
//! the responses the provider API should give, hand the transport to the code
//! under test, and then check that every expectation was consumed.
//!
//! ## When to use the mock vs a real endpoint
//!
//! | Feature | MockTransport | ReqwestTransport |
//! |---------|---------------|------------------|
//! | **Speed** | Instant (in-memory) | Network bound |
//! | **Determinism** | 100% Deterministic | Subject to the provider |
//! | **Failure injection** | Easy (`return_err`, `return_status`) | Hard |
//! | **Use Case** | Unit and pipeline tests | Running the relay |
//!
//! ## Example
//!
//! ```rust
//! use order_relay::clients::{ApiClient, MenuClient};
//! use order_relay::framework::mock::MockTransport;
//! use order_relay::framework::RetryPolicy;
//!
//! #[tokio::main]
//! async fn main() {
//!     // 1. Queue the responses
//!     let mut mock = MockTransport::new();
//!     mock.expect_get("menu")
//!         .return_json(200, &serde_json::json!({"dishes": [{"name": "Pizza", "id": 7}]}));
//!
//!     // 2. Inject the mock
//!     let api = ApiClient::new("http://api.test", mock.transport()).with_retry(RetryPolicy::none());
//!     let menu = MenuClient::new(api, "missing.json");
//!
//!     // 3. Exercise the code
//!     let resolved = menu.resolve_menu().await.unwrap();
//!     assert_eq!(resolved.index.len(), 1);
//!
//!     // 4. Verify every expectation was met
//!     mock.verify();
//! }
//! ```
//!
//! Requests are matched in FIFO order. A request whose method or URL does not
//! match the next expectation panics, as does a request arriving after the
//! queue is drained.

use crate::framework::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One queued request/response pair.
struct Expectation {
    method: Method,
    endpoint: String,
    response: Result<HttpResponse, TransportError>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    requests: Vec<HttpRequest>,
}

/// An in-memory [`HttpTransport`] with expectation tracking.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the transport to inject into clients.
    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        Arc::new(self.clone())
    }

    /// Expects a `GET` whose URL ends with `endpoint`.
    pub fn expect_get(&mut self, endpoint: &str) -> ResponseBuilder {
        self.expect(Method::Get, endpoint)
    }

    /// Expects a `POST` whose URL ends with `endpoint`.
    pub fn expect_post(&mut self, endpoint: &str) -> ResponseBuilder {
        self.expect(Method::Post, endpoint)
    }

    fn expect(&mut self, method: Method, endpoint: &str) -> ResponseBuilder {
        ResponseBuilder {
            method,
            endpoint: endpoint.to_string(),
            state: self.state.clone(),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock().unwrap();
        let expectation = match state.expectations.pop_front() {
            Some(expectation) => expectation,
            None => panic!("Unexpected request: {} {}", request.method, request.url),
        };
        if expectation.method != request.method || !request.url.ends_with(&expectation.endpoint) {
            panic!(
                "Expectation mismatch: expected {} .../{}, got {} {}",
                expectation.method, expectation.endpoint, request.method, request.url
            );
        }
        state.requests.push(request);
        expectation.response
    }
}

/// Builder that completes an expectation with its response.
pub struct ResponseBuilder {
    method: Method,
    endpoint: String,
    state: Arc<Mutex<MockState>>,
}

impl ResponseBuilder {
    /// Responds with `status` and a serialized JSON body.
    pub fn return_json(self, status: u16, body: &serde_json::Value) {
        let body = serde_json::to_vec(body).unwrap();
        self.push(Ok(HttpResponse::new(status, body)));
    }

    /// Responds with `status` and a raw body.
    pub fn return_status(self, status: u16, body: &str) {
        self.push(Ok(HttpResponse::new(status, body)));
    }

    /// Fails the request without a response.
    pub fn return_err(self, error: TransportError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<HttpResponse, TransportError>) {
        let mut state = self.state.lock().unwrap();
        state.expectations.push_back(Expectation {
            method: self.method,
            endpoint: self.endpoint,
            response,
        });
    }
}
