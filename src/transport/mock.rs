//! # Mock Transport
//!
//! In-memory [`Transport`] driven by expectations, for testing stores and clients
//! without a server.
//!
//! | Feature | MockTransport | HttpTransport + wiremock |
//! |---------|---------------|--------------------------|
//! | **Speed** | Instant (in-memory) | Real sockets |
//! | **Ordering control** | `delay()` per response | Hard |
//! | **Use Case** | Store / client semantics | Wire format |
//!
//! Expectations are matched by method and path (plus body or query when given),
//! first match wins, and each one is consumed by a single request. Unmatched
//! requests fail with a `mock_unexpected_request` error and make [`MockTransport::verify`]
//! panic.
//!
//! ```rust
//! use resource_store::transport::{Method, MockTransport, Transport, TransportRequest};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = MockTransport::new();
//!     transport
//!         .expect_get("/wc/v3/products/tags/3")
//!         .return_ok(json!({ "id": 3, "name": "sale" }));
//!
//!     let response = transport
//!         .send(TransportRequest::new(Method::Get, "/wc/v3/products/tags/3"))
//!         .await
//!         .unwrap();
//!     assert_eq!(response.body["name"], "sale");
//!     transport.verify();
//! }
//! ```

use super::{Method, Transport, TransportRequest, TransportResponse};
use crate::framework::RequestError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

struct Expectation {
    method: Method,
    path: String,
    body: Option<Value>,
    query: Option<Vec<(String, String)>>,
    delay: Option<Duration>,
    response: Result<TransportResponse, RequestError>,
}

impl Expectation {
    fn matches(&self, request: &TransportRequest) -> bool {
        self.method == request.method
            && self.path == request.path
            && self.body.as_ref().map_or(true, |b| Some(b) == request.body.as_ref())
            && self.query.as_ref().map_or(true, |q| q == &request.query)
    }
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    requests: Vec<TransportRequest>,
    unexpected: Vec<TransportRequest>,
}

/// A transport with expectation tracking. Clones share the same expectations.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            state: self.state.clone(),
            method,
            path: path.into(),
            body: None,
            query: None,
            delay: None,
        }
    }

    pub fn expect_get(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, path)
    }

    pub fn expect_post(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Post, path)
    }

    pub fn expect_put(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Put, path)
    }

    pub fn expect_delete(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Delete, path)
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).requests.clone()
    }

    pub fn request_count(&self, method: Method, path: &str) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Panics if an expectation was not consumed or a request was not expected.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, RequestError> {
        let matched = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.requests.push(request.clone());
            let position = state.expectations.iter().position(|e| e.matches(&request));
            match position.and_then(|p| state.expectations.remove(p)) {
                Some(expectation) => Some(expectation),
                None => {
                    state.unexpected.push(request.clone());
                    None
                }
            }
        };

        let Some(expectation) = matched else {
            return Err(RequestError::new(
                "mock_unexpected_request",
                format!("No expectation for {} {}", request.method, request.path),
            ));
        };

        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        expectation.response
    }
}

/// Builder for one expected request.
pub struct ExpectationBuilder {
    state: Arc<Mutex<MockState>>,
    method: Method,
    path: String,
    body: Option<Value>,
    query: Option<Vec<(String, String)>>,
    delay: Option<Duration>,
}

impl ExpectationBuilder {
    /// Only match requests carrying exactly this JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Only match requests carrying exactly these query pairs.
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = Some(query);
        self
    }

    /// Hold the response back for `delay` after the request arrives.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn return_ok(self, body: Value) {
        self.respond(Ok(TransportResponse::new(body)));
    }

    /// Responds with a collection body and its `X-WP-Total`.
    pub fn return_list(self, body: Value, total: usize) {
        self.respond(Ok(TransportResponse {
            body,
            total: Some(total),
        }));
    }

    pub fn return_err(self, error: RequestError) {
        self.respond(Err(error));
    }

    fn respond(self, response: Result<TransportResponse, RequestError>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.expectations.push_back(Expectation {
            method: self.method,
            path: self.path,
            body: self.body,
            query: self.query,
            delay: self.delay,
            response,
        });
    }
}
