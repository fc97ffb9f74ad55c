//! Transports that carry requests to the API.
//!
//! [`HttpTransport`] talks to a real server through `ureq`.
//! [`MockTransport`] serves canned responses from memory and records
//! every request, for testing without network access:
//!
//! ```
//! use ctclient::transport::{Method, MockTransport};
//! use ctclient::Client;
//! use serde_json::json;
//!
//! let mock = MockTransport::new();
//! mock.respond(Method::Get, "/v3/ou/4", 200, json!({"data": {"id": 4}, "status": 200}));
//!
//! let client = Client::with_transport("https://ct.example.com", "key", mock.clone()).unwrap();
//! let value = client.get_value("/v3/ou/4").unwrap();
//! assert_eq!(value["data"]["id"], 4);
//! assert_eq!(mock.requests().len(), 1);
//! ```

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read
    Get,
    /// Create or associate
    Post,
    /// Update
    Patch,
    /// Delete or disassociate
    Delete,
}

impl Method {
    /// Upper-case method name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the API base, e.g. `/v3/ou/4`.
    pub path: String,
    /// Absolute URL.
    pub url: String,
    /// Request headers.
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl Request {
    /// Look up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status.
    pub status: u16,
    /// Raw body text.
    pub body: String,
}

impl Response {
    /// Only 200 and 201 count as success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, 200 | 201)
    }
}

/// Something that can deliver a [`Request`] and return its [`Response`].
///
/// Non-success statuses are returned as responses, not errors; only
/// failures to get any response at all are errors.
pub trait Transport: Send + Sync {
    /// Send a request.
    fn send(&self, request: &Request) -> Result<Response>;
}

/// Real transport backed by a `ureq` agent.
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    /// Create a transport, optionally skipping TLS certificate checks.
    #[must_use]
    pub fn new(skip_ssl_validation: bool) -> Self {
        let tls = ureq::tls::TlsConfig::builder()
            .disable_verification(skip_ssl_validation)
            .build();
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .tls_config(tls)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(false)
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, request: &Request) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for HttpTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        let url = request.url.as_str();
        let result = match (request.method, &request.body) {
            (Method::Get, _) => with_headers(self.agent.get(url), request).call(),
            (Method::Post, Some(body)) => with_headers(self.agent.post(url), request).send_json(body),
            (Method::Post, None) => with_headers(self.agent.post(url), request).send_empty(),
            (Method::Patch, Some(body)) => {
                with_headers(self.agent.patch(url), request).send_json(body)
            }
            (Method::Patch, None) => with_headers(self.agent.patch(url), request).send_empty(),
            (Method::Delete, Some(body)) => with_headers(self.agent.delete(url), request)
                .force_send_body()
                .send_json(body),
            (Method::Delete, None) => with_headers(self.agent.delete(url), request).call(),
        };

        let mut response =
            result.map_err(|e| Error::transport(request.method.as_str(), url, e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| Error::transport(request.method.as_str(), url, e.to_string()))?;

        Ok(Response { status, body })
    }
}

type RouteKey = (Method, String);

/// In-memory transport for tests.
///
/// Responses are queued per method and path. Each request takes the
/// next queued response; the last one stays and is served again for
/// every later request. Unknown routes answer 404.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<RouteKey, VecDeque<Response>>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    /// Create a new empty mock transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response for a route.
    pub fn respond(&self, method: Method, path: impl Into<String>, status: u16, body: Value) {
        self.respond_raw(method, path, status, body.to_string());
    }

    /// Queue a raw-text response for a route.
    pub fn respond_raw(
        &self,
        method: Method,
        path: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) {
        lock(&self.routes)
            .entry((method, path.into()))
            .or_default()
            .push_back(Response {
                status,
                body: body.into(),
            });
    }

    /// Every request sent so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        lock(&self.requests).clone()
    }

    /// Requests sent to one route, in order.
    #[must_use]
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<Request> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }

    /// Requests other than GET, in order.
    #[must_use]
    pub fn mutations(&self) -> Vec<Request> {
        lock(&self.requests)
            .iter()
            .filter(|r| r.method != Method::Get)
            .cloned()
            .collect()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &Request) -> Result<Response> {
        lock(&self.requests).push(request.clone());

        let mut routes = lock(&self.routes);
        let response = match routes.get_mut(&(request.method, request.path.clone())) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        Ok(response.unwrap_or_else(|| Response {
            status: 404,
            body: format!("{{\"message\":\"no mock route for {} {}\"}}", request.method, request.path),
        }))
    }
}
