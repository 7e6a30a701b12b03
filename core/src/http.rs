//! HTTP transport types for the judicial-records API.
//!
//! # Design
//! Requests and responses are plain data. `VerdictClient` builds
//! `HttpRequest` values and parses `HttpResponse` values in pure functions;
//! only a `Transport` implementation touches the network. Every endpoint the
//! API exposes is read-only, so a request is a URL plus headers.

/// An HTTP GET request described as plain data.
///
/// Built by `VerdictClient::build_*` methods and executed by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// A GET for `url` that asks for a JSON response.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

/// An HTTP response described as plain data.
///
/// Non-2xx statuses are ordinary values here, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}
