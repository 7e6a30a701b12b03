//! The seam between the pure client core and the network.
//!
//! `VerdictClient` never performs I/O itself; it hands each `HttpRequest` to
//! a `Transport`. Production code uses `UreqTransport`. Tests substitute an
//! in-memory implementation that records every URL it is asked for.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one GET round-trip.
///
/// Implementations return every HTTP status as data. Only failures to obtain
/// a response at all (connection refused, DNS, unreadable body) are `Err`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Characters that cannot appear raw in a request target. Case identifiers
/// carry CJK labels, so non-ASCII bytes are escaped here as well.
const URL_UNSAFE: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap a preconfigured agent. The agent must not treat 4xx/5xx as errors,
    /// or non-200 responses surface as `ApiError::Network`.
    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = encode_url(&request.url);
        let mut builder = self.agent.get(url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call()?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;
        debug!(url = %request.url, status, bytes = body.len(), "response received");

        Ok(HttpResponse { status, body })
    }
}

/// Percent-encode bytes that are not legal in a URI, leaving reserved
/// characters and existing escapes intact.
pub(crate) fn encode_url(url: &str) -> String {
    utf8_percent_encode(url, URL_UNSAFE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_url_escapes_cjk_path_segments() {
        let url = encode_url("https://api.jrf.org.tw/TPD/民事-109-訴-123/verdict");
        assert_eq!(
            url,
            "https://api.jrf.org.tw/TPD/%E6%B0%91%E4%BA%8B-109-%E8%A8%B4-123/verdict"
        );
    }

    #[test]
    fn encode_url_keeps_existing_query_escapes() {
        let url = "https://api.jrf.org.tw/search/stories?page=1&q%5Byear%5D=109";
        assert_eq!(encode_url(url), url);
    }

    #[test]
    fn encode_url_escapes_spaces() {
        assert_eq!(encode_url("http://a/b c"), "http://a/b%20c");
    }
}
