//! Endpoint configuration.

/// Root of the public judicial-records API.
pub const DEFAULT_API_BASE: &str = "https://api.jrf.org.tw";

/// Story search endpoint of the public API.
pub const DEFAULT_SEARCH_URL: &str = "https://api.jrf.org.tw/search/stories";

/// Where a `VerdictClient` sends its requests.
///
/// `Default` points at the production service. Tests and local tooling use
/// `with_base` to aim both endpoints at one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub search_url: String,
}

impl ClientConfig {
    pub fn new(api_base: &str, search_url: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            search_url: search_url.trim_end_matches(['/', '?']).to_string(),
        }
    }

    /// Derive both endpoints from a single root, mirroring the production layout.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self::new(base, &format!("{base}/search/stories"))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_SEARCH_URL)
    }
}
