/// Constant path segment between the base URL and every route.
pub const API_PREFIX: &str = "api";

/// Environment variable naming the backend base URL.
pub const BASE_URL_ENV: &str = "BPROC_BASE_URL";

/// Where the backend lives.
///
/// The host is computed once at construction as `{base_url}/api` and never
/// changes afterwards. An empty base URL yields the relative host `/api`,
/// which addresses the same origin the embedding surface was served from.
///
/// The base URL is taken as given: no trailing-slash cleanup, no URL
/// validation. A malformed value shows up later as a transport fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    base_url: String,
    host: String,
}

impl EndpointConfig {
    /// Create a configuration from an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let host = format!("{}/{}", base_url, API_PREFIX);
        Self { base_url, host }
    }

    /// Create a configuration from the `BPROC_BASE_URL` environment
    /// variable, falling back to the empty base URL when unset.
    pub fn from_env() -> Self {
        Self::new(std::env::var(BASE_URL_ENV).unwrap_or_default())
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the host every request is addressed to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Build the full URL for a route, as `{host}/{path}`.
    ///
    /// The path is joined verbatim; whatever the caller passes is what goes
    /// on the wire.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.host, path)
    }
}
