// Client configuration and URL construction.
//
// Every request URL is `{endpoint}{API_PATH}/{resource...}`. The endpoint
// falls back to the hosted Seriph origin when unset or blank.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// Hosted Seriph origin used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://seriph.xyz";

/// Versioned API prefix appended to the endpoint.
pub const API_PATH: &str = "/api/v1";

/// Storage key under which the visitor token is persisted.
pub const VISITOR_STORAGE_KEY: &str = "seriph_visitor_id";

/// Header carrying the site key on every request.
pub const SITE_KEY_HEADER: &str = "X-Seriph-Key";

/// Header carrying the visitor token on visitor-scoped requests.
pub const VISITOR_HEADER: &str = "X-Seriph-Visitor";

/// Site key plus optional endpoint override.
///
/// Immutable once handed to a [`SeriphClient`](crate::SeriphClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriphConfig {
    /// Site key scoping all requests to one configured site.
    pub site_key: String,
    /// Base URL of the Seriph instance (default: `https://seriph.xyz`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl SeriphConfig {
    pub fn new(site_key: impl Into<String>) -> Self {
        Self {
            site_key: site_key.into(),
            endpoint: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// The effective endpoint, substituting the default for blank values.
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Reject configs without a usable site key or endpoint.
    pub fn validate(&self) -> Result<(), Error> {
        if self.site_key.trim().is_empty() {
            return Err(Error::validation("site_key", "a site key is required"));
        }
        api_base(Some(self.endpoint())).map(|_| ())
    }
}

/// Resolve `{endpoint}{API_PATH}` as a URL.
pub(crate) fn api_base(endpoint: Option<&str>) -> Result<Url, Error> {
    let origin = endpoint
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or(DEFAULT_ENDPOINT);
    let url = Url::parse(&format!("{}{API_PATH}", origin.trim_end_matches('/')))?;
    if url.cannot_be_a_base() {
        return Err(Error::validation("endpoint", format!("not a base URL: {origin}")));
    }
    Ok(url)
}

/// Build a full API URL from an endpoint and a resource path.
///
/// `path` is appended verbatim (a leading `/` is optional):
/// `build_url(None, "/comments/home")` yields
/// `https://seriph.xyz/api/v1/comments/home`.
pub fn build_url(endpoint: Option<&str>, path: &str) -> Result<Url, Error> {
    let base = api_base(endpoint)?;
    let path = path.trim_start_matches('/');
    Ok(Url::parse(&format!(
        "{}/{path}",
        base.as_str().trim_end_matches('/')
    ))?)
}

/// Append percent-encoded path segments to an API base URL.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, Error> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| Error::validation("endpoint", format!("not a base URL: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
