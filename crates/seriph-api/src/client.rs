// Seriph API HTTP client
//
// Owns the resolved config, the transport, and the visitor store. Endpoint
// modules (comments, reactions, polls, ...) add inherent methods in
// separate files; this module only handles URL construction, header
// injection, and response decoding.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::{self, SITE_KEY_HEADER, SeriphConfig, VISITOR_HEADER};
use crate::error::Error;
use crate::transport::{
    ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport, TransportConfig,
};
use crate::visitor::{MemoryVisitorStore, VisitorIdentityStore};

/// Error body shapes returned by the Seriph API.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Whether a request carries the visitor token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// Site key only.
    Site,
    /// Site key plus visitor token (reactions, views, votes, dismissals).
    Visitor,
}

/// Async client for the Seriph widgets API.
///
/// Cheaply cloneable; clones share the transport and visitor store.
#[derive(Clone)]
pub struct SeriphClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: SeriphConfig,
    base_url: Url,
    transport: Arc<dyn HttpTransport>,
    visitor: Arc<dyn VisitorIdentityStore>,
}

impl std::fmt::Debug for SeriphClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriphClient")
            .field("config", &self.inner.config)
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Builder for [`SeriphClient`] with pluggable transport and visitor store.
pub struct ClientBuilder {
    config: SeriphConfig,
    transport: Option<Arc<dyn HttpTransport>>,
    transport_config: TransportConfig,
    visitor: Option<Arc<dyn VisitorIdentityStore>>,
}

impl ClientBuilder {
    /// Use a custom transport instead of reqwest.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Tune the default reqwest transport. Ignored when a custom
    /// transport is set.
    pub fn transport_config(mut self, transport_config: TransportConfig) -> Self {
        self.transport_config = transport_config;
        self
    }

    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.transport_config.timeout = timeout;
        self
    }

    pub fn visitor_store(mut self, visitor: Arc<dyn VisitorIdentityStore>) -> Self {
        self.visitor = Some(visitor);
        self
    }

    /// Validate the config and assemble the client.
    pub fn build(self) -> Result<SeriphClient, Error> {
        self.config.validate()?;
        let base_url = config::api_base(Some(self.config.endpoint()))?;

        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new(&self.transport_config)?),
        };
        let visitor = self
            .visitor
            .unwrap_or_else(|| Arc::new(MemoryVisitorStore::new()));

        Ok(SeriphClient {
            inner: Arc::new(ClientInner {
                config: self.config,
                base_url,
                transport,
                visitor,
            }),
        })
    }
}

impl SeriphClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client with the default reqwest transport and an in-memory
    /// visitor store. Fails if the site key is missing.
    pub fn new(config: SeriphConfig) -> Result<Self, Error> {
        Self::builder(config).build()
    }

    pub fn builder(config: SeriphConfig) -> ClientBuilder {
        ClientBuilder {
            config,
            transport: None,
            transport_config: TransportConfig::default(),
            visitor: None,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn config(&self) -> &SeriphConfig {
        &self.inner.config
    }

    /// `{endpoint}/api/v1`
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Current visitor token (override > stored > generated).
    pub fn visitor_id(&self) -> String {
        self.inner.visitor.get()
    }

    /// Set a custom visitor id (e.g. an authenticated user id), or `None`
    /// to revert to the stored token.
    pub fn set_visitor_id(&self, id: Option<String>) {
        self.inner.visitor.set(id);
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join percent-encoded segments onto `{endpoint}/api/v1`.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        config::join_segments(&self.inner.base_url, segments)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send one request with site key (and visitor token if scoped).
    pub(crate) async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
        scope: Scope,
    ) -> Result<ApiResponse, Error> {
        debug!("{method} {url}");

        let mut headers = vec![(SITE_KEY_HEADER, self.inner.config.site_key.clone())];
        if scope == Scope::Visitor {
            headers.push((VISITOR_HEADER, self.visitor_id()));
        }

        self.inner
            .transport
            .send(ApiRequest {
                method,
                url,
                headers,
                body,
            })
            .await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url, scope: Scope) -> Result<T, Error> {
        let resp = self.execute(Method::Get, url, None, scope).await?;
        decode(resp)
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: serde_json::Value,
        scope: Scope,
    ) -> Result<T, Error> {
        let resp = self.execute(Method::Post, url, Some(body), scope).await?;
        decode(resp)
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        url: Url,
        body: serde_json::Value,
        scope: Scope,
    ) -> Result<T, Error> {
        let resp = self.execute(Method::Delete, url, Some(body), scope).await?;
        decode(resp)
    }
}

// ── Response handling ────────────────────────────────────────────────

/// Decode a 2xx body as `T`, or turn the response into an error.
pub(crate) fn decode<T: DeserializeOwned>(resp: ApiResponse) -> Result<T, Error> {
    if !resp.is_success() {
        return Err(parse_error(resp));
    }
    serde_json::from_str(&resp.body).map_err(|e| {
        let preview: String = resp.body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: resp.body,
        }
    })
}

/// Map a non-2xx response, surfacing the server's message when present.
pub(crate) fn parse_error(resp: ApiResponse) -> Error {
    let status = resp.status;
    let parsed = serde_json::from_str::<ErrorResponse>(&resp.body)
        .ok()
        .and_then(|e| e.error.or(e.message));

    let message = match parsed {
        Some(msg) => msg,
        None if resp.body.trim().is_empty() => format!("request failed with status {status}"),
        None => resp.body,
    };

    Error::Api { status, message }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            body: body.into(),
        }
    }

    #[test]
    fn parse_error_prefers_error_field() {
        let err = parse_error(response(429, r#"{"error":"Too many comments"}"#));
        match err {
            Error::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Too many comments");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn parse_error_falls_back_to_message_then_body() {
        let err = parse_error(response(400, r#"{"message":"Invalid email"}"#));
        assert_eq!(err.to_string(), "Seriph API error (HTTP 400): Invalid email");

        let err = parse_error(response(502, "Bad Gateway"));
        assert_eq!(err.to_string(), "Seriph API error (HTTP 502): Bad Gateway");

        let err = parse_error(response(500, ""));
        assert_eq!(
            err.to_string(),
            "Seriph API error (HTTP 500): request failed with status 500"
        );
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let result: Result<Vec<String>, Error> = decode(response(200, "<html>"));
        assert!(matches!(result, Err(Error::Deserialization { .. })));
    }

    #[test]
    fn new_requires_site_key() {
        let result = SeriphClient::new(SeriphConfig::new(""));
        assert!(matches!(result, Err(Error::Validation { field: "site_key", .. })));
    }
}
