// Page view endpoints (visitor-scoped)
//
// `GET  /api/v1/views/{pageId}`
// `POST /api/v1/views/{pageId}`

use serde_json::json;
use tracing::debug;

use super::require;
use crate::client::{Scope, SeriphClient};
use crate::error::Error;
use crate::types::{RecordViewResponse, ViewCounts};

impl SeriphClient {
    pub async fn get_view_counts(&self, page_id: &str) -> Result<ViewCounts, Error> {
        let page_id = require("page_id", page_id)?;
        let url = self.url(&["views", page_id])?;
        debug!(page_id, "fetching view counts");
        self.get(url, Scope::Visitor).await
    }

    /// Record a view. Unique visitors are tracked via the visitor token.
    pub async fn record_view(&self, page_id: &str) -> Result<RecordViewResponse, Error> {
        let page_id = require("page_id", page_id)?;
        let url = self.url(&["views", page_id])?;
        debug!(page_id, "recording view");
        self.post(url, json!({}), Scope::Visitor).await
    }
}
