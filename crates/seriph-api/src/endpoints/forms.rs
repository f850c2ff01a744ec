// Form submission endpoint
//
// `POST /api/v1/forms/{formSlug}/submit`

use chrono::Utc;
use serde_json::{Map, Value, json};
use tracing::debug;

use super::require;
use crate::client::{Scope, SeriphClient};
use crate::error::Error;
use crate::types::FormSubmitResponse;

/// Options for [`SeriphClient::submit_form`].
#[derive(Debug, Clone, Default)]
pub struct SubmitFormOptions {
    pub form_slug: String,
    pub data: Map<String, Value>,
    /// Unix millis at which the form was shown. Used server-side for spam
    /// heuristics; stamped at call time when `None`.
    pub form_load_time: Option<i64>,
}

impl SubmitFormOptions {
    pub fn new(form_slug: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            form_slug: form_slug.into(),
            data,
            form_load_time: None,
        }
    }

    pub fn with_load_time(mut self, millis: i64) -> Self {
        self.form_load_time = Some(millis);
        self
    }
}

impl SeriphClient {
    /// Submit a form.
    pub async fn submit_form(
        &self,
        options: SubmitFormOptions,
    ) -> Result<FormSubmitResponse, Error> {
        let slug = require("form_slug", &options.form_slug)?;
        let url = self.url(&["forms", slug, "submit"])?;
        let load_time = options
            .form_load_time
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        debug!(form = slug, "submitting form");

        let body = json!({
            "data": options.data,
            "formLoadTime": load_time,
        });
        self.post(url, body, Scope::Site).await
    }
}
