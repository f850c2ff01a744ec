// Feedback endpoint
//
// `POST /api/v1/feedback`

use serde_json::json;
use tracing::debug;

use super::{require, require_email};
use crate::client::{Scope, SeriphClient};
use crate::error::Error;
use crate::types::{FeedbackType, SubmitFeedbackResponse};

/// Options for [`SeriphClient::submit_feedback`].
#[derive(Debug, Clone)]
pub struct SubmitFeedbackOptions {
    pub kind: FeedbackType,
    pub content: String,
    pub email: Option<String>,
    /// Page URL where the feedback was given.
    pub page_url: Option<String>,
}

impl SubmitFeedbackOptions {
    pub fn new(kind: FeedbackType, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            email: None,
            page_url: None,
        }
    }
}

impl SeriphClient {
    pub async fn submit_feedback(
        &self,
        options: &SubmitFeedbackOptions,
    ) -> Result<SubmitFeedbackResponse, Error> {
        let content = require("content", &options.content)?;
        let url = self.url(&["feedback"])?;
        debug!(kind = %options.kind, "submitting feedback");

        let mut body = json!({
            "type": options.kind,
            "content": content,
        });
        if let Some(ref email) = options.email {
            body["email"] = json!(require_email(email)?);
        }
        if let Some(ref page_url) = options.page_url {
            body["pageUrl"] = json!(page_url);
        }
        self.post(url, body, Scope::Site).await
    }
}
