// Waitlist endpoint
//
// `POST /api/v1/waitlist`

use serde_json::json;
use tracing::debug;

use super::require_email;
use crate::client::{Scope, SeriphClient};
use crate::error::Error;
use crate::types::JoinWaitlistResponse;

/// Options for [`SeriphClient::join_waitlist`].
#[derive(Debug, Clone, Default)]
pub struct JoinWaitlistOptions {
    pub email: String,
    pub name: Option<String>,
    /// Where the signup came from (e.g. "homepage", "blog").
    pub source: Option<String>,
}

impl SeriphClient {
    pub async fn join_waitlist(
        &self,
        options: &JoinWaitlistOptions,
    ) -> Result<JoinWaitlistResponse, Error> {
        let email = require_email(&options.email)?;
        let url = self.url(&["waitlist"])?;
        debug!(source = ?options.source, "joining waitlist");

        let mut body = json!({ "email": email });
        if let Some(ref name) = options.name {
            body["name"] = json!(name);
        }
        if let Some(ref source) = options.source {
            body["source"] = json!(source);
        }
        self.post(url, body, Scope::Site).await
    }
}
