// Newsletter subscription endpoint
//
// `POST /api/v1/subscribe`

use serde_json::json;
use tracing::debug;

use super::require_email;
use crate::client::{Scope, SeriphClient};
use crate::error::Error;
use crate::types::SubscribeResponse;

impl SeriphClient {
    /// Subscribe an email address to the site's newsletter.
    pub async fn subscribe(&self, email: &str) -> Result<SubscribeResponse, Error> {
        let email = require_email(email)?;
        let url = self.url(&["subscribe"])?;
        debug!("subscribing email");
        self.post(url, json!({ "email": email }), Scope::Site).await
    }
}
