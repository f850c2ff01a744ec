// Poll endpoints (visitor-scoped)
//
// `GET  /api/v1/polls/{slug}`
// `POST /api/v1/polls/{slug}/vote`  body `{ selectedOptions }`

use serde_json::json;
use tracing::debug;

use super::require;
use crate::client::{Scope, SeriphClient};
use crate::error::Error;
use crate::types::{PollWithResults, VotePollResponse};

impl SeriphClient {
    /// Fetch a poll with results and the visitor's own votes.
    pub async fn fetch_poll(&self, slug: &str) -> Result<PollWithResults, Error> {
        let slug = require("slug", slug)?;
        let url = self.url(&["polls", slug])?;
        debug!(slug, "fetching poll");
        self.get(url, Scope::Visitor).await
    }

    /// Cast a vote. One request per call; dedup is the server's job.
    pub async fn vote_poll(
        &self,
        slug: &str,
        selected_options: &[String],
    ) -> Result<VotePollResponse, Error> {
        let slug = require("slug", slug)?;
        if selected_options.is_empty() {
            return Err(Error::validation(
                "selected_options",
                "select at least one option",
            ));
        }
        let url = self.url(&["polls", slug, "vote"])?;
        debug!(slug, count = selected_options.len(), "voting");
        self.post(
            url,
            json!({ "selectedOptions": selected_options }),
            Scope::Visitor,
        )
        .await
    }
}
