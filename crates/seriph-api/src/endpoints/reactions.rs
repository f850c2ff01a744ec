// Reaction endpoints (visitor-scoped)
//
// `GET    /api/v1/reactions/{pageId}`
// `POST   /api/v1/reactions/{pageId}`  body `{ reactionType }`
// `DELETE /api/v1/reactions/{pageId}`  body `{ reactionType }`

use serde_json::json;
use tracing::debug;

use super::require;
use crate::client::{Scope, SeriphClient};
use crate::error::Error;
use crate::types::{FetchReactionsResponse, ReactionUpdate};

/// Reaction type used when the caller does not name one.
pub const DEFAULT_REACTION: &str = "like";

impl SeriphClient {
    /// Fetch reaction counts and the visitor's own reactions.
    pub async fn fetch_reactions(&self, page_id: &str) -> Result<FetchReactionsResponse, Error> {
        let page_id = require("page_id", page_id)?;
        let url = self.url(&["reactions", page_id])?;
        debug!(page_id, "fetching reactions");
        self.get(url, Scope::Visitor).await
    }

    /// Add a reaction. `None` means [`DEFAULT_REACTION`].
    pub async fn add_reaction(
        &self,
        page_id: &str,
        reaction_type: Option<&str>,
    ) -> Result<ReactionUpdate, Error> {
        let page_id = require("page_id", page_id)?;
        let reaction_type = reaction_type.unwrap_or(DEFAULT_REACTION);
        let url = self.url(&["reactions", page_id])?;
        debug!(page_id, reaction_type, "adding reaction");
        self.post(url, json!({ "reactionType": reaction_type }), Scope::Visitor)
            .await
    }

    /// Remove a reaction. `None` means [`DEFAULT_REACTION`].
    pub async fn remove_reaction(
        &self,
        page_id: &str,
        reaction_type: Option<&str>,
    ) -> Result<ReactionUpdate, Error> {
        let page_id = require("page_id", page_id)?;
        let reaction_type = reaction_type.unwrap_or(DEFAULT_REACTION);
        let url = self.url(&["reactions", page_id])?;
        debug!(page_id, reaction_type, "removing reaction");
        self.delete(url, json!({ "reactionType": reaction_type }), Scope::Visitor)
            .await
    }
}
