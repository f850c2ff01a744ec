use std::collections::BTreeMap;

use seriph_api::{DEFAULT_REACTION, FetchReactionsResponse, ReactionUpdate, SeriphClient};

use crate::controller::stateful_controller;
use crate::error::CoreError;
use crate::store::StateStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionsData {
    pub counts: BTreeMap<String, u64>,
    /// Reaction types the current visitor has added.
    pub user_reactions: Vec<String>,
}

impl ReactionsData {
    fn apply_update(&mut self, update: &ReactionUpdate, reacted: bool) {
        self.counts
            .insert(update.reaction_type.clone(), update.count);
        let present = self.user_reactions.contains(&update.reaction_type);
        if reacted && !present {
            self.user_reactions.push(update.reaction_type.clone());
        } else if !reacted && present {
            self.user_reactions.retain(|r| r != &update.reaction_type);
        }
    }
}

/// Reaction counts for one page. Counts are only changed once the server
/// has answered, and always to the count it reports.
pub struct ReactionsController {
    client: SeriphClient,
    page_id: String,
    store: StateStore<ReactionsData>,
}

stateful_controller!(ReactionsController, ReactionsData);

impl ReactionsController {
    pub fn new(client: SeriphClient, page_id: impl Into<String>) -> Self {
        Self {
            client,
            page_id: page_id.into(),
            store: StateStore::new(ReactionsData::default()),
        }
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub async fn fetch(&self) -> Result<FetchReactionsResponse, CoreError> {
        self.store
            .run_latest(
                "fetch",
                self.client.fetch_reactions(&self.page_id),
                |data, resp: &FetchReactionsResponse| {
                    data.counts.clone_from(&resp.counts);
                    data.user_reactions.clone_from(&resp.user_reactions);
                },
            )
            .await
    }

    /// Add a reaction (`None` adds [`DEFAULT_REACTION`]).
    pub async fn add(&self, reaction_type: Option<&str>) -> Result<ReactionUpdate, CoreError> {
        self.store
            .run(
                self.client.add_reaction(&self.page_id, reaction_type),
                |data, update: &ReactionUpdate| data.apply_update(update, true),
            )
            .await
    }

    /// Remove a reaction (`None` removes [`DEFAULT_REACTION`]).
    pub async fn remove(&self, reaction_type: Option<&str>) -> Result<ReactionUpdate, CoreError> {
        self.store
            .run(
                self.client.remove_reaction(&self.page_id, reaction_type),
                |data, update: &ReactionUpdate| data.apply_update(update, false),
            )
            .await
    }

    /// Whether the visitor currently holds `reaction_type`.
    pub fn has_reacted(&self, reaction_type: Option<&str>) -> bool {
        let reaction_type = reaction_type.unwrap_or(DEFAULT_REACTION);
        self.store
            .snapshot()
            .data
            .user_reactions
            .iter()
            .any(|r| r == reaction_type)
    }
}
