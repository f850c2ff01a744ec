use seriph_api::{PollWithResults, SeriphClient, VotePollResponse};

use crate::controller::stateful_controller;
use crate::error::CoreError;
use crate::store::StateStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollData {
    pub poll: Option<PollWithResults>,
}

pub struct PollController {
    client: SeriphClient,
    slug: String,
    store: StateStore<PollData>,
}

stateful_controller!(PollController, PollData);

impl PollController {
    pub fn new(client: SeriphClient, slug: impl Into<String>) -> Self {
        Self {
            client,
            slug: slug.into(),
            store: StateStore::new(PollData::default()),
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub async fn fetch(&self) -> Result<PollWithResults, CoreError> {
        self.store
            .run_latest(
                "fetch",
                self.client.fetch_poll(&self.slug),
                |data, poll: &PollWithResults| data.poll = Some(poll.clone()),
            )
            .await
    }

    /// Vote for one or more options. On success the fetched poll (if any)
    /// takes the new tallies and records the selection as the visitor's.
    pub async fn vote<I, S>(&self, selected: I) -> Result<VotePollResponse, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let selected: Vec<String> = selected.into_iter().map(Into::into).collect();
        self.store
            .run(
                self.client.vote_poll(&self.slug, &selected),
                |data, resp: &VotePollResponse| {
                    let Some(poll) = data.poll.as_mut() else {
                        return;
                    };
                    poll.results.clone_from(&resp.results);
                    poll.total_votes = resp.total_votes;
                    if resp.success {
                        poll.user_votes = Some(selected.clone());
                    }
                },
            )
            .await
    }

    /// True once a fetch or vote has recorded at least one vote for this
    /// visitor.
    pub fn has_voted(&self) -> bool {
        self.store
            .snapshot()
            .data
            .poll
            .as_ref()
            .and_then(|p| p.user_votes.as_ref())
            .is_some_and(|votes| !votes.is_empty())
    }
}
