use seriph_api::{RecordViewResponse, SeriphClient, ViewCounts};

use crate::controller::stateful_controller;
use crate::error::CoreError;
use crate::store::StateStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewCountsData {
    pub page_id: String,
    pub views: u64,
    pub unique_visitors: u64,
}

impl ViewCountsData {
    fn apply(&mut self, views: u64, unique_visitors: u64) {
        self.views = views;
        self.unique_visitors = unique_visitors;
    }
}

pub struct ViewCountsController {
    client: SeriphClient,
    page_id: String,
    store: StateStore<ViewCountsData>,
}

stateful_controller!(ViewCountsController, ViewCountsData);

impl ViewCountsController {
    pub fn new(client: SeriphClient, page_id: impl Into<String>) -> Self {
        let page_id = page_id.into();
        let data = ViewCountsData {
            page_id: page_id.clone(),
            ..ViewCountsData::default()
        };
        Self {
            client,
            page_id,
            store: StateStore::new(data),
        }
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub async fn fetch(&self) -> Result<ViewCounts, CoreError> {
        self.store
            .run_latest(
                "fetch",
                self.client.get_view_counts(&self.page_id),
                |data, counts: &ViewCounts| data.apply(counts.views, counts.unique_visitors),
            )
            .await
    }

    /// Record a view for the current visitor and take the returned counts.
    pub async fn record(&self) -> Result<RecordViewResponse, CoreError> {
        self.store
            .run(
                self.client.record_view(&self.page_id),
                |data, resp: &RecordViewResponse| data.apply(resp.views, resp.unique_visitors),
            )
            .await
    }
}
