use seriph_api::{SeriphClient, SubscribeResponse};

use super::MessageData;
use crate::controller::stateful_controller;
use crate::error::CoreError;
use crate::store::StateStore;

/// Newsletter signup form.
pub struct SubscribeController {
    client: SeriphClient,
    store: StateStore<MessageData>,
}

stateful_controller!(SubscribeController, MessageData);

impl SubscribeController {
    pub fn new(client: SeriphClient) -> Self {
        Self {
            client,
            store: StateStore::new(MessageData::default()),
        }
    }

    pub async fn submit(&self, email: &str) -> Result<SubscribeResponse, CoreError> {
        self.store
            .run(self.client.subscribe(email), |data, resp: &SubscribeResponse| {
                data.message = Some(resp.message.clone());
            })
            .await
    }

    pub fn reset(&self) {
        self.store.reset();
    }
}
