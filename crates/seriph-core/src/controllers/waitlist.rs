use seriph_api::{JoinWaitlistOptions, JoinWaitlistResponse, SeriphClient};

use crate::controller::stateful_controller;
use crate::error::CoreError;
use crate::store::StateStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitlistData {
    pub message: Option<String>,
    pub position: Option<u64>,
}

/// Optional signup details.
#[derive(Debug, Clone, Default)]
pub struct WaitlistJoin {
    pub name: Option<String>,
    pub source: Option<String>,
}

pub struct WaitlistController {
    client: SeriphClient,
    store: StateStore<WaitlistData>,
}

stateful_controller!(WaitlistController, WaitlistData);

impl WaitlistController {
    pub fn new(client: SeriphClient) -> Self {
        Self {
            client,
            store: StateStore::new(WaitlistData::default()),
        }
    }

    pub async fn join(
        &self,
        email: &str,
        extras: WaitlistJoin,
    ) -> Result<JoinWaitlistResponse, CoreError> {
        let options = JoinWaitlistOptions {
            email: email.to_owned(),
            name: extras.name,
            source: extras.source,
        };
        self.store
            .run(
                self.client.join_waitlist(&options),
                |data, resp: &JoinWaitlistResponse| {
                    data.message = Some(resp.message.clone());
                    data.position = resp.position;
                },
            )
            .await
    }

    pub fn reset(&self) {
        self.store.reset();
    }
}
