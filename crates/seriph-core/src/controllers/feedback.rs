use seriph_api::{FeedbackType, SeriphClient, SubmitFeedbackOptions, SubmitFeedbackResponse};

use super::MessageData;
use crate::controller::stateful_controller;
use crate::error::CoreError;
use crate::store::StateStore;

/// Optional context sent along with feedback.
#[derive(Debug, Clone, Default)]
pub struct FeedbackExtras {
    pub email: Option<String>,
    pub page_url: Option<String>,
}

pub struct FeedbackController {
    client: SeriphClient,
    store: StateStore<MessageData>,
}

stateful_controller!(FeedbackController, MessageData);

impl FeedbackController {
    pub fn new(client: SeriphClient) -> Self {
        Self {
            client,
            store: StateStore::new(MessageData::default()),
        }
    }

    pub async fn submit(
        &self,
        kind: FeedbackType,
        content: &str,
        extras: FeedbackExtras,
    ) -> Result<SubmitFeedbackResponse, CoreError> {
        let options = SubmitFeedbackOptions {
            email: extras.email,
            page_url: extras.page_url,
            ..SubmitFeedbackOptions::new(kind, content)
        };
        self.store
            .run(
                self.client.submit_feedback(&options),
                |data, resp: &SubmitFeedbackResponse| {
                    data.message = Some(resp.message.clone());
                },
            )
            .await
    }

    pub fn reset(&self) {
        self.store.reset();
    }
}
