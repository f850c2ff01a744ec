use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use seriph_api::{FormSubmitResponse, SeriphClient, SubmitFormOptions};
use serde_json::{Map, Value};

use super::MessageData;
use crate::controller::stateful_controller;
use crate::error::CoreError;
use crate::store::StateStore;

/// A site-defined form. The time the form was shown is stamped at
/// construction (and again on `reset`) and sent with every submission.
pub struct FormController {
    client: SeriphClient,
    form_slug: String,
    load_time: AtomicI64,
    store: StateStore<MessageData>,
}

stateful_controller!(FormController, MessageData);

impl FormController {
    pub fn new(client: SeriphClient, form_slug: impl Into<String>) -> Self {
        Self {
            client,
            form_slug: form_slug.into(),
            load_time: AtomicI64::new(Utc::now().timestamp_millis()),
            store: StateStore::new(MessageData::default()),
        }
    }

    pub fn form_slug(&self) -> &str {
        &self.form_slug
    }

    /// Epoch milliseconds recorded when the form was (re)initialised.
    pub fn load_time(&self) -> i64 {
        self.load_time.load(Ordering::Relaxed)
    }

    pub async fn submit(&self, data: Map<String, Value>) -> Result<FormSubmitResponse, CoreError> {
        let options =
            SubmitFormOptions::new(self.form_slug.clone(), data).with_load_time(self.load_time());
        self.store
            .run(
                self.client.submit_form(options),
                |state, resp: &FormSubmitResponse| {
                    state.message = Some(resp.message.clone());
                },
            )
            .await
    }

    pub fn reset(&self) {
        self.load_time
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
        self.store.reset();
    }
}
