use std::collections::BTreeSet;

use seriph_api::{Announcement, SeriphClient};

use crate::controller::stateful_controller;
use crate::error::CoreError;
use crate::store::StateStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementsData {
    pub announcements: Vec<Announcement>,
    /// Ids dismissed through this controller. Survives re-fetches.
    pub dismissed: BTreeSet<i64>,
}

impl AnnouncementsData {
    /// Fetched announcements minus locally dismissed ones, in server order.
    pub fn visible(&self) -> Vec<Announcement> {
        self.announcements
            .iter()
            .filter(|a| !self.dismissed.contains(&a.id))
            .cloned()
            .collect()
    }
}

pub struct AnnouncementsController {
    client: SeriphClient,
    store: StateStore<AnnouncementsData>,
}

stateful_controller!(AnnouncementsController, AnnouncementsData);

impl AnnouncementsController {
    pub fn new(client: SeriphClient) -> Self {
        Self {
            client,
            store: StateStore::new(AnnouncementsData::default()),
        }
    }

    pub async fn fetch(&self) -> Result<Vec<Announcement>, CoreError> {
        self.store
            .run_latest(
                "fetch",
                self.client.fetch_announcements(),
                |data, list: &Vec<Announcement>| data.announcements.clone_from(list),
            )
            .await
    }

    /// Dismiss server-side; the id is hidden locally once the call succeeds.
    pub async fn dismiss(&self, announcement_id: i64) -> Result<(), CoreError> {
        self.store
            .run(
                self.client.dismiss_announcement(announcement_id),
                |data, _: &()| {
                    data.dismissed.insert(announcement_id);
                },
            )
            .await
    }

    pub fn visible_announcements(&self) -> Vec<Announcement> {
        self.store.snapshot().data.visible()
    }

    /// Forget local dismissals (the server keeps its own record).
    pub fn clear_dismissed(&self) {
        self.store.update(|data| data.dismissed.clear());
    }
}
