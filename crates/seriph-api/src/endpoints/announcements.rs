// Announcement endpoints (visitor-scoped)
//
// `GET  /api/v1/announcements`
// `POST /api/v1/announcements/{id}/dismiss`

use tracing::debug;

use crate::client::{Scope, SeriphClient, parse_error};
use crate::error::Error;
use crate::transport::Method;
use crate::types::Announcement;

impl SeriphClient {
    /// Fetch active announcements for the site.
    pub async fn fetch_announcements(&self) -> Result<Vec<Announcement>, Error> {
        let url = self.url(&["announcements"])?;
        debug!("fetching announcements");
        self.get(url, Scope::Visitor).await
    }

    /// Dismiss an announcement for the current visitor. The response body
    /// is ignored.
    pub async fn dismiss_announcement(&self, announcement_id: i64) -> Result<(), Error> {
        let id = announcement_id.to_string();
        let url = self.url(&["announcements", &id, "dismiss"])?;
        debug!(announcement_id, "dismissing announcement");

        let resp = self
            .execute(Method::Post, url, None, Scope::Visitor)
            .await?;
        if resp.is_success() {
            Ok(())
        } else {
            Err(parse_error(resp))
        }
    }
}
