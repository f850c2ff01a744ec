// Blog post endpoints
//
// `GET /api/v1/posts?limit=&tag=`
// `GET /api/v1/posts/{slug}`   (404 is "not found", not an error)

use tracing::debug;

use super::require;
use crate::client::{Scope, SeriphClient, decode};
use crate::error::Error;
use crate::transport::Method;
use crate::types::Post;

/// Page size used when the caller does not set one.
pub const DEFAULT_POSTS_LIMIT: u32 = 500;

/// Options for [`SeriphClient::fetch_posts`].
#[derive(Debug, Clone, Default)]
pub struct FetchPostsOptions {
    /// Only posts carrying this tag.
    pub tag: Option<String>,
    /// Maximum number of posts (default: 500).
    pub limit: Option<u32>,
}

impl SeriphClient {
    /// List published posts, newest first.
    pub async fn fetch_posts(&self, options: &FetchPostsOptions) -> Result<Vec<Post>, Error> {
        let mut url = self.url(&["posts"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair(
                "limit",
                &options.limit.unwrap_or(DEFAULT_POSTS_LIMIT).to_string(),
            );
            if let Some(tag) = options.tag.as_deref().filter(|t| !t.trim().is_empty()) {
                query.append_pair("tag", tag);
            }
        }
        debug!(tag = ?options.tag, "fetching posts");
        self.get(url, Scope::Site).await
    }

    /// Fetch one post by slug. Returns `Ok(None)` if it does not exist.
    pub async fn fetch_post(&self, slug: &str) -> Result<Option<Post>, Error> {
        let slug = require("slug", slug)?;
        let url = self.url(&["posts", slug])?;
        debug!(slug, "fetching post");

        let resp = self.execute(Method::Get, url, None, Scope::Site).await?;
        if resp.status == 404 {
            return Ok(None);
        }
        decode(resp).map(Some)
    }
}
