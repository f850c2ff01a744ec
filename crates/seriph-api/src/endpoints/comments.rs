// Comment endpoints
//
// `GET  /api/v1/comments/{pageId}`
// `POST /api/v1/comments/{pageId}`

use serde_json::json;
use tracing::debug;

use super::require;
use crate::client::{Scope, SeriphClient};
use crate::error::Error;
use crate::types::Comment;

/// Options for [`SeriphClient::post_comment`].
#[derive(Debug, Clone, Default)]
pub struct PostCommentOptions {
    pub page_id: String,
    pub author_name: String,
    pub author_email: Option<String>,
    pub content: String,
    /// Reply target; `None` posts a top-level comment.
    pub parent_id: Option<String>,
}

impl SeriphClient {
    /// Fetch the approved comment tree for a page.
    pub async fn fetch_comments(&self, page_id: &str) -> Result<Vec<Comment>, Error> {
        let page_id = require("page_id", page_id)?;
        let url = self.url(&["comments", page_id])?;
        debug!(page_id, "fetching comments");
        self.get(url, Scope::Site).await
    }

    /// Post a comment or reply.
    pub async fn post_comment(&self, options: &PostCommentOptions) -> Result<Comment, Error> {
        let page_id = require("page_id", &options.page_id)?;
        let author_name = require("author_name", &options.author_name)?;
        let content = require("content", &options.content)?;
        let url = self.url(&["comments", page_id])?;
        debug!(page_id, reply = options.parent_id.is_some(), "posting comment");

        let mut body = json!({
            "authorName": author_name,
            "content": content,
        });
        if let Some(ref email) = options.author_email {
            body["authorEmail"] = json!(email);
        }
        if let Some(ref parent) = options.parent_id {
            body["parentId"] = json!(parent);
        }
        self.post(url, body, Scope::Site).await
    }
}
