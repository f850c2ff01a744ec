use seriph_api::{Comment, PostCommentOptions, SeriphClient};
use tracing::debug;

use crate::controller::stateful_controller;
use crate::error::CoreError;
use crate::store::StateStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentsData {
    /// Top-level comments, replies nested under `replies`.
    pub comments: Vec<Comment>,
}

impl CommentsData {
    /// Thread `comment` under `parent_id`, or append it at the root when
    /// there is no parent or the parent is not in the local tree.
    fn insert(&mut self, comment: Comment, parent_id: Option<&str>) {
        let parent = parent_id.and_then(|id| find_mut(&mut self.comments, id));
        match parent {
            Some(parent) => parent.replies.push(comment),
            None => {
                if let Some(id) = parent_id {
                    debug!(parent_id = id, "parent comment not loaded, appending at root");
                }
                self.comments.push(comment);
            }
        }
    }
}

fn find_mut<'a>(comments: &'a mut [Comment], id: &str) -> Option<&'a mut Comment> {
    for comment in comments {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find_mut(&mut comment.replies, id) {
            return Some(found);
        }
    }
    None
}

/// Optional fields for [`CommentsController::post`].
#[derive(Debug, Clone, Default)]
pub struct PostOptions {
    pub author_email: Option<String>,
    pub parent_id: Option<String>,
}

/// Comment thread for one page.
pub struct CommentsController {
    client: SeriphClient,
    page_id: String,
    store: StateStore<CommentsData>,
}

stateful_controller!(CommentsController, CommentsData);

impl CommentsController {
    pub fn new(client: SeriphClient, page_id: impl Into<String>) -> Self {
        Self {
            client,
            page_id: page_id.into(),
            store: StateStore::new(CommentsData::default()),
        }
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    pub async fn fetch(&self) -> Result<Vec<Comment>, CoreError> {
        self.store
            .run_latest(
                "fetch",
                self.client.fetch_comments(&self.page_id),
                |data, comments: &Vec<Comment>| data.comments.clone_from(comments),
            )
            .await
    }

    pub async fn post(
        &self,
        author_name: &str,
        content: &str,
        options: PostOptions,
    ) -> Result<Comment, CoreError> {
        let requested_parent = options.parent_id.clone();
        let request = PostCommentOptions {
            page_id: self.page_id.clone(),
            author_name: author_name.to_owned(),
            author_email: options.author_email,
            content: content.to_owned(),
            parent_id: options.parent_id,
        };
        self.store
            .run(
                self.client.post_comment(&request),
                |data, comment: &Comment| {
                    let parent = comment
                        .parent_id
                        .as_deref()
                        .or(requested_parent.as_deref());
                    data.insert(comment.clone(), parent);
                },
            )
            .await
    }
}
