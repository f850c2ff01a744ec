//! Wire types for the Seriph API.
//!
//! All types match the JSON bodies under `/api/v1/`. Field names use
//! camelCase via `#[serde(rename_all = "camelCase")]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Generic acknowledgements ─────────────────────────────────────────

/// `{ success, message }` acknowledgement used by form-like endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

pub type FormSubmitResponse = Acknowledgement;
pub type SubscribeResponse = Acknowledgement;
pub type SubmitFeedbackResponse = Acknowledgement;

// ── Comments ─────────────────────────────────────────────────────────

/// A comment and its (possibly empty) reply tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub page_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub author_name: String,
    pub content: String,
    /// ISO 8601 date-time.
    pub created_at: String,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

// ── Reactions ────────────────────────────────────────────────────────

/// Reaction counts plus the types the current visitor has added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchReactionsResponse {
    pub page_id: String,
    #[serde(default)]
    pub counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub user_reactions: Vec<String>,
}

/// Server-side count for one reaction type after an add or remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionUpdate {
    pub reaction_type: String,
    pub count: u64,
}

// ── Posts ────────────────────────────────────────────────────────────

/// A published blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    /// Post content as Markdown.
    pub content: String,
    /// Raw TipTap/ProseMirror JSON content, for custom rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub published_at: String,
}

// ── Waitlist ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinWaitlistResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    /// Position in the waitlist, if the site chooses to show it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
}

// ── View counts ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCounts {
    pub page_id: String,
    pub views: u64,
    pub unique_visitors: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordViewResponse {
    pub page_id: String,
    pub views: u64,
    pub unique_visitors: u64,
    pub is_new_visitor: bool,
}

impl From<RecordViewResponse> for ViewCounts {
    fn from(r: RecordViewResponse) -> Self {
        Self {
            page_id: r.page_id,
            views: r.views,
            unique_visitors: r.unique_visitors,
        }
    }
}

// ── Feedback ─────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FeedbackType {
    Bug,
    Feature,
    General,
}

// ── Polls ────────────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShowResultsMode {
    Always,
    AfterVote,
    AfterEnd,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollSettings {
    pub multi_select: bool,
    pub show_results: ShowResultsMode,
}

/// Poll definition as configured on the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: i64,
    pub question: String,
    pub options: Vec<PollOption>,
    pub settings: PollSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<String>,
    pub is_active: bool,
}

/// A poll with its current tallies and the visitor's own votes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollWithResults {
    #[serde(flatten)]
    pub poll: Poll,
    #[serde(default)]
    pub results: BTreeMap<String, u64>,
    #[serde(default)]
    pub total_votes: u64,
    /// Options the current visitor has voted for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_votes: Option<Vec<String>>,
}

impl PollWithResults {
    /// Each option's text with its tally, in display order.
    pub fn tallies(&self) -> Vec<(&str, u64)> {
        self.poll
            .options
            .iter()
            .map(|o| (o.text.as_str(), self.results.get(&o.id).copied().unwrap_or(0)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotePollResponse {
    pub success: bool,
    #[serde(default)]
    pub results: BTreeMap<String, u64>,
    #[serde(default)]
    pub total_votes: u64,
}

// ── Announcements ────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AnnouncementType {
    Info,
    Warning,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: i64,
    pub content: String,
    pub announcement_type: AnnouncementType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_text: Option<String>,
    pub is_dismissible: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use serde_json::json;

    use super::*;

    #[test]
    fn comment_replies_default_to_empty() {
        let c: Comment = serde_json::from_value(json!({
            "id": "c1",
            "pageId": "home",
            "authorName": "Ada",
            "content": "hi",
            "createdAt": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(c.replies.is_empty());
        assert!(c.parent_id.is_none());
    }

    #[test]
    fn poll_settings_use_snake_case_modes() {
        let s: PollSettings =
            serde_json::from_value(json!({ "multiSelect": true, "showResults": "after_vote" }))
                .unwrap();
        assert_eq!(s.show_results, ShowResultsMode::AfterVote);
        assert_eq!(ShowResultsMode::from_str("after_end").unwrap(), ShowResultsMode::AfterEnd);
    }

    #[test]
    fn feedback_type_round_trips_through_strum() {
        assert_eq!(FeedbackType::Bug.to_string(), "bug");
        assert_eq!(FeedbackType::from_str("feature").unwrap(), FeedbackType::Feature);
        assert!(FeedbackType::from_str("rant").is_err());
    }

    #[test]
    fn poll_with_results_flattens_the_poll_definition() {
        let p: PollWithResults = serde_json::from_value(json!({
            "id": 9,
            "question": "Tabs or spaces?",
            "options": [{ "id": "a", "text": "Tabs" }, { "id": "b", "text": "Spaces" }],
            "settings": { "multiSelect": false, "showResults": "always" },
            "isActive": true,
            "results": { "b": 4 },
            "totalVotes": 4
        }))
        .unwrap();
        assert_eq!(p.poll.id, 9);
        assert_eq!(p.poll.question, "Tabs or spaces?");
        assert!(p.user_votes.is_none());
        assert_eq!(p.tallies(), vec![("Tabs", 0), ("Spaces", 4)]);

        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["question"], "Tabs or spaces?");
        assert!(back.get("poll").is_none());
    }

    #[test]
    fn record_view_narrows_to_counts() {
        let r = RecordViewResponse {
            page_id: "home".into(),
            views: 10,
            unique_visitors: 4,
            is_new_visitor: true,
        };
        let counts = ViewCounts::from(r);
        assert_eq!(counts.views, 10);
        assert_eq!(counts.unique_visitors, 4);
    }
}
