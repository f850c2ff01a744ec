#![allow(clippy::unwrap_used)]
// Integration tests for `SeriphClient` using wiremock.

use std::sync::Arc;

use chrono::Utc;
use pretty_assertions::assert_eq;
use serde_json::{Map, json};
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use seriph_api::{
    Error, FeedbackType, FetchPostsOptions, JoinWaitlistOptions, MemoryVisitorStore,
    PostCommentOptions, SeriphClient, SeriphConfig, SubmitFeedbackOptions, SubmitFormOptions,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, SeriphClient) {
    let server = MockServer::start().await;
    let client = SeriphClient::builder(SeriphConfig::new("sk-test").with_endpoint(server.uri()))
        .visitor_store(Arc::new(MemoryVisitorStore::with_stored("visitor-1")))
        .build()
        .unwrap();
    (server, client)
}

fn post_json(slug: &str) -> serde_json::Value {
    json!({
        "id": format!("post-{slug}"),
        "title": "Hello",
        "slug": slug,
        "content": "# Hello",
        "tags": ["intro"],
        "publishedAt": "2025-03-01T12:00:00Z"
    })
}

// ── Headers ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_site_key_sent_without_visitor_on_site_scoped_calls() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/comments/home"))
        .and(header("X-Seriph-Key", "sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    client.fetch_comments("home").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("x-seriph-visitor").is_none());
}

#[tokio::test]
async fn test_visitor_token_sent_on_visitor_scoped_calls() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/views/home"))
        .and(header("X-Seriph-Key", "sk-test"))
        .and(header("X-Seriph-Visitor", "visitor-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pageId": "home", "views": 12, "uniqueVisitors": 5
        })))
        .mount(&server)
        .await;

    let counts = client.get_view_counts("home").await.unwrap();
    assert_eq!(counts.views, 12);
    assert_eq!(counts.unique_visitors, 5);
}

#[tokio::test]
async fn test_custom_visitor_id_overrides_stored() {
    let (server, client) = setup().await;
    client.set_visitor_id(Some("user-42".into()));

    Mock::given(method("POST"))
        .and(path("/api/v1/views/home"))
        .and(header("X-Seriph-Visitor", "user-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pageId": "home", "views": 13, "uniqueVisitors": 6, "isNewVisitor": true
        })))
        .mount(&server)
        .await;

    let recorded = client.record_view("home").await.unwrap();
    assert!(recorded.is_new_visitor);
    assert_eq!(recorded.views, 13);
}

// ── Comments ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_comments_parses_reply_tree() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/comments/%2Fblog%2Fhello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "c1",
            "pageId": "/blog/hello",
            "authorName": "Ada",
            "content": "First!",
            "createdAt": "2025-01-01T00:00:00Z",
            "replies": [{
                "id": "c2",
                "pageId": "/blog/hello",
                "parentId": "c1",
                "authorName": "Grace",
                "content": "Second",
                "createdAt": "2025-01-01T00:05:00Z",
                "replies": []
            }]
        }])))
        .mount(&server)
        .await;

    let comments = client.fetch_comments("/blog/hello").await.unwrap();

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].replies.len(), 1);
    assert_eq!(comments[0].replies[0].parent_id.as_deref(), Some("c1"));
}

#[tokio::test]
async fn test_post_comment_sends_optional_fields() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/comments/home"))
        .and(body_json(json!({
            "authorName": "Ada",
            "authorEmail": "ada@example.com",
            "content": "Nice post",
            "parentId": "c1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "c9",
            "pageId": "home",
            "parentId": "c1",
            "authorName": "Ada",
            "content": "Nice post",
            "createdAt": "2025-01-02T00:00:00Z"
        })))
        .mount(&server)
        .await;

    let comment = client
        .post_comment(&PostCommentOptions {
            page_id: "home".into(),
            author_name: "Ada".into(),
            author_email: Some("ada@example.com".into()),
            content: "Nice post".into(),
            parent_id: Some("c1".into()),
        })
        .await
        .unwrap();

    assert_eq!(comment.id, "c9");
    assert!(comment.replies.is_empty());
}

#[tokio::test]
async fn test_post_comment_validates_before_sending() {
    let (server, client) = setup().await;

    let result = client
        .post_comment(&PostCommentOptions {
            page_id: "home".into(),
            author_name: "Ada".into(),
            content: "   ".into(),
            ..PostCommentOptions::default()
        })
        .await;

    assert!(
        matches!(result, Err(Error::Validation { field: "content", .. })),
        "expected content validation error, got: {result:?}"
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ── Reactions ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_reaction_defaults_to_like() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/reactions/home"))
        .and(body_json(json!({ "reactionType": "like" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "reactionType": "like", "count": 4 })),
        )
        .mount(&server)
        .await;

    let update = client.add_reaction("home", None).await.unwrap();
    assert_eq!(update.reaction_type, "like");
    assert_eq!(update.count, 4);
}

#[tokio::test]
async fn test_remove_reaction_uses_delete() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/reactions/home"))
        .and(body_json(json!({ "reactionType": "heart" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "reactionType": "heart", "count": 0 })),
        )
        .mount(&server)
        .await;

    let update = client.remove_reaction("home", Some("heart")).await.unwrap();
    assert_eq!(update.count, 0);
}

#[tokio::test]
async fn test_fetch_reactions() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/reactions/home"))
        .and(header("X-Seriph-Visitor", "visitor-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pageId": "home",
            "counts": { "like": 3, "heart": 1 },
            "userReactions": ["like"]
        })))
        .mount(&server)
        .await;

    let reactions = client.fetch_reactions("home").await.unwrap();
    assert_eq!(reactions.counts.get("like"), Some(&3));
    assert_eq!(reactions.user_reactions, vec!["like".to_string()]);
}

// ── Posts ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_posts_applies_default_limit_and_tag() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/posts"))
        .and(query_param("limit", "500"))
        .and(query_param("tag", "rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([post_json("hello")])))
        .mount(&server)
        .await;

    let posts = client
        .fetch_posts(&FetchPostsOptions {
            tag: Some("rust".into()),
            limit: None,
        })
        .await
        .unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].slug, "hello");
    assert_eq!(posts[0].tags, vec!["intro".to_string()]);
}

#[tokio::test]
async fn test_fetch_post_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/posts/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(post_json("hello")))
        .mount(&server)
        .await;

    let post = client.fetch_post("hello").await.unwrap().unwrap();
    assert_eq!(post.title, "Hello");
    assert!(post.excerpt.is_none());
}

#[tokio::test]
async fn test_fetch_post_missing_returns_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/posts/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Post not found" })))
        .mount(&server)
        .await;

    let post = client.fetch_post("missing").await.unwrap();
    assert!(post.is_none());
}

#[tokio::test]
async fn test_fetch_post_server_error_is_not_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/posts/hello"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client.fetch_post("hello").await;
    assert!(matches!(result, Err(Error::Api { status: 500, .. })));
}

// ── Forms / subscribe / waitlist / feedback ─────────────────────────

#[tokio::test]
async fn test_submit_form_stamps_load_time() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/forms/contact/submit"))
        .and(body_partial_json(json!({ "data": { "name": "Ada" } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Thanks!" })),
        )
        .mount(&server)
        .await;

    let mut data = Map::new();
    data.insert("name".into(), json!("Ada"));

    let before = Utc::now().timestamp_millis();
    let resp = client
        .submit_form(SubmitFormOptions::new("contact", data))
        .await
        .unwrap();
    let after = Utc::now().timestamp_millis();

    assert!(resp.success);
    assert_eq!(resp.message, "Thanks!");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let stamped = body["formLoadTime"].as_i64().unwrap();
    assert!((before..=after).contains(&stamped));
}

#[tokio::test]
async fn test_submit_form_keeps_caller_load_time() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/forms/contact/submit"))
        .and(body_partial_json(json!({ "formLoadTime": 1_700_000_000_000_i64 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "" })),
        )
        .mount(&server)
        .await;

    let resp = client
        .submit_form(SubmitFormOptions::new("contact", Map::new()).with_load_time(1_700_000_000_000))
        .await
        .unwrap();
    assert!(resp.success);
}

#[tokio::test]
async fn test_subscribe_rejects_invalid_email() {
    let (_server, client) = setup().await;
    let result = client.subscribe("not-an-email").await;
    assert!(matches!(result, Err(Error::Validation { field: "email", .. })));
}

#[tokio::test]
async fn test_subscribe_surfaces_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/subscribe"))
        .and(body_json(json!({ "email": "ada@example.com" })))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "error": "Already subscribed" })),
        )
        .mount(&server)
        .await;

    let err = client.subscribe("ada@example.com").await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert!(err.to_string().contains("Already subscribed"));
}

#[tokio::test]
async fn test_join_waitlist_returns_position() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/waitlist"))
        .and(body_json(json!({
            "email": "ada@example.com",
            "name": "Ada",
            "source": "homepage"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "message": "You're in!", "position": 17
        })))
        .mount(&server)
        .await;

    let resp = client
        .join_waitlist(&JoinWaitlistOptions {
            email: "ada@example.com".into(),
            name: Some("Ada".into()),
            source: Some("homepage".into()),
        })
        .await
        .unwrap();

    assert_eq!(resp.position, Some(17));
}

#[tokio::test]
async fn test_submit_feedback_serializes_type() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/feedback"))
        .and(body_json(json!({
            "type": "bug",
            "content": "Button is broken",
            "pageUrl": "https://example.com/pricing"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "message": "Thanks" })),
        )
        .mount(&server)
        .await;

    let mut options = SubmitFeedbackOptions::new(FeedbackType::Bug, "Button is broken");
    options.page_url = Some("https://example.com/pricing".into());

    let resp = client.submit_feedback(&options).await.unwrap();
    assert!(resp.success);
}

// ── Polls / announcements ───────────────────────────────────────────

#[tokio::test]
async fn test_fetch_poll_and_vote() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/polls/favorite-lang"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "question": "Favorite language?",
            "options": [{ "id": "rust", "text": "Rust" }, { "id": "go", "text": "Go" }],
            "settings": { "multiSelect": false, "showResults": "after_vote" },
            "isActive": true,
            "results": { "rust": 10, "go": 4 },
            "totalVotes": 14
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/polls/favorite-lang/vote"))
        .and(body_json(json!({ "selectedOptions": ["rust"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true, "results": { "rust": 11, "go": 4 }, "totalVotes": 15
        })))
        .mount(&server)
        .await;

    let poll = client.fetch_poll("favorite-lang").await.unwrap();
    assert_eq!(poll.poll.options.len(), 2);
    assert!(poll.user_votes.is_none());

    let vote = client
        .vote_poll("favorite-lang", &["rust".to_string()])
        .await
        .unwrap();
    assert_eq!(vote.total_votes, 15);
    assert_eq!(vote.results.get("rust"), Some(&11));
}

#[tokio::test]
async fn test_vote_requires_an_option() {
    let (_server, client) = setup().await;
    let result = client.vote_poll("favorite-lang", &[]).await;
    assert!(matches!(
        result,
        Err(Error::Validation { field: "selected_options", .. })
    ));
}

#[tokio::test]
async fn test_dismiss_announcement_ignores_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/announcements/7/dismiss"))
        .and(header("X-Seriph-Visitor", "visitor-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.dismiss_announcement(7).await.unwrap();
}

#[tokio::test]
async fn test_malformed_json_is_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/announcements"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.fetch_announcements().await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

#[tokio::test]
async fn test_network_failure_is_transport_error() {
    let client = SeriphClient::new(SeriphConfig::new("sk-test").with_endpoint("http://127.0.0.1:9"))
        .unwrap();
    let result = client.fetch_announcements().await;
    assert!(matches!(result, Err(Error::Transport(_))));
}
