//! Async Rust client for the Seriph widgets API.
//!
//! One inherent method on [`SeriphClient`] per remote operation: comments,
//! reactions, polls, announcements, view counts, forms, waitlist signups,
//! newsletter subscriptions, feedback, and blog posts. Every call is a single
//! request/response cycle: no retries, no caching.
//!
//! Two seams are pluggable:
//!
//! - [`HttpTransport`]: how requests reach the network. [`ReqwestTransport`]
//!   is the default.
//! - [`VisitorIdentityStore`]: where the anonymous visitor token lives.
//!   [`MemoryVisitorStore`] is the default; `seriph-config` ships a
//!   file-backed store.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;
pub mod visitor;

pub use client::{ClientBuilder, SeriphClient};
pub use config::{API_PATH, DEFAULT_ENDPOINT, SeriphConfig, VISITOR_STORAGE_KEY, build_url};
pub use endpoints::comments::PostCommentOptions;
pub use endpoints::feedback::SubmitFeedbackOptions;
pub use endpoints::forms::SubmitFormOptions;
pub use endpoints::posts::{DEFAULT_POSTS_LIMIT, FetchPostsOptions};
pub use endpoints::reactions::DEFAULT_REACTION;
pub use endpoints::waitlist::JoinWaitlistOptions;
pub use error::Error;
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport, TransportConfig,
};
pub use types::*;
pub use visitor::{MemoryVisitorStore, VisitorIdentityStore, generate_visitor_id};
