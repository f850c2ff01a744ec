//! One controller per resource family.
//!
//! Each pairs a [`SeriphClient`](seriph_api::SeriphClient) with a
//! [`StateStore`](crate::store::StateStore) and turns API calls into
//! `idle → loading → success | error` transitions.

pub mod announcements;
pub mod comments;
pub mod feedback;
pub mod form;
pub mod poll;
pub mod reactions;
pub mod subscribe;
pub mod view_counts;
pub mod waitlist;

pub use announcements::{AnnouncementsController, AnnouncementsData};
pub use comments::{CommentsController, CommentsData, PostOptions};
pub use feedback::{FeedbackController, FeedbackExtras};
pub use form::FormController;
pub use poll::{PollController, PollData};
pub use reactions::{ReactionsController, ReactionsData};
pub use subscribe::SubscribeController;
pub use view_counts::{ViewCountsController, ViewCountsData};
pub use waitlist::{WaitlistController, WaitlistData, WaitlistJoin};

/// Payload for controllers whose only result is a server message
/// (subscribe, form, feedback).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageData {
    pub message: Option<String>,
}
