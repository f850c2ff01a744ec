//! Framework-agnostic observable controllers for Seriph widgets.
//!
//! Each controller wraps a [`SeriphClient`](seriph_api::SeriphClient), holds
//! one [`ControllerState`] and drives it through
//! `idle → loading → success | error` around every action. UI layers
//! either register synchronous listeners via
//! [`StatefulController::subscribe`] or await changes through
//! [`StateStream`].
//!
//! Overlapping reads are reconciled by [`ResponseOrdering`]: by default a
//! `fetch` response is dropped from state when a newer `fetch` was issued
//! on the same controller. The caller still receives its result.

pub mod controller;
pub mod controllers;
pub mod error;
pub mod store;
pub mod stream;

pub use controller::StatefulController;
pub use controllers::{
    AnnouncementsController, AnnouncementsData, CommentsController, CommentsData,
    FeedbackController, FeedbackExtras, FormController, MessageData, PollController, PollData,
    PostOptions, ReactionsController, ReactionsData, SubscribeController, ViewCountsController,
    ViewCountsData, WaitlistController, WaitlistData, WaitlistJoin,
};
pub use error::CoreError;
pub use store::{
    ControllerState, ControllerStatus, ResponseOrdering, StateStore, Subscription, Ticket,
};
pub use stream::{StateStream, StateWatchStream};

/// Everything a UI binding typically needs.
pub mod prelude {
    pub use crate::controller::StatefulController;
    pub use crate::controllers::{
        AnnouncementsController, CommentsController, FeedbackController, FeedbackExtras,
        FormController, PollController, PostOptions, ReactionsController, SubscribeController,
        ViewCountsController, WaitlistController, WaitlistJoin,
    };
    pub use crate::error::CoreError;
    pub use crate::store::{ControllerState, ControllerStatus, ResponseOrdering, Subscription};
    pub use seriph_api::{SeriphClient, SeriphConfig};
}
