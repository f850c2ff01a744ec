// ── Controller contract ──
//
// Every controller owns one `StateStore` and exposes the same read and
// subscription surface over it. Action methods stay inherent, since
// their signatures differ per resource.

use std::sync::Arc;

use crate::store::{ControllerState, StateStore, Subscription};
use crate::stream::StateStream;

/// Uniform observable surface shared by all controllers.
pub trait StatefulController {
    /// Resource-specific payload carried next to `status` and `error`.
    type Data: Clone + Send + Sync + 'static;

    fn store(&self) -> &StateStore<Self::Data>;

    /// Synchronous snapshot of the current state.
    fn get_state(&self) -> Arc<ControllerState<Self::Data>> {
        self.store().snapshot()
    }

    /// Register a listener for every state transition. The returned handle
    /// removes exactly this registration.
    fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ControllerState<Self::Data>) + Send + Sync + 'static,
    {
        self.store().subscribe(listener)
    }

    /// Async stream of state snapshots (may coalesce transitions).
    fn watch(&self) -> StateStream<Self::Data> {
        self.store().watch()
    }
}

/// Implements [`StatefulController`] and `with_ordering` for a controller
/// struct with a `store` field.
macro_rules! stateful_controller {
    ($controller:ty, $data:ty) => {
        impl $crate::controller::StatefulController for $controller {
            type Data = $data;

            fn store(&self) -> &$crate::store::StateStore<$data> {
                &self.store
            }
        }

        impl $controller {
            /// Choose how overlapping responses are reconciled.
            #[must_use]
            pub fn with_ordering(mut self, ordering: $crate::store::ResponseOrdering) -> Self {
                self.store.set_ordering(ordering);
                self
            }
        }
    };
}

pub(crate) use stateful_controller;
