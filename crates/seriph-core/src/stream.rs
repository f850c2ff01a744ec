// ── Async state observation ──
//
// The watch channel behind every `StateStore` only keeps the newest
// snapshot. Awaiting it is cheap, but a consumer that falls behind sees
// the latest state, not each transition in between. Listeners registered
// with `subscribe` are the lossless path.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::ControllerState;

/// Async handle on one controller's state, returned by `watch()`.
///
/// Transitions may be coalesced: after `loading → success` completes
/// between two polls, only the `success` snapshot is observed.
pub struct StateStream<P: Clone + Send + Sync + 'static> {
    seen: Arc<ControllerState<P>>,
    receiver: watch::Receiver<Arc<ControllerState<P>>>,
}

impl<P: Clone + Send + Sync + 'static> StateStream<P> {
    pub(crate) fn new(receiver: watch::Receiver<Arc<ControllerState<P>>>) -> Self {
        let seen = receiver.borrow().clone();
        Self { seen, receiver }
    }

    /// Last snapshot this handle observed: the state at `watch()` time
    /// until [`changed`](Self::changed) returns.
    pub fn current(&self) -> &Arc<ControllerState<P>> {
        &self.seen
    }

    /// Newest snapshot held by the controller, without marking it seen.
    pub fn latest(&self) -> Arc<ControllerState<P>> {
        self.receiver.borrow().clone()
    }

    /// Resolve once the controller has committed a state this handle has
    /// not observed yet. `None` after the controller is dropped.
    pub async fn changed(&mut self) -> Option<Arc<ControllerState<P>>> {
        self.receiver.changed().await.ok()?;
        self.seen = self.receiver.borrow_and_update().clone();
        Some(Arc::clone(&self.seen))
    }

    /// `Stream` of snapshots. The first item is the state at the time of
    /// the call (`idle` for a fresh controller); later items follow
    /// commits, coalesced as above. Ends when the controller is dropped.
    pub fn into_stream(self) -> StateWatchStream<P> {
        StateWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// [`Stream`] returned by [`StateStream::into_stream`].
pub struct StateWatchStream<P: Clone + Send + Sync + 'static> {
    inner: WatchStream<Arc<ControllerState<P>>>,
}

impl<P: Clone + Send + Sync + 'static> Stream for StateWatchStream<P> {
    type Item = Arc<ControllerState<P>>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
