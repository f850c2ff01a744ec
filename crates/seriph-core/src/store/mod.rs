// ── Observable state store ──
//
// One `StateStore<P>` per controller: the current `ControllerState<P>`
// lives in a `watch` channel (cheap `Arc` snapshots for async consumers)
// and every transition is pushed synchronously to registered listeners.

mod listeners;
mod sequencer;

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::error::CoreError;
use crate::stream::StateStream;
use listeners::ListenerRegistry;
use sequencer::Sequencer;

pub use listeners::Subscription;
pub use sequencer::{ResponseOrdering, Ticket};

// ── Status and state ─────────────────────────────────────────────

/// Lifecycle of the most recent action.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ControllerStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Snapshot handed to listeners and returned by `get_state()`.
///
/// `status == Error` exactly when `error` is `Some`. While `Loading`,
/// `data` still holds the last successful payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState<P> {
    pub status: ControllerStatus,
    pub data: P,
    pub error: Option<CoreError>,
}

impl<P> ControllerState<P> {
    pub fn idle(data: P) -> Self {
        Self {
            status: ControllerStatus::Idle,
            data,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == ControllerStatus::Loading
    }
}

// ── StateStore ───────────────────────────────────────────────────

/// State container shared by every controller.
///
/// Actions go through [`run`](Self::run) / [`run_latest`](Self::run_latest),
/// which produce exactly two transitions per call (loading, then success
/// or error) unless the response is discarded as stale.
pub struct StateStore<P: Clone + Send + Sync + 'static> {
    initial: P,
    state: watch::Sender<Arc<ControllerState<P>>>,
    listeners: Arc<ListenerRegistry<ControllerState<P>>>,
    sequencer: Sequencer,
}

impl<P: Clone + Send + Sync + 'static> StateStore<P> {
    /// Create an idle store. `initial` is also what `reset()` restores.
    pub fn new(initial: P) -> Self {
        let (state, _) = watch::channel(Arc::new(ControllerState::idle(initial.clone())));
        Self {
            initial,
            state,
            listeners: Arc::new(ListenerRegistry::new()),
            sequencer: Sequencer::new(ResponseOrdering::default()),
        }
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.sequencer.ordering()
    }

    pub fn set_ordering(&mut self, ordering: ResponseOrdering) {
        self.sequencer.set_ordering(ordering);
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Current state (cheap `Arc` clone, immutable to the caller).
    pub fn snapshot(&self) -> Arc<ControllerState<P>> {
        self.state.borrow().clone()
    }

    /// Register a listener invoked synchronously on every transition.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ControllerState<P>) + Send + Sync + 'static,
    {
        let id = self.listeners.insert(Arc::new(listener));
        Subscription::new(id, &self.listeners)
    }

    /// Async view of the state. Coalesces: a slow reader may skip
    /// intermediate states. Use [`subscribe`](Self::subscribe) to observe
    /// every transition.
    pub fn watch(&self) -> StateStream<P> {
        StateStream::new(self.state.subscribe())
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ── Actions ──────────────────────────────────────────────────

    /// Drive one incremental action (mutation) through the state machine.
    ///
    /// Sets `Loading` and notifies, awaits `request`, then on success lets
    /// `apply` merge the result into `data`, or on failure stores the error
    /// with `data` untouched. The same outcome is returned to the caller.
    pub async fn run<T, Fut, F>(&self, request: Fut, apply: F) -> Result<T, CoreError>
    where
        Fut: Future<Output = Result<T, seriph_api::Error>>,
        F: FnOnce(&mut P, &T),
    {
        let ticket = self.begin(None);
        self.finish(ticket, request.await, apply)
    }

    /// Like [`run`](Self::run), for reads that replace data wholesale.
    /// Under [`ResponseOrdering::LatestRequest`] a response is dropped if a
    /// newer request was issued on the same `lane` in the meantime.
    pub async fn run_latest<T, Fut, F>(
        &self,
        lane: &'static str,
        request: Fut,
        apply: F,
    ) -> Result<T, CoreError>
    where
        Fut: Future<Output = Result<T, seriph_api::Error>>,
        F: FnOnce(&mut P, &T),
    {
        let ticket = self.begin(Some(lane));
        self.finish(ticket, request.await, apply)
    }

    /// Enter `Loading` (clearing any error) and notify.
    pub fn begin(&self, lane: Option<&'static str>) -> Ticket {
        let ticket = self.sequencer.issue(lane);
        self.commit(|state| {
            state.status = ControllerStatus::Loading;
            state.error = None;
        });
        ticket
    }

    /// Settle an action begun with [`begin`](Self::begin).
    pub fn finish<T, F>(
        &self,
        ticket: Ticket,
        outcome: Result<T, seriph_api::Error>,
        apply: F,
    ) -> Result<T, CoreError>
    where
        F: FnOnce(&mut P, &T),
    {
        let outcome = outcome.map_err(CoreError::from);
        let applied = match &outcome {
            Ok(value) => self.commit_if_current(&ticket, |state| {
                apply(&mut state.data, value);
                state.status = ControllerStatus::Success;
                state.error = None;
            }),
            Err(err) => self.commit_if_current(&ticket, |state| {
                state.status = ControllerStatus::Error;
                state.error = Some(err.clone());
            }),
        };
        if !applied {
            debug!(?ticket, ok = outcome.is_ok(), "discarding stale response");
        }
        outcome
    }

    /// Local data change that does not touch status (e.g. clearing a
    /// client-side set). Notifies listeners.
    pub fn update(&self, f: impl FnOnce(&mut P)) {
        self.commit(|state| f(&mut state.data));
    }

    /// Back to `Idle` with the initial data. In-flight actions are
    /// invalidated unless ordering is `LastResolved`.
    pub fn reset(&self) {
        self.sequencer.invalidate();
        let initial = self.initial.clone();
        self.commit(|state| *state = ControllerState::idle(initial));
    }

    // ── Private helpers ──────────────────────────────────────────

    fn commit(&self, f: impl FnOnce(&mut ControllerState<P>)) {
        let mut installed = None;
        self.state.send_modify(|current| {
            installed = Some(install(current, f));
        });
        if let Some(next) = installed {
            self.notify(&next);
        }
    }

    fn commit_if_current(&self, ticket: &Ticket, f: impl FnOnce(&mut ControllerState<P>)) -> bool {
        let mut installed = None;
        self.state.send_if_modified(|current| {
            if !self.sequencer.is_current(ticket) {
                return false;
            }
            installed = Some(install(current, f));
            true
        });
        match installed {
            Some(next) => {
                self.notify(&next);
                true
            }
            None => false,
        }
    }

    /// Deliver exactly the state this commit installed.
    fn notify(&self, state: &ControllerState<P>) {
        trace!(status = %state.status, "state transition");
        self.listeners.notify(state);
    }
}

/// Copy-on-write step: build the next state from `current`, install it,
/// and hand back the installed `Arc`.
fn install<P: Clone>(
    current: &mut Arc<ControllerState<P>>,
    f: impl FnOnce(&mut ControllerState<P>),
) -> Arc<ControllerState<P>> {
    let mut next = (**current).clone();
    f(&mut next);
    let next = Arc::new(next);
    *current = Arc::clone(&next);
    next
}
