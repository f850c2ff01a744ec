// ── Listener registry ──
//
// Arena of callbacks keyed by a monotonically increasing id. Removal is
// O(1) and idempotent; delivery iterates a snapshot taken before the
// first callback runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;

pub(crate) type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

pub(crate) struct ListenerRegistry<S: 'static> {
    next_id: AtomicU64,
    listeners: DashMap<u64, Listener<S>>,
}

impl<S: 'static> ListenerRegistry<S> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            listeners: DashMap::new(),
        }
    }

    pub(crate) fn insert(&self, listener: Listener<S>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.insert(id, listener);
        id
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Invoke every listener registered before this call, in registration
    /// order. Listeners added while delivering are not called for this
    /// state; listeners removed while delivering are skipped.
    pub(crate) fn notify(&self, state: &S) {
        let mut batch: Vec<(u64, Listener<S>)> = self
            .listeners
            .iter()
            .map(|entry| (*entry.key(), Arc::clone(entry.value())))
            .collect();
        batch.sort_unstable_by_key(|(id, _)| *id);

        for (id, listener) in batch {
            if self.listeners.contains_key(&id) {
                listener(state);
            }
        }
    }
}

/// Type-erased removal so [`Subscription`] need not carry the state type.
trait Unsubscribe: Send + Sync {
    fn remove(&self, id: u64) -> bool;
    fn contains(&self, id: u64) -> bool;
}

impl<S: 'static> Unsubscribe for ListenerRegistry<S> {
    fn remove(&self, id: u64) -> bool {
        self.listeners.remove(&id).is_some()
    }

    fn contains(&self, id: u64) -> bool {
        self.listeners.contains_key(&id)
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping the handle does NOT unsubscribe; call
/// [`unsubscribe()`](Self::unsubscribe). Calling it more than once is a
/// no-op.
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Unsubscribe>,
}

impl Subscription {
    pub(crate) fn new<S: 'static>(id: u64, registry: &Arc<ListenerRegistry<S>>) -> Self {
        let weak: Weak<ListenerRegistry<S>> = Arc::downgrade(registry);
        let registry: Weak<dyn Unsubscribe> = weak;
        Self { id, registry }
    }

    /// Remove the listener. Returns `true` only on the call that actually
    /// removed it.
    pub fn unsubscribe(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.remove(self.id))
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.id))
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
