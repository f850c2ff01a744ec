// Visitor identity seam.
//
// Anonymous actions (reactions, views, poll votes, dismissals) are
// attributed to an opaque per-visitor token. Resolution order:
// caller-supplied override, then the stored token, then a freshly
// generated UUID which is stored for next time.

use std::sync::RwLock;

use uuid::Uuid;

/// Source of the visitor token sent on visitor-scoped requests.
pub trait VisitorIdentityStore: Send + Sync {
    /// Current visitor token. Never empty.
    fn get(&self) -> String;

    /// Install a custom token (e.g. an authenticated user id), or `None`
    /// to fall back to the stored token.
    fn set(&self, id: Option<String>);
}

/// Generate a fresh opaque visitor token.
pub fn generate_visitor_id() -> String {
    Uuid::new_v4().to_string()
}

/// In-process store: the generated token lives as long as the store.
#[derive(Debug, Default)]
pub struct MemoryVisitorStore {
    custom: RwLock<Option<String>>,
    stored: RwLock<Option<String>>,
}

impl MemoryVisitorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a previously persisted token.
    pub fn with_stored(id: impl Into<String>) -> Self {
        Self {
            custom: RwLock::new(None),
            stored: RwLock::new(Some(id.into())),
        }
    }
}

impl VisitorIdentityStore for MemoryVisitorStore {
    fn get(&self) -> String {
        if let Some(id) = read_lock(&self.custom) {
            return id;
        }
        if let Some(id) = read_lock(&self.stored) {
            return id;
        }

        let mut stored = self
            .stored
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        stored.get_or_insert_with(generate_visitor_id).clone()
    }

    fn set(&self, id: Option<String>) {
        let id = id.filter(|v| !v.trim().is_empty());
        *self
            .custom
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = id;
    }
}

fn read_lock(lock: &RwLock<Option<String>>) -> Option<String> {
    lock.read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone()
}
