// File-backed visitor identity.
//
// The generated token is written to a small file so the same visitor is
// recognised across process restarts. A caller override lives in memory
// only.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use directories::ProjectDirs;
use seriph_api::{VISITOR_STORAGE_KEY, VisitorIdentityStore, generate_visitor_id};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct FileVisitorStore {
    path: PathBuf,
    custom: RwLock<Option<String>>,
    cached: RwLock<Option<String>>,
}

impl FileVisitorStore {
    /// Store the token at `path`. Nothing is read until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            custom: RwLock::new(None),
            cached: RwLock::new(None),
        }
    }

    /// Store the token in the platform data directory.
    pub fn in_data_dir() -> Option<Self> {
        ProjectDirs::from("xyz", "seriph", "seriph")
            .map(|dirs| Self::new(dirs.data_dir().join(VISITOR_STORAGE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let id = raw.trim();
        (!id.is_empty()).then(|| id.to_owned())
    }

    fn persist(&self, id: &str) {
        let result = self
            .path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| fs::write(&self.path, id));
        match result {
            Ok(()) => debug!(path = %self.path.display(), "stored new visitor id"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to persist visitor id"),
        }
    }
}

impl VisitorIdentityStore for FileVisitorStore {
    fn get(&self) -> String {
        if let Some(id) = read(&self.custom) {
            return id;
        }
        if let Some(id) = read(&self.cached) {
            return id;
        }

        let mut cached = self.cached.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(id) = cached.as_ref() {
            return id.clone();
        }
        let id = self.load().unwrap_or_else(|| {
            let id = generate_visitor_id();
            self.persist(&id);
            id
        });
        *cached = Some(id.clone());
        id
    }

    fn set(&self, id: Option<String>) {
        let id = id.filter(|v| !v.trim().is_empty());
        *self.custom.write().unwrap_or_else(PoisonError::into_inner) = id;
    }
}

fn read(lock: &RwLock<Option<String>>) -> Option<String> {
    lock.read().unwrap_or_else(PoisonError::into_inner).clone()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_survives_a_new_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(VISITOR_STORAGE_KEY);

        let first = FileVisitorStore::new(&path).get();
        assert!(!first.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), first);

        let second = FileVisitorStore::new(&path).get();
        assert_eq!(first, second);
    }

    #[test]
    fn override_wins_without_touching_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(VISITOR_STORAGE_KEY);
        fs::write(&path, "stored-id\n").unwrap();

        let store = FileVisitorStore::new(&path);
        assert_eq!(store.get(), "stored-id");

        store.set(Some("user-42".into()));
        assert_eq!(store.get(), "user-42");
        store.set(Some("  ".into()));
        assert_eq!(store.get(), "stored-id");
        assert_eq!(fs::read_to_string(&path).unwrap(), "stored-id\n");
    }

    #[test]
    fn unwritable_path_still_yields_a_stable_id() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the parent directory should be.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let store = FileVisitorStore::new(blocker.join(VISITOR_STORAGE_KEY));

        let id = store.get();
        assert_eq!(store.get(), id);
    }
}
