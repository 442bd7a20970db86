//! Durable set of bookmarked article URLs.

mod store;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore};

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

/// Key under which the bookmarked URL list is persisted.
pub const BOOKMARKS_KEY: &str = "bookmarkedArticles";

/// Load/save of the bookmarked URL set over a [`KeyValueStore`].
///
/// Bookmarks are a convenience feature: neither operation fails. A broken store is
/// logged and the feed degrades to session-only bookmarks: the last known set is kept
/// in memory and served when the backing store cannot be read.
///
/// While the store is unreadable, saves only update the session copy. A set built on
/// top of a failed read never overwrites the durable list.
#[derive(Clone)]
pub struct BookmarkStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    session: Arc<Mutex<Session>>,
}

#[derive(Debug, Default)]
struct Session {
    /// Last set read from or written through this handle.
    known: Option<BTreeSet<String>>,
    /// Set when the most recent read failed; cleared by the next successful read.
    degraded: bool,
}

impl std::fmt::Debug for BookmarkStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookmarkStore").field("key", &self.key).finish_non_exhaustive()
    }
}

impl BookmarkStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: BOOKMARKS_KEY.to_string(),
            session: Arc::new(Mutex::new(Session::default())),
        }
    }

    /// A store that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Persist under a key other than [`BOOKMARKS_KEY`].
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// The persisted URL set; empty when nothing was saved.
    ///
    /// When the store is unreadable this falls back to the last set known in this
    /// session (or the empty set).
    #[must_use]
    pub fn load(&self) -> BTreeSet<String> {
        let read = self.store.get_string_list(&self.key);
        let mut session = self.session();
        match read {
            Ok(urls) => {
                let urls: BTreeSet<String> = urls.unwrap_or_default().into_iter().collect();
                session.known = Some(urls.clone());
                session.degraded = false;
                urls
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to load bookmarks");
                session.degraded = true;
                session.known.clone().unwrap_or_default()
            }
        }
    }

    /// Replace the persisted URL set. Failures are logged and swallowed.
    ///
    /// After a failed [`load`](Self::load) the set is kept for this session only.
    pub fn save(&self, urls: &BTreeSet<String>) {
        let degraded = {
            let mut session = self.session();
            session.known = Some(urls.clone());
            session.degraded
        };
        if degraded {
            warn!(key = %self.key, "bookmark store unreadable, keeping bookmarks for this session only");
            return;
        }
        let list: Vec<String> = urls.iter().cloned().collect();
        if let Err(e) = self.store.set_string_list(&self.key, &list) {
            warn!(key = %self.key, error = %e, "failed to save bookmarks");
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
