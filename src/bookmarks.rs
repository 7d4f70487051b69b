// src/bookmarks.rs
//! Bookmark store: article snapshots saved by the user, persisted as one
//! JSON array and kept in sync across store instances through a watch
//! channel (the analog of another tab's storage change event).

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tokio::sync::watch;

use crate::article::Article;
use crate::error::StoreError;

pub struct BookmarkStore {
    inner: Mutex<Vec<Article>>,
    path: PathBuf,
    notify: watch::Sender<Vec<Article>>,
}

impl BookmarkStore {
    /// Open the store, loading whatever was last persisted. A missing or
    /// unreadable file starts the store empty.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let initial: Vec<Article> = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = ?e, path = %path.display(), "bookmark file unreadable, starting empty");
                Vec::new()
            }),
            Err(_) => Vec::new(),
        };
        let (notify, _) = watch::channel(initial.clone());
        Self {
            inner: Mutex::new(initial),
            path,
            notify,
        }
    }

    /// Save an article snapshot. Re-adding an id replaces the stored
    /// snapshot in place.
    pub fn add(&self, article: Article) {
        let snapshot = {
            let mut v = self.inner.lock().expect("bookmark mutex poisoned");
            match v.iter_mut().find(|a| a.id == article.id) {
                Some(existing) => *existing = article,
                None => v.push(article),
            }
            v.clone()
        };
        self.persist_and_notify(snapshot);
    }

    pub fn remove(&self, id: impl AsRef<str>) {
        let id = id.as_ref();
        let snapshot = {
            let mut v = self.inner.lock().expect("bookmark mutex poisoned");
            v.retain(|a| a.id != id);
            v.clone()
        };
        self.persist_and_notify(snapshot);
    }

    pub fn is_bookmarked(&self, id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        self.inner
            .lock()
            .expect("bookmark mutex poisoned")
            .iter()
            .any(|a| a.id == id)
    }

    pub fn list(&self) -> Vec<Article> {
        self.inner.lock().expect("bookmark mutex poisoned").clone()
    }

    /// Subscribe to set changes; receivers see each persisted snapshot in
    /// delivery order.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Article>> {
        self.notify.subscribe()
    }

    /// Replace the in-memory set with a snapshot that arrived from
    /// another store instance over the change channel. Not re-persisted:
    /// the sender already wrote it.
    pub fn apply_external(&self, snapshot: Vec<Article>) {
        {
            let mut v = self.inner.lock().expect("bookmark mutex poisoned");
            *v = snapshot.clone();
        }
        let _ = self.notify.send(snapshot);
    }

    fn persist_and_notify(&self, snapshot: Vec<Article>) {
        // A failed write is logged and the in-memory set stands; no retry.
        if let Err(e) = self.persist(&snapshot) {
            tracing::warn!(error = ?e, path = %self.path.display(), "persisting bookmarks failed");
        }
        let _ = self.notify.send(snapshot);
    }

    fn persist(&self, snapshot: &[Article]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(snapshot)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}
