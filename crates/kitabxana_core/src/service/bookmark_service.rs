//! Bookmark/favorites store.
//!
//! # Responsibility
//! - Track bookmarked entity ids per content kind.
//! - Publish a change event for every effective mutation.
//!
//! # Invariants
//! - Set semantics per kind: no duplicates, inserting twice is a no-op.
//! - Removing an absent id changes nothing and publishes nothing.
//! - Ids are never validated against the catalog; stale ids are resolved away
//!   by readers (see `Catalog::resolve_*`).

use crate::events::{ChangeFeed, StateChange};
use crate::model::content::{ContentKind, EntityId};
use crate::repo::bookmark_repo::BookmarkRepository;
use crate::repo::RepoResult;
use log::{debug, info};
use std::collections::BTreeSet;
use std::sync::mpsc::Receiver;

/// In-memory bookmark sets for one user session.
#[derive(Debug, Default)]
pub struct BookmarkStore {
    books: BTreeSet<EntityId>,
    hadiths: BTreeSet<EntityId>,
    ayahs: BTreeSet<EntityId>,
    feed: ChangeFeed,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from previously saved sets, e.g. a repository load.
    pub fn from_sets(
        books: BTreeSet<EntityId>,
        hadiths: BTreeSet<EntityId>,
        ayahs: BTreeSet<EntityId>,
    ) -> Self {
        Self {
            books,
            hadiths,
            ayahs,
            feed: ChangeFeed::new(),
        }
    }

    /// Loads every saved bookmark through `repo`.
    pub fn load_from<R: BookmarkRepository>(repo: &R) -> RepoResult<Self> {
        let mut store = Self::new();
        for (kind, id) in repo.load_all()? {
            store.set_mut(kind).insert(id);
        }
        info!(
            "event=bookmarks_load module=bookmarks status=ok books={} hadiths={} ayahs={}",
            store.books.len(),
            store.hadiths.len(),
            store.ayahs.len()
        );
        Ok(store)
    }

    /// Writes every kind's set through `repo`, replacing what was stored.
    pub fn save_to<R: BookmarkRepository>(&self, repo: &R) -> RepoResult<()> {
        for kind in ContentKind::ALL {
            repo.replace(kind, self.set(kind))?;
        }
        Ok(())
    }

    pub fn subscribe(&mut self) -> Receiver<StateChange> {
        self.feed.subscribe()
    }

    /// Flips membership of `id` and returns the resulting state.
    pub fn toggle(&mut self, kind: ContentKind, id: &str) -> bool {
        let set = self.set_mut(kind);
        let bookmarked = if set.remove(id) {
            false
        } else {
            set.insert(id.to_string());
            true
        };

        debug!(
            "event=bookmark_toggle module=bookmarks status=ok kind={} bookmarked={}",
            kind.as_str(),
            bookmarked
        );
        self.feed.publish(StateChange::BookmarkToggled {
            kind,
            id: id.to_string(),
            bookmarked,
        });
        bookmarked
    }

    pub fn is_bookmarked(&self, kind: ContentKind, id: &str) -> bool {
        self.set(kind).contains(id)
    }

    /// Snapshot of one kind's set.
    pub fn all(&self, kind: ContentKind) -> BTreeSet<EntityId> {
        self.set(kind).clone()
    }

    pub fn count(&self, kind: ContentKind) -> usize {
        self.set(kind).len()
    }

    /// Removes `id` if present. Returns whether anything was removed.
    pub fn remove(&mut self, kind: ContentKind, id: &str) -> bool {
        if !self.set_mut(kind).remove(id) {
            return false;
        }

        debug!(
            "event=bookmark_remove module=bookmarks status=ok kind={}",
            kind.as_str()
        );
        self.feed.publish(StateChange::BookmarkRemoved {
            kind,
            id: id.to_string(),
        });
        true
    }

    fn set(&self, kind: ContentKind) -> &BTreeSet<EntityId> {
        match kind {
            ContentKind::Book => &self.books,
            ContentKind::Hadith => &self.hadiths,
            ContentKind::Ayah => &self.ayahs,
        }
    }

    fn set_mut(&mut self, kind: ContentKind) -> &mut BTreeSet<EntityId> {
        match kind {
            ContentKind::Book => &mut self.books,
            ContentKind::Hadith => &mut self.hadiths,
            ContentKind::Ayah => &mut self.ayahs,
        }
    }
}
