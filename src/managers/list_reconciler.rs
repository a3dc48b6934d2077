//! List Reconciler for Marksync.
//!
//! Maintains one deduplicated, newest-first bookmark list per session,
//! merging the server-seeded snapshot, local optimistic mutations, and
//! asynchronous change-feed notifications.

use crate::types::bookmark::Bookmark;

/// Trait defining the reconciler interface.
pub trait ListReconcilerTrait {
    fn seed(&mut self, snapshot: Vec<Bookmark>);
    fn apply_insert(&mut self, bookmark: Bookmark) -> bool;
    fn apply_delete(&mut self, id: &str) -> bool;
    fn bookmarks(&self) -> &[Bookmark];
    fn contains(&self, id: &str) -> bool;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

/// In-memory reconciler holding the session's visible bookmark list.
///
/// It cannot fail: every operation is a pure in-memory mutation, and calls
/// that would produce a duplicate or touch an absent row are no-ops.
pub struct ListReconciler {
    entries: Vec<Bookmark>,
}

impl ListReconciler {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl Default for ListReconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl ListReconcilerTrait for ListReconciler {
    /// Replace the view with the Store's current rows, already newest-first.
    fn seed(&mut self, snapshot: Vec<Bookmark>) {
        self.entries = snapshot;
    }

    /// Insert a bookmark at the front of the view.
    ///
    /// No-op when a bookmark with the same identifier is already present;
    /// returns whether the view changed. Dedup-by-identifier is the sole
    /// defense against a local optimistic add being echoed back by the
    /// change feed, and it also absorbs out-of-order arrival of feed events
    /// relative to the optimistic add.
    fn apply_insert(&mut self, bookmark: Bookmark) -> bool {
        if self.contains(&bookmark.id) {
            return false;
        }
        self.entries.insert(0, bookmark);
        true
    }

    /// Remove the bookmark with the given identifier, if present.
    ///
    /// No-op when absent: a concurrent delete may already have removed the
    /// row, or a feed event may arrive after local optimistic removal.
    fn apply_delete(&mut self, id: &str) -> bool {
        match self.entries.iter().position(|b| b.id == id) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    fn bookmarks(&self) -> &[Bookmark] {
        &self.entries
    }

    fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|b| b.id == id)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
