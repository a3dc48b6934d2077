//! In-memory Bookmark Store for Marksync.
//!
//! Reference implementation of `BookmarkStore` for the demo and integration
//! tests: one shared table of rows with owner-scoped row policies, assigning
//! identifiers and timestamps the way the hosted Store does, and publishing
//! every committed change to the feed hub.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::services::change_feed::LocalFeedHub;
use crate::services::store_client::BookmarkStore;
use crate::types::bookmark::{Bookmark, ADDRESS_MAX_LEN, TITLE_MAX_LEN};
use crate::types::errors::StoreError;
use crate::types::feed::FeedEvent;

struct TableState {
    rows: Mutex<Vec<Bookmark>>,
    hub: LocalFeedHub,
    // Monotonic created_at source; wall-clock millis alone can collide
    // across rapid inserts.
    stamp: AtomicI64,
}

/// A per-session handle onto the shared bookmark table.
///
/// Each handle carries the identity the session authenticated as; the row
/// policies are evaluated against it, never against the caller-supplied
/// `owner_id`.
pub struct InMemoryStore {
    table: Arc<TableState>,
    authenticated_user: String,
}

impl InMemoryStore {
    /// Create a fresh table and the first session handle onto it.
    pub fn new(hub: LocalFeedHub, authenticated_user: &str) -> Self {
        let now_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64;
        Self {
            table: Arc::new(TableState {
                rows: Mutex::new(Vec::new()),
                hub,
                stamp: AtomicI64::new(now_millis),
            }),
            authenticated_user: authenticated_user.to_string(),
        }
    }

    /// Another session's handle onto the same table, authenticated as
    /// `user_id`.
    pub fn handle_for(&self, user_id: &str) -> Self {
        Self {
            table: Arc::clone(&self.table),
            authenticated_user: user_id.to_string(),
        }
    }

    fn rows(&self) -> std::sync::MutexGuard<'_, Vec<Bookmark>> {
        self.table.rows.lock().expect("bookmark table lock poisoned")
    }
}

impl BookmarkStore for InMemoryStore {
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Bookmark>, StoreError> {
        // Row-level read policy: a session only ever sees its own rows.
        if owner_id != self.authenticated_user {
            return Err(StoreError::AccessDenied(
                "rows are readable by their owner only".to_string(),
            ));
        }
        let mut matching: Vec<Bookmark> = self
            .rows()
            .iter()
            .filter(|b| b.owner_id == owner_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn insert(
        &self,
        owner_id: &str,
        title: &str,
        url: &str,
    ) -> Result<Bookmark, StoreError> {
        // The caller-supplied owner is untrusted; re-derive from the
        // authenticated identity.
        if owner_id != self.authenticated_user {
            return Err(StoreError::AccessDenied(
                "owner does not match the authenticated user".to_string(),
            ));
        }
        if title.is_empty() || title.chars().count() > TITLE_MAX_LEN {
            return Err(StoreError::ConstraintViolation(
                "title is empty or too long".to_string(),
            ));
        }
        if url.is_empty() || url.chars().count() > ADDRESS_MAX_LEN {
            return Err(StoreError::ConstraintViolation(
                "url is empty or too long".to_string(),
            ));
        }

        let row = Bookmark {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            created_at: self.table.stamp.fetch_add(1, Ordering::SeqCst),
        };
        self.rows().push(row.clone());
        self.table.hub.publish(owner_id, FeedEvent::Insert(row.clone()));
        Ok(row)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let removed = {
            let mut rows = self.rows();
            match rows.iter().position(|b| b.id == id) {
                Some(idx) if rows[idx].owner_id == self.authenticated_user => {
                    Some(rows.remove(idx))
                }
                // Row-level delete policy: other users' rows are untouchable.
                Some(_) => {
                    return Err(StoreError::AccessDenied(
                        "rows are deletable by their owner only".to_string(),
                    ))
                }
                // Already gone; success either way.
                None => None,
            }
        };
        if let Some(row) = removed {
            self.table
                .hub
                .publish(&row.owner_id, FeedEvent::Delete { id: row.id });
        }
        Ok(())
    }
}
