//! Unit tests for the in-memory Store's row policies.
//!
//! The Store treats the caller-supplied owner as untrusted and evaluates
//! every operation against the handle's authenticated user, mirroring the
//! row-level policies of the hosted table.

use marksync::services::change_feed::LocalFeedHub;
use marksync::services::memory_store::InMemoryStore;
use marksync::services::store_client::BookmarkStore;
use marksync::types::bookmark::TITLE_MAX_LEN;
use marksync::types::errors::StoreError;

#[tokio::test]
async fn test_insert_rejects_mismatched_owner() {
    let store = InMemoryStore::new(LocalFeedHub::new(), "alice");

    let err = store
        .insert("mallory", "Docs", "https://example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::AccessDenied(_)));
    assert!(store.list_by_owner("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reads_are_scoped_to_the_authenticated_user() {
    let store = InMemoryStore::new(LocalFeedHub::new(), "alice");
    store
        .insert("alice", "Docs", "https://example.com")
        .await
        .unwrap();

    // Alice sees her row; a request for someone else's rows is refused
    assert_eq!(store.list_by_owner("alice").await.unwrap().len(), 1);
    let err = store.list_by_owner("mallory").await.unwrap_err();
    assert!(matches!(err, StoreError::AccessDenied(_)));

    // Mallory's own handle onto the same table sees nothing of Alice's
    let mallory = store.handle_for("mallory");
    assert!(mallory.list_by_owner("mallory").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_of_foreign_row_is_denied() {
    let store = InMemoryStore::new(LocalFeedHub::new(), "alice");
    let row = store
        .insert("alice", "Docs", "https://example.com")
        .await
        .unwrap();

    let mallory = store.handle_for("mallory");
    let err = mallory.delete_by_id(&row.id).await.unwrap_err();

    assert!(matches!(err, StoreError::AccessDenied(_)));
    assert_eq!(store.list_by_owner("alice").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_of_absent_row_succeeds() {
    let store = InMemoryStore::new(LocalFeedHub::new(), "alice");
    store.delete_by_id("never-existed").await.unwrap();
}

#[tokio::test]
async fn test_field_length_constraints_are_enforced() {
    let store = InMemoryStore::new(LocalFeedHub::new(), "alice");

    let err = store
        .insert("alice", &"x".repeat(TITLE_MAX_LEN + 1), "https://example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)));

    let err = store.insert("alice", "Docs", "").await.unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)));
}

#[tokio::test]
async fn test_created_at_is_monotonic_per_table() {
    let store = InMemoryStore::new(LocalFeedHub::new(), "alice");
    let first = store
        .insert("alice", "One", "https://one.example.com")
        .await
        .unwrap();
    let second = store
        .insert("alice", "Two", "https://two.example.com")
        .await
        .unwrap();

    assert!(second.created_at > first.created_at);

    // And the listing honors it, newest-first
    let rows = store.list_by_owner("alice").await.unwrap();
    assert_eq!(rows[0].id, second.id);
    assert_eq!(rows[1].id, first.id);
}
