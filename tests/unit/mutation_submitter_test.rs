//! Unit tests for the MutationSubmitter add/delete intents.
//!
//! These exercise the optimistic-update contract: adds touch the view only
//! after the Store confirms, deletes remove before the request resolves and
//! recover by re-fetching on failure.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use marksync::managers::list_reconciler::{ListReconciler, ListReconcilerTrait};
use marksync::services::change_feed::LocalFeedHub;
use marksync::services::identity::LocalIdentity;
use marksync::services::memory_store::InMemoryStore;
use marksync::services::mutation_submitter::{MutationSubmitter, SAVE_CONFIRMED_CLEAR};
use marksync::services::store_client::BookmarkStore;
use marksync::types::bookmark::Bookmark;
use marksync::types::errors::{StoreError, SubmitError, ValidationError};

/// Store double that delays delete responses, so tests can observe the view
/// between the optimistic removal and the Store's answer.
struct DelayedDeleteStore {
    inner: InMemoryStore,
    delay: Duration,
}

impl BookmarkStore for DelayedDeleteStore {
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Bookmark>, StoreError> {
        self.inner.list_by_owner(owner_id).await
    }

    async fn insert(
        &self,
        owner_id: &str,
        title: &str,
        url: &str,
    ) -> Result<Bookmark, StoreError> {
        self.inner.insert(owner_id, title, url).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.delete_by_id(id).await
    }
}

/// Store double whose deletes always fail without touching any row.
struct FailingDeleteStore {
    inner: InMemoryStore,
}

impl BookmarkStore for FailingDeleteStore {
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Bookmark>, StoreError> {
        self.inner.list_by_owner(owner_id).await
    }

    async fn insert(
        &self,
        owner_id: &str,
        title: &str,
        url: &str,
    ) -> Result<Bookmark, StoreError> {
        self.inner.insert(owner_id, title, url).await
    }

    async fn delete_by_id(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::ApiError("delete rejected".to_string()))
    }
}

fn submitter_for<S: BookmarkStore>(
    store: Arc<S>,
    user: Option<&str>,
) -> (MutationSubmitter<S, LocalIdentity>, Arc<Mutex<ListReconciler>>) {
    let identity = Arc::new(LocalIdentity::new(user));
    let view = Arc::new(Mutex::new(ListReconciler::new()));
    (
        MutationSubmitter::new(store, identity, Arc::clone(&view)),
        view,
    )
}

/// End-to-end add: normalization, Store-assigned row at position 0, cleared
/// inputs, and the transient confirmation that clears after two seconds.
#[tokio::test(start_paused = true)]
async fn test_add_success_updates_view_and_clears_form() {
    let store = Arc::new(InMemoryStore::new(LocalFeedHub::new(), "alice"));
    let (submitter, view) = submitter_for(Arc::clone(&store), Some("alice"));

    submitter.set_title("Docs");
    submitter.set_address("supabase.com/docs");
    let row = submitter.submit_add().await.expect("add should succeed");

    assert_eq!(row.url, "https://supabase.com/docs");
    assert_eq!(row.owner_id, "alice");
    assert!(!row.id.is_empty());

    {
        let view = view.lock().unwrap();
        assert_eq!(view.len(), 1);
        assert_eq!(view.bookmarks()[0], row);
    }

    let form = submitter.form();
    assert!(form.title_input.is_empty());
    assert!(form.address_input.is_empty());
    assert_eq!(form.error, None);
    assert!(form.save_confirmed);

    // The confirmation clears on its own after the fixed delay
    tokio::time::sleep(SAVE_CONFIRMED_CLEAR + Duration::from_millis(50)).await;
    tokio::task::yield_now().await;
    assert!(!submitter.form().save_confirmed);
}

/// Validation failure: specific message, no network call, no view change,
/// inputs left for correction.
#[tokio::test]
async fn test_add_validation_failure_has_no_side_effects() {
    let store = Arc::new(InMemoryStore::new(LocalFeedHub::new(), "alice"));
    let (submitter, view) = submitter_for(Arc::clone(&store), Some("alice"));

    submitter.set_title("Docs");
    submitter.set_address("hello");
    let err = submitter.submit_add().await.unwrap_err();

    assert_eq!(
        err,
        SubmitError::Validation(ValidationError::MissingDomain)
    );
    let form = submitter.form();
    assert_eq!(
        form.error.as_deref(),
        Some("Please enter a real URL with a domain (e.g. example.com)")
    );
    assert_eq!(form.title_input, "Docs");
    assert_eq!(form.address_input, "hello");

    assert!(view.lock().unwrap().is_empty());
    assert!(store.list_by_owner("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_title_reports_title_required() {
    let store = Arc::new(InMemoryStore::new(LocalFeedHub::new(), "alice"));
    let (submitter, _view) = submitter_for(store, Some("alice"));

    submitter.set_title("   ");
    submitter.set_address("example.com");
    let err = submitter.submit_add().await.unwrap_err();

    assert_eq!(err, SubmitError::Validation(ValidationError::TitleRequired));
    assert_eq!(submitter.form().error.as_deref(), Some("Title is required"));
}

/// Unauthenticated submission: distinct message, no network call attempted.
#[tokio::test]
async fn test_add_while_signed_out_is_rejected_locally() {
    let store = Arc::new(InMemoryStore::new(LocalFeedHub::new(), "alice"));
    let (submitter, view) = submitter_for(Arc::clone(&store), None);

    submitter.set_title("Docs");
    submitter.set_address("example.com");
    let err = submitter.submit_add().await.unwrap_err();

    assert_eq!(err, SubmitError::NotSignedIn);
    assert_eq!(
        submitter.form().error.as_deref(),
        Some("You must be signed in to save bookmarks")
    );
    assert!(view.lock().unwrap().is_empty());
}

/// Store rejection on add: error surfaced, inputs stay populated, and the
/// view is untouched because nothing was optimistically added.
#[tokio::test]
async fn test_add_store_rejection_keeps_inputs() {
    // The store authenticated "alice"; the session claims "mallory", so the
    // ownership check rejects the insert.
    let store = Arc::new(InMemoryStore::new(LocalFeedHub::new(), "alice"));
    let (submitter, view) = submitter_for(Arc::clone(&store), Some("mallory"));

    submitter.set_title("Docs");
    submitter.set_address("example.com");
    let err = submitter.submit_add().await.unwrap_err();

    assert!(matches!(err, SubmitError::Store(StoreError::AccessDenied(_))));
    let form = submitter.form();
    assert!(form.error.is_some());
    assert_eq!(form.title_input, "Docs");
    assert_eq!(form.address_input, "example.com");
    assert!(!form.save_confirmed);
    assert!(view.lock().unwrap().is_empty());
}

/// The optimistic removal is visible before the Store has answered.
#[tokio::test(start_paused = true)]
async fn test_delete_removes_from_view_before_response() {
    let inner = InMemoryStore::new(LocalFeedHub::new(), "alice");
    let row = inner
        .insert("alice", "Docs", "https://example.com")
        .await
        .unwrap();
    let store = Arc::new(DelayedDeleteStore {
        inner,
        delay: Duration::from_secs(5),
    });

    let (submitter, view) = submitter_for(Arc::clone(&store), Some("alice"));
    view.lock()
        .unwrap()
        .seed(store.list_by_owner("alice").await.unwrap());
    assert_eq!(view.lock().unwrap().len(), 1);

    let id = row.id.clone();
    let handle = tokio::spawn(async move { submitter.submit_delete(&id).await });
    tokio::task::yield_now().await;

    // Removed from the view while the Store response is still pending
    assert!(view.lock().unwrap().is_empty());
    assert_eq!(store.list_by_owner("alice").await.unwrap().len(), 1);

    handle.await.unwrap().expect("delete should succeed");
    assert!(store.list_by_owner("alice").await.unwrap().is_empty());
    assert!(view.lock().unwrap().is_empty());
}

/// Failed delete: the error is shown and the recovery re-fetch brings the
/// row back into the view.
#[tokio::test]
async fn test_delete_failure_restores_row_via_refetch() {
    let inner = InMemoryStore::new(LocalFeedHub::new(), "alice");
    let row = inner
        .insert("alice", "Docs", "https://example.com")
        .await
        .unwrap();
    let store = Arc::new(FailingDeleteStore { inner });

    let (submitter, view) = submitter_for(Arc::clone(&store), Some("alice"));
    view.lock()
        .unwrap()
        .seed(store.list_by_owner("alice").await.unwrap());

    let err = submitter.submit_delete(&row.id).await.unwrap_err();

    assert!(matches!(err, SubmitError::Store(StoreError::ApiError(_))));
    assert_eq!(
        submitter.form().error.as_deref(),
        Some("Store API error: delete rejected")
    );
    let view = view.lock().unwrap();
    assert_eq!(view.len(), 1);
    assert_eq!(view.bookmarks()[0], row);
}

#[tokio::test]
async fn test_delete_while_signed_out_leaves_view_alone() {
    let inner = InMemoryStore::new(LocalFeedHub::new(), "alice");
    let row = inner
        .insert("alice", "Docs", "https://example.com")
        .await
        .unwrap();
    let store = Arc::new(inner);

    let (submitter, view) = submitter_for(Arc::clone(&store), None);
    view.lock().unwrap().seed(vec![row.clone()]);

    let err = submitter.submit_delete(&row.id).await.unwrap_err();

    assert_eq!(err, SubmitError::NotSignedIn);
    assert_eq!(view.lock().unwrap().len(), 1);
    assert_eq!(store.list_by_owner("alice").await.unwrap().len(), 1);
}
