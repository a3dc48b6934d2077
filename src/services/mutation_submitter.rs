//! Mutation Submitter for Marksync.
//!
//! Executes user-initiated add/delete intents with immediate visible
//! feedback: adds update the view as soon as the Store confirms the row,
//! deletes remove the row before the request is even sent and recover by
//! re-fetching when the Store rejects them.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::managers::list_reconciler::{ListReconciler, ListReconcilerTrait};
use crate::services::identity::IdentityProvider;
use crate::services::store_client::BookmarkStore;
use crate::services::validation::validate_new_bookmark;
use crate::types::bookmark::Bookmark;
use crate::types::errors::SubmitError;

/// How long the "Saved" confirmation stays visible after a successful add.
pub const SAVE_CONFIRMED_CLEAR: Duration = Duration::from_secs(2);

/// Form state the UI binds to: the two inputs, the current error text, and
/// the transient save confirmation.
#[derive(Debug, Default, Clone)]
pub struct FormState {
    pub title_input: String,
    pub address_input: String,
    pub error: Option<String>,
    pub save_confirmed: bool,
}

/// Submitter for one session's add/delete intents.
///
/// Shares the session view with the feed pump; the form is shared with the
/// delayed confirmation-clear task. Locks are never held across an await.
pub struct MutationSubmitter<S, I> {
    store: Arc<S>,
    identity: Arc<I>,
    view: Arc<Mutex<ListReconciler>>,
    form: Arc<Mutex<FormState>>,
}

impl<S: BookmarkStore, I: IdentityProvider> MutationSubmitter<S, I> {
    pub fn new(store: Arc<S>, identity: Arc<I>, view: Arc<Mutex<ListReconciler>>) -> Self {
        Self {
            store,
            identity,
            view,
            form: Arc::new(Mutex::new(FormState::default())),
        }
    }

    fn view(&self) -> MutexGuard<'_, ListReconciler> {
        self.view.lock().expect("session view lock poisoned")
    }

    fn form_mut(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().expect("form state lock poisoned")
    }

    pub fn form(&self) -> FormState {
        self.form_mut().clone()
    }

    pub fn set_title(&self, title: &str) {
        self.form_mut().title_input = title.to_string();
    }

    pub fn set_address(&self, address: &str) {
        self.form_mut().address_input = address.to_string();
    }

    fn fail(&self, error: SubmitError) -> SubmitError {
        self.form_mut().error = Some(error.to_string());
        error
    }

    /// Submit the current form as an add intent.
    ///
    /// Validation failures and unauthenticated submissions report an error
    /// without touching the network or the view. On Store success the
    /// returned row (with its assigned id/timestamp) is inserted at the
    /// front of the view, the inputs reset, and the save confirmation shown
    /// until it clears on a timer. On Store failure the inputs stay
    /// populated for correction and nothing was optimistically added.
    pub async fn submit_add(&self) -> Result<Bookmark, SubmitError> {
        let owner = match self.identity.current_user() {
            Some(owner) => owner,
            None => return Err(self.fail(SubmitError::NotSignedIn)),
        };

        let (title, address) = {
            let form = self.form_mut();
            (form.title_input.clone(), form.address_input.clone())
        };
        let (title, address) = validate_new_bookmark(&title, &address)
            .map_err(|e| self.fail(SubmitError::Validation(e)))?;

        match self.store.insert(&owner, &title, &address).await {
            Ok(row) => {
                self.view().apply_insert(row.clone());
                {
                    let mut form = self.form_mut();
                    form.title_input.clear();
                    form.address_input.clear();
                    form.error = None;
                    form.save_confirmed = true;
                }
                let form = Arc::clone(&self.form);
                tokio::spawn(async move {
                    tokio::time::sleep(SAVE_CONFIRMED_CLEAR).await;
                    form.lock().expect("form state lock poisoned").save_confirmed = false;
                });
                Ok(row)
            }
            Err(e) => Err(self.fail(SubmitError::Store(e))),
        }
    }

    /// Submit a delete intent for the given row.
    ///
    /// The row is removed from the view optimistically, before the request
    /// is issued. When the Store rejects the delete, the error is surfaced
    /// and the full snapshot is re-fetched with every returned row fed back
    /// through the dedup insert. That recovery is best-effort: it cannot
    /// remove rows the re-fetch no longer returns, so a different delete
    /// still in flight may transiently reappear.
    pub async fn submit_delete(&self, id: &str) -> Result<(), SubmitError> {
        let owner = match self.identity.current_user() {
            Some(owner) => owner,
            None => return Err(self.fail(SubmitError::NotSignedIn)),
        };

        self.view().apply_delete(id);

        match self.store.delete_by_id(id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                let error = self.fail(SubmitError::Store(e));
                if let Ok(snapshot) = self.store.list_by_owner(&owner).await {
                    let mut view = self.view();
                    for row in snapshot {
                        view.apply_insert(row);
                    }
                }
                Err(error)
            }
        }
    }
}
