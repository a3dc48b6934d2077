//! Session core for Marksync.
//!
//! One `Session` is one open tab: it seeds the view from the Store's
//! snapshot, subscribes to the Change Feed for the signed-in user, and keeps
//! the view current while exposing the Mutation Submitter for user actions.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::managers::list_reconciler::{ListReconciler, ListReconcilerTrait};
use crate::managers::live_status::LiveStatusTracker;
use crate::services::change_feed::{ChangeFeed, FeedSubscription};
use crate::services::identity::IdentityProvider;
use crate::services::mutation_submitter::MutationSubmitter;
use crate::services::store_client::BookmarkStore;
use crate::types::bookmark::Bookmark;
use crate::types::errors::SessionError;
use crate::types::feed::{FeedEvent, LiveStatus};

/// How long the subscription handshake may take before the live indicator
/// reports an error.
pub const SUBSCRIBE_TIMEOUT: Duration = Duration::from_secs(10);

/// One tab's bookmark session.
///
/// Closing (dropping) the session tears down the feed subscription.
/// In-flight submitter calls resolve against the discarded view harmlessly;
/// nothing observes it afterwards.
pub struct Session<S, I> {
    view: Arc<Mutex<ListReconciler>>,
    status: Arc<Mutex<LiveStatusTracker>>,
    submitter: MutationSubmitter<S, I>,
    pump: Option<JoinHandle<()>>,
}

impl<S, I> Session<S, I>
where
    S: BookmarkStore,
    I: IdentityProvider,
{
    /// Open a session: fetch the snapshot, seed the view, subscribe to the
    /// feed, and start applying feed events.
    pub async fn open<F: ChangeFeed>(
        store: Arc<S>,
        feed: &F,
        identity: Arc<I>,
    ) -> Result<Self, SessionError> {
        let owner = identity
            .current_user()
            .ok_or(SessionError::NotSignedIn)?;

        let snapshot = store
            .list_by_owner(&owner)
            .await
            .map_err(SessionError::SnapshotFailed)?;

        let view = Arc::new(Mutex::new(ListReconciler::new()));
        view.lock()
            .expect("session view lock poisoned")
            .seed(snapshot);

        let status = Arc::new(Mutex::new(LiveStatusTracker::new()));
        let pump = match tokio::time::timeout(SUBSCRIBE_TIMEOUT, feed.subscribe(&owner)).await
        {
            Ok(Ok(subscription)) => {
                lock_status(&status).on_subscribed();
                Some(spawn_pump(
                    subscription,
                    Arc::clone(&view),
                    Arc::clone(&status),
                    identity.watch(),
                ))
            }
            Ok(Err(_)) | Err(_) => {
                // Feed health never blocks add/delete; those go through the
                // Store's request/response path regardless.
                lock_status(&status).on_error();
                None
            }
        };

        let submitter = MutationSubmitter::new(store, identity, Arc::clone(&view));
        Ok(Self {
            view,
            status,
            submitter,
            pump,
        })
    }

    /// The visible bookmark list, newest-first.
    pub fn bookmarks(&self) -> Vec<Bookmark> {
        self.view
            .lock()
            .expect("session view lock poisoned")
            .bookmarks()
            .to_vec()
    }

    pub fn live_status(&self) -> LiveStatus {
        lock_status(&self.status).status()
    }

    pub fn submitter(&self) -> &MutationSubmitter<S, I> {
        &self.submitter
    }

    /// Tear down the feed subscription. Also runs on drop.
    pub fn close(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
    }
}

impl<S, I> Drop for Session<S, I> {
    fn drop(&mut self) {
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
    }
}

fn lock_status(status: &Arc<Mutex<LiveStatusTracker>>) -> MutexGuard<'_, LiveStatusTracker> {
    status.lock().expect("live status lock poisoned")
}

/// Apply feed events to the view until the channel closes or the user signs
/// out. A closed channel flips the live indicator to error; sign-out just
/// stops listening.
fn spawn_pump(
    mut subscription: FeedSubscription,
    view: Arc<Mutex<ListReconciler>>,
    status: Arc<Mutex<LiveStatusTracker>>,
    mut signed_in: tokio::sync::watch::Receiver<Option<String>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                event = subscription.recv() => match event {
                    Ok(FeedEvent::Insert(row)) => {
                        view.lock().expect("session view lock poisoned").apply_insert(row);
                    }
                    Ok(FeedEvent::Delete { id }) => {
                        view.lock().expect("session view lock poisoned").apply_delete(&id);
                    }
                    Err(_) => {
                        lock_status(&status).on_error();
                        break;
                    }
                },
                changed = signed_in.changed() => {
                    if changed.is_err() || signed_in.borrow().is_none() {
                        break;
                    }
                }
            }
        }
    })
}
