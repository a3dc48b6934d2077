//! Change Feed for Marksync.
//!
//! The feed is the pub/sub boundary between one session's view and the
//! authoritative Store: every committed insert/delete is published here and
//! delivered to every subscription of the owning user. `LocalFeedHub` is the
//! in-process implementation used by the demo and tests; a deployment
//! substitutes the managed channel service behind the same trait.

use tokio::sync::broadcast;

use crate::types::errors::FeedError;
use crate::types::feed::FeedEvent;

const HUB_CAPACITY: usize = 64;

/// Trait defining the push channel consumed from the Change Feed.
pub trait ChangeFeed {
    /// Open a subscription scoped to the owner. The returned `Ok` is the
    /// subscription acknowledgement; rejection surfaces as `FeedError`.
    fn subscribe(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<FeedSubscription, FeedError>> + Send;
}

/// A live subscription delivering one owner's row events in arrival order.
pub struct FeedSubscription {
    owner_id: String,
    events: broadcast::Receiver<(String, FeedEvent)>,
}

impl FeedSubscription {
    /// Next event for the subscribed owner.
    ///
    /// Events for other owners are skipped; the Store-side row policy means
    /// a real deployment never even delivers them. A lagged receiver drops
    /// the missed events rather than failing the subscription.
    pub async fn recv(&mut self) -> Result<FeedEvent, FeedError> {
        loop {
            match self.events.recv().await {
                Ok((owner, event)) if owner == self.owner_id => return Ok(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(FeedError::ChannelClosed)
                }
            }
        }
    }
}

/// In-process change-feed hub fanning events out to all subscriptions.
#[derive(Clone)]
pub struct LocalFeedHub {
    sender: broadcast::Sender<(String, FeedEvent)>,
}

impl LocalFeedHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(HUB_CAPACITY);
        Self { sender }
    }

    /// Publish a committed row change for the owner. Delivery to zero
    /// subscribers is fine (no tab is listening).
    pub fn publish(&self, owner_id: &str, event: FeedEvent) {
        let _ = self.sender.send((owner_id.to_string(), event));
    }
}

impl Default for LocalFeedHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeFeed for LocalFeedHub {
    async fn subscribe(&self, owner_id: &str) -> Result<FeedSubscription, FeedError> {
        Ok(FeedSubscription {
            owner_id: owner_id.to_string(),
            events: self.sender.subscribe(),
        })
    }
}
