//! Live-Status Tracker for Marksync.
//!
//! Tracks the health of one change-feed subscription as a three-state
//! machine driven solely by asynchronous feed acknowledgements.

use crate::types::feed::LiveStatus;

/// Subscription-health state machine.
///
/// Starts in `Connecting`. `Error` is terminal for this tracker instance;
/// a reconnect sequence (fresh page load) constructs a new tracker.
pub struct LiveStatusTracker {
    status: LiveStatus,
}

impl LiveStatusTracker {
    pub fn new() -> Self {
        Self {
            status: LiveStatus::Connecting,
        }
    }

    pub fn status(&self) -> LiveStatus {
        self.status
    }

    /// The feed acknowledged the subscription.
    ///
    /// Only meaningful while connecting; ignored in terminal states.
    pub fn on_subscribed(&mut self) {
        if self.status == LiveStatus::Connecting {
            self.status = LiveStatus::Connected;
        }
    }

    /// The subscription was rejected, timed out, or the live channel dropped.
    pub fn on_error(&mut self) {
        self.status = LiveStatus::Error;
    }
}

impl Default for LiveStatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
