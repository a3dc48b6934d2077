//! Identity provider boundary for Marksync.
//!
//! Session credentials are issued and refreshed by an external identity
//! service; this crate only needs the current user and a stream of
//! sign-in/sign-out changes.

use tokio::sync::watch;

/// Trait defining what the crate consumes from the Identity Provider.
pub trait IdentityProvider {
    /// The currently authenticated user, if any.
    fn current_user(&self) -> Option<String>;

    /// A watch over sign-in/sign-out changes. The value is the current
    /// user identifier, `None` when signed out.
    fn watch(&self) -> watch::Receiver<Option<String>>;
}

/// Identity provider holding the session user in process.
///
/// Stands in for the managed auth client: tests and the demo drive
/// `sign_in`/`sign_out` directly.
pub struct LocalIdentity {
    user: watch::Sender<Option<String>>,
}

impl LocalIdentity {
    pub fn new(initial_user: Option<&str>) -> Self {
        let (user, _) = watch::channel(initial_user.map(str::to_string));
        Self { user }
    }

    pub fn sign_in(&self, user_id: &str) {
        self.user.send_replace(Some(user_id.to_string()));
    }

    pub fn sign_out(&self) {
        self.user.send_replace(None);
    }
}

impl IdentityProvider for LocalIdentity {
    fn current_user(&self) -> Option<String> {
        self.user.borrow().clone()
    }

    fn watch(&self) -> watch::Receiver<Option<String>> {
        self.user.subscribe()
    }
}
