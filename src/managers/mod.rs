// Marksync state managers
// Managers hold per-session in-memory state: the visible bookmark list and
// the change-feed subscription health.

pub mod list_reconciler;
pub mod live_status;
