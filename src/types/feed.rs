use crate::types::bookmark::Bookmark;

/// A change notification delivered by the Change Feed for the bookmark table.
///
/// Insert events carry the full committed row; delete events carry only the
/// identifier of the removed row.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Insert(Bookmark),
    Delete { id: String },
}

/// Health of one change-feed subscription, as shown in the UI.
///
/// `Connecting` is the initial state. Neither `Connected` nor `Error`
/// recovers automatically; a new subscription attempt starts over from a
/// fresh tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveStatus {
    Connecting,
    Connected,
    Error,
}
