use std::fmt;

use crate::types::bookmark::{ADDRESS_MAX_LEN, TITLE_MAX_LEN};

// === ValidationError ===

/// Local validation failures for the add-bookmark form.
///
/// The `Display` text of each variant is the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trimming.
    TitleRequired,
    /// Title exceeds the maximum length.
    TitleTooLong,
    /// Address is empty after trimming.
    AddressRequired,
    /// Address exceeds the maximum length after normalization.
    AddressTooLong,
    /// Address uses a scheme other than http/https.
    SchemeNotAllowed,
    /// Hostname is missing, has no `.`, or has an empty label.
    MissingDomain,
    /// The top-level label is not 2-6 alphabetic characters.
    InvalidTopLevelDomain,
    /// Hostname contains characters outside alphanumerics, `.` and `-`.
    InvalidHostCharacters,
    /// Catch-all: the address does not parse as a URL at all.
    InvalidUrl,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TitleRequired => write!(f, "Title is required"),
            ValidationError::TitleTooLong => {
                write!(f, "Title must be {} characters or fewer", TITLE_MAX_LEN)
            }
            ValidationError::AddressRequired => write!(f, "URL is required"),
            ValidationError::AddressTooLong => {
                write!(f, "URL must be {} characters or fewer", ADDRESS_MAX_LEN)
            }
            ValidationError::SchemeNotAllowed => {
                write!(f, "Only http and https URLs are allowed")
            }
            ValidationError::MissingDomain => {
                write!(f, "Please enter a real URL with a domain (e.g. example.com)")
            }
            ValidationError::InvalidTopLevelDomain => {
                write!(f, "The URL must end in a valid domain (e.g. .com, .org)")
            }
            ValidationError::InvalidHostCharacters => {
                write!(f, "The domain contains invalid characters")
            }
            ValidationError::InvalidUrl => write!(f, "Please enter a valid URL"),
        }
    }
}

impl std::error::Error for ValidationError {}

// === StoreError ===

/// Errors surfaced by the Bookmark Store on list/insert/delete requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The Store's row-level policy rejected the request.
    AccessDenied(String),
    /// A row constraint was violated (field length, ownership mismatch).
    ConstraintViolation(String),
    /// The request never reached the Store or the connection dropped.
    NetworkError(String),
    /// The Store returned an unexpected response.
    ApiError(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::AccessDenied(msg) => write!(f, "Access denied: {}", msg),
            StoreError::ConstraintViolation(msg) => {
                write!(f, "Constraint violation: {}", msg)
            }
            StoreError::NetworkError(msg) => write!(f, "Store network error: {}", msg),
            StoreError::ApiError(msg) => write!(f, "Store API error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// === FeedError ===

/// Errors related to the change-feed subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The feed rejected the subscription request.
    SubscribeRejected(String),
    /// The subscription handshake did not complete in time.
    TimedOut,
    /// The event channel closed while the subscription was live.
    ChannelClosed,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::SubscribeRejected(msg) => {
                write!(f, "Feed subscription rejected: {}", msg)
            }
            FeedError::TimedOut => write!(f, "Feed subscription timed out"),
            FeedError::ChannelClosed => write!(f, "Feed channel closed"),
        }
    }
}

impl std::error::Error for FeedError {}

// === SubmitError ===

/// Errors reported by the Mutation Submitter for add/delete intents.
///
/// The `Display` text is what the form shows the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// No authenticated user; no network call was attempted.
    NotSignedIn,
    /// Local validation failed; no network call was attempted.
    Validation(ValidationError),
    /// The Store rejected the request.
    Store(StoreError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NotSignedIn => {
                write!(f, "You must be signed in to save bookmarks")
            }
            SubmitError::Validation(e) => write!(f, "{}", e),
            SubmitError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SubmitError {}

// === SessionError ===

/// Errors that prevent a session from opening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No authenticated user is available.
    NotSignedIn,
    /// The initial snapshot fetch failed.
    SnapshotFailed(StoreError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotSignedIn => write!(f, "Not signed in"),
            SessionError::SnapshotFailed(e) => {
                write!(f, "Failed to load bookmarks: {}", e)
            }
        }
    }
}

impl std::error::Error for SessionError {}
