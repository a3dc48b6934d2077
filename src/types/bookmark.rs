use serde::{Deserialize, Serialize};

/// A saved bookmark row as the Store returns it.
///
/// `id` and `created_at` are assigned by the Store at creation. Rows are
/// immutable after creation; the only lifecycle transition is deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub url: String,
    /// Creation time in milliseconds since the UNIX epoch.
    pub created_at: i64,
}

/// Maximum accepted title length, in characters.
pub const TITLE_MAX_LEN: usize = 200;

/// Maximum accepted URL length after normalization, in characters.
pub const ADDRESS_MAX_LEN: usize = 2048;
