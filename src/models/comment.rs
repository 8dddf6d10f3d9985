//! Ticket comment models.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A comment on a ticket.
///
/// Comments can be public (visible to the requester) or internal notes.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    /// Unique comment ID.
    pub id: u64,

    /// Comment text.
    #[serde(default)]
    pub body: Option<String>,

    /// Author's user ID.
    #[serde(default)]
    pub author_id: Option<u64>,

    /// When the comment was added.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Whether the requester can see the comment.
    #[serde(default = "default_public")]
    pub public: bool,
}

fn default_public() -> bool {
    true
}
