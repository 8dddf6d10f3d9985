//! Common types shared across Zendesk API models.
//!
//! This module defines the paginated search envelope and the
//! single-resource response wrappers.

use serde::Deserialize;

use super::{Article, Comment, Ticket};

/// One page of results from a Zendesk search endpoint.
///
/// Both the generic search endpoint and the Help Center article search
/// return this shape; `count` is the total number of matches, not the
/// length of `results`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult<T> {
    /// Records on the current page, in the order Zendesk returned them.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    /// Total number of matching records across all pages.
    #[serde(default)]
    pub count: u64,

    /// URL of the next page, if any.
    #[serde(default)]
    pub next_page: Option<String>,

    /// URL of the previous page, if any.
    #[serde(default)]
    pub previous_page: Option<String>,
}

/// Response wrapper for `GET /tickets/{id}.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketResponse {
    /// The ticket record.
    pub ticket: Ticket,
}

/// Response wrapper for `GET /help_center/articles/{id}.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleResponse {
    /// The article record.
    pub article: Article,
}

/// Response wrapper for `GET /tickets/{id}/comments.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentsResponse {
    /// Comments, oldest first.
    #[serde(default)]
    pub comments: Vec<Comment>,

    /// URL of the next page, if any.
    #[serde(default)]
    pub next_page: Option<String>,

    /// Total number of comments on the ticket.
    #[serde(default)]
    pub count: Option<u64>,
}
