//! Tool input parameter structs for MCP tools.
//!
//! This module defines the input types for each MCP tool, with
//! JSON Schema derivation for MCP tool discovery.
//!
//! # Input Sanitization
//!
//! All input structs implement `sanitize()` which trims whitespace from
//! string fields and clamps pagination into the range Zendesk accepts.
//! This should be called before processing input.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

use crate::feedback::DEFAULT_FEEDBACK_DAYS;

/// Largest page size the Zendesk search endpoints accept.
pub const MAX_PER_PAGE: u32 = 100;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 50;

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_true() -> bool {
    true
}

fn default_days_back() -> u32 {
    DEFAULT_FEEDBACK_DAYS
}

fn clamp_page(page: u32) -> u32 {
    page.max(1)
}

fn clamp_per_page(per_page: u32) -> u32 {
    per_page.clamp(1, MAX_PER_PAGE)
}

/// Input parameters for the search_tickets tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchTicketsInput {
    /// Zendesk search query, e.g. "status:open printer" or "requester:jane@example.com".
    pub query: String,

    /// Page number, starting at 1 (default: 1).
    #[serde(default = "default_page")]
    pub page: u32,

    /// Results per page (default: 50, max: 100).
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl SearchTicketsInput {
    /// Sanitizes input by trimming the query and clamping pagination.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            query: self.query.trim().to_string(),
            page: clamp_page(self.page),
            per_page: clamp_per_page(self.per_page),
        }
    }
}

/// Input parameters for the get_ticket tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTicketInput {
    /// The numeric ID of the ticket to retrieve.
    pub ticket_id: u64,

    /// Whether to also fetch the ticket's comments (default: true).
    #[serde(default = "default_true")]
    pub include_comments: bool,
}

/// Input parameters for the search_articles tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchArticlesInput {
    /// Free-text query matched against Help Center articles.
    pub query: String,

    /// Page number, starting at 1 (default: 1).
    #[serde(default = "default_page")]
    pub page: u32,

    /// Results per page (default: 50, max: 100).
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl SearchArticlesInput {
    /// Sanitizes input by trimming the query and clamping pagination.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            query: self.query.trim().to_string(),
            page: clamp_page(self.page),
            per_page: clamp_per_page(self.per_page),
        }
    }
}

/// Input parameters for the get_article tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetArticleInput {
    /// The numeric ID of the Help Center article to retrieve.
    pub article_id: u64,
}

/// Input parameters for the search_feature_feedback tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchFeatureFeedbackInput {
    /// Name of the feature or product area, e.g. "dark mode".
    pub feature_name: String,

    /// Whether to include solved and closed tickets (default: true).
    #[serde(default = "default_true")]
    pub include_solved: bool,

    /// How many days back to search, counted from today in UTC (default: 90).
    #[serde(default = "default_days_back")]
    pub days_back: u32,
}

impl SearchFeatureFeedbackInput {
    /// Sanitizes input by trimming the feature name.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            feature_name: self.feature_name.trim().to_string(),
            ..self
        }
    }
}

/// Input parameters for the get_tickets_by_tag tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTicketsByTagInput {
    /// Tag to filter by, e.g. "vip" or "billing".
    pub tag: String,

    /// Page number, starting at 1 (default: 1).
    #[serde(default = "default_page")]
    pub page: u32,

    /// Results per page (default: 50, max: 100).
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl GetTicketsByTagInput {
    /// Sanitizes input by trimming the tag and clamping pagination.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            tag: self.tag.trim().to_string(),
            page: clamp_page(self.page),
            per_page: clamp_per_page(self.per_page),
        }
    }
}
