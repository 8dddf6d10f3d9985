//! Ticket models for the Zendesk Support API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Not yet touched by an agent.
    New,
    /// Assigned and being worked on.
    Open,
    /// Waiting on the requester.
    Pending,
    /// Waiting on a third party.
    Hold,
    /// Resolved, may still be reopened.
    Solved,
    /// Archived and immutable.
    Closed,
    /// Any status this crate does not know about (e.g. `deleted`).
    #[serde(other)]
    Other,
}

impl TicketStatus {
    /// Returns the lowercase API name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::New => "new",
            TicketStatus::Open => "open",
            TicketStatus::Pending => "pending",
            TicketStatus::Hold => "hold",
            TicketStatus::Solved => "solved",
            TicketStatus::Closed => "closed",
            TicketStatus::Other => "other",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    /// Low priority.
    Low,
    /// Normal priority.
    Normal,
    /// High priority.
    High,
    /// Urgent priority.
    Urgent,
}

/// A custom field value attached to a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomField {
    /// Custom field definition ID.
    pub id: u64,

    /// Field value; its JSON type depends on the field definition.
    #[serde(default)]
    pub value: serde_json::Value,
}

/// How a ticket entered the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Via {
    /// Channel name, e.g. `email`, `web`, `api`.
    #[serde(default)]
    pub channel: Option<String>,
}

/// A support ticket.
#[derive(Debug, Clone, Deserialize)]
pub struct Ticket {
    /// Unique ticket ID.
    pub id: u64,

    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,

    /// First comment body as plain text.
    #[serde(default)]
    pub description: Option<String>,

    /// Current status.
    #[serde(default)]
    pub status: Option<TicketStatus>,

    /// Priority, if one has been set.
    #[serde(default)]
    pub priority: Option<TicketPriority>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Tags, as Zendesk stores them (lowercase, no spaces).
    #[serde(default)]
    pub tags: Vec<String>,

    /// Custom field values.
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,

    /// Inbound channel information.
    #[serde(default)]
    pub via: Option<Via>,
}

impl Ticket {
    /// Returns the inbound channel name, if known.
    pub fn channel(&self) -> Option<&str> {
        self.via.as_ref().and_then(|v| v.channel.as_deref())
    }

    /// Returns true if any tag contains `needle`, ignoring case.
    pub fn has_tag_containing(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
    }

    /// Returns true if the subject contains `needle`, ignoring case.
    pub fn subject_contains(&self, needle: &str) -> bool {
        self.subject
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase()))
    }
}
