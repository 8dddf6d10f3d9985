//! Help Center article models.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A knowledge-base article.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    /// Unique article ID.
    pub id: u64,

    /// Article title.
    #[serde(default)]
    pub title: Option<String>,

    /// Article body (HTML).
    #[serde(default)]
    pub body: Option<String>,

    /// Author's user ID.
    #[serde(default)]
    pub author_id: Option<u64>,

    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Public URL of the article.
    #[serde(default)]
    pub html_url: Option<String>,

    /// Section the article belongs to.
    #[serde(default)]
    pub section_id: Option<u64>,

    /// Labels attached to the article.
    #[serde(default)]
    pub label_names: Vec<String>,
}
