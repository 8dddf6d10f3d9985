//! Compact JSON projections of Zendesk records.
//!
//! Tool responses carry only the fields an assistant needs; these views
//! borrow from the decoded models and serialize to that trimmed shape.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::feedback::FeedbackBuckets;
use crate::models::{
    Article, Comment, CustomField, SearchResult, Ticket, TicketPriority, TicketStatus,
};

/// Maximum length of an article excerpt in search results.
const MAX_EXCERPT_LENGTH: usize = 500;

const TRUNCATION_MARKER: &str = "... [truncated]";

/// Truncates a string if it exceeds the maximum length.
///
/// If truncated, appends "... [truncated]" to indicate the content was cut.
/// The cut lands on a word boundary when one is available and never splits
/// a UTF-8 character.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        return text.to_string();
    }

    let mut end = max_length.saturating_sub(TRUNCATION_MARKER.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    if let Some(space_pos) = text[..end].rfind(char::is_whitespace) {
        end = space_pos;
    }
    format!("{}{}", &text[..end], TRUNCATION_MARKER)
}

/// Entities decoded by `strip_html`. `&amp;` goes last so `&amp;lt;` stays `&lt;`.
const HTML_ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&amp;", "&"),
];

/// Removes HTML tags, decodes the common named entities and collapses
/// whitespace. Numeric entities other than `&#39;` are left as-is.
pub fn strip_html(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    let text = HTML_ENTITIES
        .iter()
        .fold(text, |text, (entity, decoded)| text.replace(entity, decoded));
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Ticket fields returned by the search tools.
#[derive(Debug, Serialize)]
pub struct TicketSummary<'a> {
    /// Ticket ID.
    pub id: u64,
    /// Subject line.
    pub subject: Option<&'a str>,
    /// Current status.
    pub status: Option<TicketStatus>,
    /// Priority.
    pub priority: Option<TicketPriority>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Tags.
    pub tags: &'a [String],
    /// Inbound channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<&'a str>,
}

impl<'a> From<&'a Ticket> for TicketSummary<'a> {
    fn from(ticket: &'a Ticket) -> Self {
        Self {
            id: ticket.id,
            subject: ticket.subject.as_deref(),
            status: ticket.status,
            priority: ticket.priority,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
            tags: &ticket.tags,
            channel: ticket.channel(),
        }
    }
}

/// Comment fields returned by get_ticket.
#[derive(Debug, Serialize)]
pub struct CommentView<'a> {
    /// Comment ID.
    pub id: u64,
    /// Author's user ID.
    pub author_id: Option<u64>,
    /// When the comment was added.
    pub created_at: Option<DateTime<Utc>>,
    /// Whether the requester can see it.
    pub public: bool,
    /// Comment text.
    pub body: Option<&'a str>,
}

impl<'a> From<&'a Comment> for CommentView<'a> {
    fn from(comment: &'a Comment) -> Self {
        Self {
            id: comment.id,
            author_id: comment.author_id,
            created_at: comment.created_at,
            public: comment.public,
            body: comment.body.as_deref(),
        }
    }
}

/// Full ticket payload returned by get_ticket.
#[derive(Debug, Serialize)]
pub struct TicketDetail<'a> {
    /// Summary fields.
    #[serde(flatten)]
    pub summary: TicketSummary<'a>,
    /// Ticket description.
    pub description: Option<&'a str>,
    /// Custom fields that have a value.
    pub custom_fields: Vec<&'a CustomField>,
    /// Agent UI link.
    pub url: String,
    /// Comments, oldest first, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentView<'a>>>,
}

impl<'a> TicketDetail<'a> {
    /// Builds the detail view; `comments` is `None` when they were not fetched.
    pub fn new(ticket: &'a Ticket, url: String, comments: Option<&'a [Comment]>) -> Self {
        Self {
            summary: TicketSummary::from(ticket),
            description: ticket.description.as_deref(),
            custom_fields: ticket
                .custom_fields
                .iter()
                .filter(|field| !field.value.is_null())
                .collect(),
            url,
            comments: comments.map(|list| list.iter().map(CommentView::from).collect()),
        }
    }
}

/// Article fields returned by the search tools.
#[derive(Debug, Serialize)]
pub struct ArticleSummary<'a> {
    /// Article ID.
    pub id: u64,
    /// Title.
    pub title: Option<&'a str>,
    /// Public URL.
    pub url: Option<&'a str>,
    /// Section ID.
    pub section_id: Option<u64>,
    /// Labels.
    pub label_names: &'a [String],
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Plain-text start of the body.
    pub excerpt: Option<String>,
}

impl<'a> From<&'a Article> for ArticleSummary<'a> {
    fn from(article: &'a Article) -> Self {
        Self {
            id: article.id,
            title: article.title.as_deref(),
            url: article.html_url.as_deref(),
            section_id: article.section_id,
            label_names: &article.label_names,
            created_at: article.created_at,
            updated_at: article.updated_at,
            excerpt: article
                .body
                .as_deref()
                .map(|body| truncate_text(&strip_html(body), MAX_EXCERPT_LENGTH)),
        }
    }
}

/// Full article payload returned by get_article.
#[derive(Debug, Serialize)]
pub struct ArticleDetail<'a> {
    /// Article ID.
    pub id: u64,
    /// Title.
    pub title: Option<&'a str>,
    /// Public URL.
    pub url: Option<&'a str>,
    /// Section ID.
    pub section_id: Option<u64>,
    /// Labels.
    pub label_names: &'a [String],
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Author's user ID.
    pub author_id: Option<u64>,
    /// Full HTML body.
    pub body: Option<&'a str>,
}

impl<'a> From<&'a Article> for ArticleDetail<'a> {
    fn from(article: &'a Article) -> Self {
        Self {
            id: article.id,
            title: article.title.as_deref(),
            url: article.html_url.as_deref(),
            section_id: article.section_id,
            label_names: &article.label_names,
            created_at: article.created_at,
            updated_at: article.updated_at,
            author_id: article.author_id,
            body: article.body.as_deref(),
        }
    }
}

/// One page of tickets.
#[derive(Debug, Serialize)]
pub struct TicketPage<'a> {
    /// Tickets on this page, at most `per_page`.
    pub tickets: Vec<TicketSummary<'a>>,
    /// Total number of matches.
    pub count: u64,
    /// Requested page number.
    pub page: u32,
    /// Requested page size.
    pub per_page: u32,
    /// Next page URL.
    pub next_page: Option<&'a str>,
    /// Previous page URL.
    pub previous_page: Option<&'a str>,
}

impl<'a> TicketPage<'a> {
    /// Projects a search result, keeping at most `per_page` tickets.
    pub fn new(result: &'a SearchResult<Ticket>, page: u32, per_page: u32) -> Self {
        Self {
            tickets: result
                .results
                .iter()
                .take(per_page as usize)
                .map(TicketSummary::from)
                .collect(),
            count: result.count,
            page,
            per_page,
            next_page: result.next_page.as_deref(),
            previous_page: result.previous_page.as_deref(),
        }
    }
}

/// One page of articles.
#[derive(Debug, Serialize)]
pub struct ArticlePage<'a> {
    /// Articles on this page, at most `per_page`.
    pub articles: Vec<ArticleSummary<'a>>,
    /// Total number of matches.
    pub count: u64,
    /// Requested page number.
    pub page: u32,
    /// Requested page size.
    pub per_page: u32,
    /// Next page URL.
    pub next_page: Option<&'a str>,
    /// Previous page URL.
    pub previous_page: Option<&'a str>,
}

impl<'a> ArticlePage<'a> {
    /// Projects a search result, keeping at most `per_page` articles.
    pub fn new(result: &'a SearchResult<Article>, page: u32, per_page: u32) -> Self {
        Self {
            articles: result
                .results
                .iter()
                .take(per_page as usize)
                .map(ArticleSummary::from)
                .collect(),
            count: result.count,
            page,
            per_page,
            next_page: result.next_page.as_deref(),
            previous_page: result.previous_page.as_deref(),
        }
    }
}

/// Bucket counts for a feature-feedback report.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FeedbackSummary {
    /// Number of tickets classified.
    pub total_tickets: usize,
    /// Tickets in `bug_reports`.
    pub bug_reports: usize,
    /// Tickets in `feature_requests`.
    pub feature_requests: usize,
    /// Tickets in `support_questions`.
    pub support_questions: usize,
    /// Articles in `related_articles`.
    pub related_articles: usize,
    /// Bug reports and feature requests without a bug or feature tag.
    pub support_overlap: usize,
}

/// Payload returned by search_feature_feedback.
#[derive(Debug, Serialize)]
pub struct FeedbackReport<'a> {
    /// The feature that was searched for.
    pub feature_name: &'a str,
    /// Earliest creation date searched, `YYYY-MM-DD`.
    pub created_after: &'a str,
    /// Whether solved tickets were included.
    pub include_solved: bool,
    /// Counts per bucket.
    pub summary: FeedbackSummary,
    /// Bug reports.
    pub bug_reports: Vec<TicketSummary<'a>>,
    /// Feature requests.
    pub feature_requests: Vec<TicketSummary<'a>>,
    /// Support questions.
    pub support_questions: Vec<TicketSummary<'a>>,
    /// Help Center articles matching the feature name.
    pub related_articles: Vec<ArticleSummary<'a>>,
}

impl<'a> FeedbackReport<'a> {
    /// Assembles the report from classified tickets and related articles.
    pub fn new(
        feature_name: &'a str,
        created_after: &'a str,
        include_solved: bool,
        buckets: &'a FeedbackBuckets,
        articles: &'a [Article],
    ) -> Self {
        let summarize = |tickets: &'a [Ticket]| -> Vec<TicketSummary<'a>> {
            tickets.iter().map(TicketSummary::from).collect()
        };
        Self {
            feature_name,
            created_after,
            include_solved,
            summary: FeedbackSummary {
                total_tickets: buckets.total(),
                bug_reports: buckets.bug_reports.len(),
                feature_requests: buckets.feature_requests.len(),
                support_questions: buckets.support_questions.len(),
                related_articles: articles.len(),
                support_overlap: buckets.support_overlap,
            },
            bug_reports: summarize(buckets.bug_reports.as_slice()),
            feature_requests: summarize(buckets.feature_requests.as_slice()),
            support_questions: summarize(buckets.support_questions.as_slice()),
            related_articles: articles.iter().map(ArticleSummary::from).collect(),
        }
    }
}
