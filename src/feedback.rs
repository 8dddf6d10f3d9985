//! Feature-feedback helpers.
//!
//! Builds the date-bounded ticket queries used by `search_feature_feedback`
//! and `get_recent_tickets`, and sorts a ticket set into bug reports,
//! feature requests and support questions.
//!
//! # Classification
//!
//! Buckets are evaluated in precedence order and the first match wins, so
//! every ticket lands in exactly one bucket:
//!
//! 1. bug report: a tag contains "bug", or the subject contains "bug" or "issue"
//! 2. feature request: a tag contains "feature" or "enhancement", or the
//!    subject contains "feature request" or "enhancement"
//! 3. support question: everything else
//!
//! All matching is case-insensitive substring matching. A ticket that
//! reaches bucket 1 or 2 without any tag containing "bug" or "feature" would
//! also satisfy the standalone support-question test ("no tag mentions bug
//! or feature"); such tickets are counted in [`FeedbackBuckets::support_overlap`]
//! instead of being listed twice.

use chrono::{DateTime, Duration, Utc};

use crate::models::Ticket;

/// Look-back window used by `get_recent_tickets`.
pub const RECENT_TICKETS_DAYS: u32 = 30;

/// Default look-back window for `search_feature_feedback`.
pub const DEFAULT_FEEDBACK_DAYS: u32 = 90;

/// Returns `now` minus `days`, formatted `YYYY-MM-DD`.
///
/// Returns `None` when the result falls outside the representable date range.
pub fn date_threshold(now: DateTime<Utc>, days: u32) -> Option<String> {
    now.checked_sub_signed(Duration::days(i64::from(days)))
        .map(|date| date.date_naive().format("%Y-%m-%d").to_string())
}

/// Builds the ticket query for recently created tickets.
pub fn recent_tickets_query(now: DateTime<Utc>) -> Option<String> {
    date_threshold(now, RECENT_TICKETS_DAYS).map(|threshold| format!("created>{}", threshold))
}

/// Builds the ticket query for feedback about `feature_name`.
///
/// Unsolved-only searches append `status<solved`.
pub fn feedback_query(feature_name: &str, include_solved: bool, threshold: &str) -> String {
    let mut query = format!("{} created>{}", feature_name, threshold);
    if !include_solved {
        query.push_str(" status<solved");
    }
    query
}

/// The bucket a ticket was sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackCategory {
    /// Reported defect.
    BugReport,
    /// Request for new or improved functionality.
    FeatureRequest,
    /// Anything else.
    SupportQuestion,
}

/// Sorts a single ticket into its bucket.
pub fn categorize(ticket: &Ticket) -> FeedbackCategory {
    if ticket.has_tag_containing("bug")
        || ticket.subject_contains("bug")
        || ticket.subject_contains("issue")
    {
        FeedbackCategory::BugReport
    } else if ticket.has_tag_containing("feature")
        || ticket.has_tag_containing("enhancement")
        || ticket.subject_contains("feature request")
        || ticket.subject_contains("enhancement")
    {
        FeedbackCategory::FeatureRequest
    } else {
        FeedbackCategory::SupportQuestion
    }
}

/// Returns true if a ticket has no tag mentioning "bug" or "feature".
fn untagged_as_bug_or_feature(ticket: &Ticket) -> bool {
    !ticket.has_tag_containing("bug") && !ticket.has_tag_containing("feature")
}

/// A ticket set split into feedback buckets.
#[derive(Debug, Default)]
pub struct FeedbackBuckets {
    /// Tickets classified as bug reports.
    pub bug_reports: Vec<Ticket>,
    /// Tickets classified as feature requests.
    pub feature_requests: Vec<Ticket>,
    /// Tickets classified as support questions.
    pub support_questions: Vec<Ticket>,
    /// Bug reports and feature requests that no tag marks as bug or feature.
    pub support_overlap: usize,
}

impl FeedbackBuckets {
    /// Total number of classified tickets.
    pub fn total(&self) -> usize {
        self.bug_reports.len() + self.feature_requests.len() + self.support_questions.len()
    }
}

/// Splits `tickets` into buckets, preserving their relative order.
pub fn classify(tickets: Vec<Ticket>) -> FeedbackBuckets {
    let mut buckets = FeedbackBuckets::default();

    for ticket in tickets {
        let category = categorize(&ticket);
        if category != FeedbackCategory::SupportQuestion && untagged_as_bug_or_feature(&ticket) {
            tracing::debug!(
                ticket_id = ticket.id,
                ?category,
                "Ticket matched by subject or enhancement tag only"
            );
            buckets.support_overlap += 1;
        }

        match category {
            FeedbackCategory::BugReport => buckets.bug_reports.push(ticket),
            FeedbackCategory::FeatureRequest => buckets.feature_requests.push(ticket),
            FeedbackCategory::SupportQuestion => buckets.support_questions.push(ticket),
        }
    }

    buckets
}
