//! Tool catalog and dispatch.
//!
//! `ToolDispatcher` owns the fixed catalog of read-only tools and executes
//! them against a [`ZendeskClient`]. Every call produces a [`ToolResponse`]:
//! failures of any kind (unknown tool, bad arguments, HTTP errors) are
//! reported in-band with `is_error` set, so the caller always gets text back.

use chrono::{DateTime, Utc};
use rmcp::schemars::{self, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ZendeskError;
use crate::feedback;
use crate::tools::{
    ArticleDetail, ArticlePage, FeedbackReport, GetArticleInput, GetTicketInput,
    GetTicketsByTagInput, SearchArticlesInput, SearchFeatureFeedbackInput, SearchTicketsInput,
    TicketDetail, TicketPage,
};
use crate::zendesk_client::ZendeskClient;

/// Ticket results fetched by search_feature_feedback.
const FEEDBACK_TICKET_LIMIT: u32 = 100;

/// Article results fetched by search_feature_feedback.
const FEEDBACK_ARTICLE_LIMIT: u32 = 50;

/// A catalog entry: tool name, description and parameter schema.
struct CatalogEntry {
    name: &'static str,
    description: &'static str,
    schema: fn() -> Value,
}

fn schema_of<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T))
        .unwrap_or_else(|_| serde_json::json!({ "type": "object" }))
}

/// The tools this server exposes, in listing order.
const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "search_tickets",
        description: "Search Zendesk tickets using Zendesk search syntax. Returns ticket ID, subject, status, priority, timestamps and tags, plus pagination info.",
        schema: schema_of::<SearchTicketsInput>,
    },
    CatalogEntry {
        name: "get_ticket",
        description: "Get a single Zendesk ticket by ID, including its description, custom fields and (by default) its comment thread.",
        schema: schema_of::<GetTicketInput>,
    },
    CatalogEntry {
        name: "search_articles",
        description: "Search Help Center knowledge-base articles. Returns title, URL, section, labels and a short excerpt.",
        schema: schema_of::<SearchArticlesInput>,
    },
    CatalogEntry {
        name: "get_article",
        description: "Get a single Help Center article by ID, including its full body.",
        schema: schema_of::<GetArticleInput>,
    },
    CatalogEntry {
        name: "search_feature_feedback",
        description: "Collect recent tickets mentioning a feature and sort them into bug reports, feature requests and support questions, together with related Help Center articles.",
        schema: schema_of::<SearchFeatureFeedbackInput>,
    },
    CatalogEntry {
        name: "get_tickets_by_tag",
        description: "List Zendesk tickets carrying a given tag. Returns ticket ID, subject, status, priority, timestamps and tags, plus pagination info.",
        schema: schema_of::<GetTicketsByTagInput>,
    },
];

/// A tool as advertised to callers.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    /// Tool name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// JSON schema of the tool's arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Result envelope of a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResponse {
    /// Pretty-printed JSON on success, `Error: <message>` on failure.
    pub content: String,
    /// Set when the call failed.
    pub is_error: bool,
}

impl ToolResponse {
    /// Creates a successful response.
    pub fn success(content: String) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Creates an error-flagged response.
    pub fn error(message: impl AsRef<str>) -> Self {
        Self {
            content: format!("Error: {}", message.as_ref()),
            is_error: true,
        }
    }
}

/// Executes catalog tools against the Zendesk API.
#[derive(Clone)]
pub struct ToolDispatcher {
    client: ZendeskClient,
}

impl ToolDispatcher {
    /// Creates a dispatcher backed by `client`.
    pub fn new(client: ZendeskClient) -> Self {
        Self { client }
    }

    /// Returns the tool catalog.
    pub fn catalog() -> Vec<ToolDescriptor> {
        CATALOG
            .iter()
            .map(|entry| ToolDescriptor {
                name: entry.name,
                description: entry.description,
                input_schema: (entry.schema)(),
            })
            .collect()
    }

    /// Executes the tool called `name` with JSON `arguments`.
    ///
    /// Unknown names and arguments that do not match the tool's schema
    /// produce an error-flagged response.
    pub async fn call(&self, name: &str, arguments: Value) -> ToolResponse {
        let arguments = if arguments.is_null() {
            Value::Object(Default::default())
        } else {
            arguments
        };

        match name {
            "search_tickets" => match parse_args(name, arguments) {
                Ok(input) => self.search_tickets(input).await,
                Err(e) => self.respond(name, Err(e)),
            },
            "get_ticket" => match parse_args(name, arguments) {
                Ok(input) => self.get_ticket(input).await,
                Err(e) => self.respond(name, Err(e)),
            },
            "search_articles" => match parse_args(name, arguments) {
                Ok(input) => self.search_articles(input).await,
                Err(e) => self.respond(name, Err(e)),
            },
            "get_article" => match parse_args(name, arguments) {
                Ok(input) => self.get_article(input).await,
                Err(e) => self.respond(name, Err(e)),
            },
            "search_feature_feedback" => match parse_args(name, arguments) {
                Ok(input) => self.search_feature_feedback(input).await,
                Err(e) => self.respond(name, Err(e)),
            },
            "get_tickets_by_tag" => match parse_args(name, arguments) {
                Ok(input) => self.get_tickets_by_tag(input).await,
                Err(e) => self.respond(name, Err(e)),
            },
            _ => self.respond(name, Err(ZendeskError::unknown_tool(name))),
        }
    }

    /// Runs the search_tickets tool.
    pub async fn search_tickets(&self, input: SearchTicketsInput) -> ToolResponse {
        let input = input.sanitize();
        tracing::debug!(?input, "search_tickets tool called");

        let result: Result<String, ZendeskError> = async {
            require_non_empty("query", &input.query)?;
            let page = self
                .client
                .search_tickets(&input.query, input.page, input.per_page)
                .await?;
            render(&TicketPage::new(&page, input.page, input.per_page))
        }
        .await;
        self.respond("search_tickets", result)
    }

    /// Runs the get_ticket tool.
    ///
    /// Comments are only requested when `include_comments` is set.
    pub async fn get_ticket(&self, input: GetTicketInput) -> ToolResponse {
        tracing::debug!(ticket_id = input.ticket_id, "get_ticket tool called");

        let result: Result<String, ZendeskError> = async {
            let ticket = self.client.get_ticket(input.ticket_id).await?;
            let comments = if input.include_comments {
                Some(self.client.get_ticket_comments(input.ticket_id).await?)
            } else {
                None
            };
            render(&TicketDetail::new(
                &ticket,
                self.client.ticket_web_url(ticket.id),
                comments.as_deref(),
            ))
        }
        .await;
        self.respond("get_ticket", result)
    }

    /// Runs the search_articles tool.
    pub async fn search_articles(&self, input: SearchArticlesInput) -> ToolResponse {
        let input = input.sanitize();
        tracing::debug!(?input, "search_articles tool called");

        let result: Result<String, ZendeskError> = async {
            require_non_empty("query", &input.query)?;
            let page = self
                .client
                .search_articles(&input.query, input.page, input.per_page)
                .await?;
            render(&ArticlePage::new(&page, input.page, input.per_page))
        }
        .await;
        self.respond("search_articles", result)
    }

    /// Runs the get_article tool.
    pub async fn get_article(&self, input: GetArticleInput) -> ToolResponse {
        tracing::debug!(article_id = input.article_id, "get_article tool called");

        let result: Result<String, ZendeskError> = async {
            let article = self.client.get_article(input.article_id).await?;
            render(&ArticleDetail::from(&article))
        }
        .await;
        self.respond("get_article", result)
    }

    /// Runs the search_feature_feedback tool relative to the current time.
    pub async fn search_feature_feedback(&self, input: SearchFeatureFeedbackInput) -> ToolResponse {
        self.search_feature_feedback_at(input, Utc::now()).await
    }

    /// Runs the search_feature_feedback tool relative to `now`.
    ///
    /// The ticket and article searches run concurrently; if either fails the
    /// whole call fails.
    pub async fn search_feature_feedback_at(
        &self,
        input: SearchFeatureFeedbackInput,
        now: DateTime<Utc>,
    ) -> ToolResponse {
        let input = input.sanitize();
        tracing::debug!(?input, "search_feature_feedback tool called");

        let result: Result<String, ZendeskError> = async {
            require_non_empty("feature_name", &input.feature_name)?;

            let threshold = feedback::date_threshold(now, input.days_back)
                .ok_or_else(|| ZendeskError::validation("days_back is out of range"))?;
            let query =
                feedback::feedback_query(&input.feature_name, input.include_solved, &threshold);

            let (tickets, articles) = tokio::try_join!(
                self.client.search_tickets(&query, 1, FEEDBACK_TICKET_LIMIT),
                self.client
                    .search_articles(&input.feature_name, 1, FEEDBACK_ARTICLE_LIMIT),
            )?;

            let buckets = feedback::classify(tickets.results);
            tracing::debug!(
                total = buckets.total(),
                bug_reports = buckets.bug_reports.len(),
                feature_requests = buckets.feature_requests.len(),
                support_questions = buckets.support_questions.len(),
                "Classified feature feedback"
            );

            render(&FeedbackReport::new(
                &input.feature_name,
                &threshold,
                input.include_solved,
                &buckets,
                &articles.results,
            ))
        }
        .await;
        self.respond("search_feature_feedback", result)
    }

    /// Runs the get_tickets_by_tag tool.
    pub async fn get_tickets_by_tag(&self, input: GetTicketsByTagInput) -> ToolResponse {
        let input = input.sanitize();
        tracing::debug!(?input, "get_tickets_by_tag tool called");

        let result: Result<String, ZendeskError> = async {
            require_non_empty("tag", &input.tag)?;
            let page = self
                .client
                .get_tickets_by_tag(&input.tag, input.page, input.per_page)
                .await?;
            render(&TicketPage::new(&page, input.page, input.per_page))
        }
        .await;
        self.respond("get_tickets_by_tag", result)
    }

    /// Wraps a handler result in the response envelope, redacting the token.
    fn respond(&self, tool: &str, result: Result<String, ZendeskError>) -> ToolResponse {
        match result {
            Ok(content) => ToolResponse::success(content),
            Err(e) => {
                let sanitized = e.sanitized_display(self.client.api_token_for_sanitization());
                tracing::error!(tool = tool, error = %sanitized, "Tool call failed");
                ToolResponse::error(sanitized)
            }
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, ZendeskError> {
    serde_json::from_value(arguments).map_err(|e| {
        ZendeskError::validation(format!("invalid arguments for {}: {}", tool, e))
    })
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ZendeskError> {
    if value.is_empty() {
        return Err(ZendeskError::validation(format!(
            "{} is required and cannot be empty",
            field
        )));
    }
    Ok(())
}

fn render<T: Serialize>(value: &T) -> Result<String, ZendeskError> {
    serde_json::to_string_pretty(value).map_err(ZendeskError::Serialization)
}
