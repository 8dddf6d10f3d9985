//! HTTP client for the Zendesk REST API.
//!
//! This module provides the `ZendeskClient` struct for making authenticated
//! requests against `https://<subdomain>.zendesk.com/api/v2`.
//!
//! Every public method issues exactly one GET request. Non-success statuses
//! are returned as errors carrying the status code and raw body; nothing is
//! retried.
//!
//! # Security
//!
//! The API token is never logged. All error messages are sanitized before logging.

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::ZendeskError;
use crate::feedback;
use crate::models::{
    Article, ArticleResponse, Comment, CommentsResponse, SearchResult, Ticket, TicketResponse,
};

/// Scope prefix that restricts the generic search endpoint to tickets.
const TICKET_SEARCH_SCOPE: &str = "type:ticket";

/// HTTP client for the Zendesk API.
///
/// Handles authentication, request formatting, and response parsing
/// for all read operations the server exposes.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = ZendeskClient::new(&config)?;
///
/// let page = client.search_tickets("printer", 1, 25).await?;
/// ```
#[derive(Clone)]
pub struct ZendeskClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// API root, e.g. `https://acme.zendesk.com/api/v2`.
    base_url: String,

    /// Tenant subdomain, used for agent UI links.
    subdomain: String,

    /// Basic auth username, `<email>/token`.
    username: String,

    /// API token for authentication.
    /// SECURITY: Never log this value!
    api_token: String,
}

impl ZendeskClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, ZendeskError> {
        let http = Client::builder()
            .user_agent(concat!("zendesk-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ZendeskError::HttpClient)?;

        Ok(Self {
            http,
            base_url: config.api_base_url(),
            subdomain: config.subdomain.clone(),
            username: format!("{}/token", config.email),
            api_token: config.api_token().to_string(),
        })
    }

    /// Returns a reference to the API token for sanitization purposes.
    ///
    /// This should ONLY be used for sanitizing error messages, never for logging.
    pub(crate) fn api_token_for_sanitization(&self) -> &str {
        &self.api_token
    }

    /// Returns the agent UI URL for a ticket.
    pub fn ticket_web_url(&self, ticket_id: u64) -> String {
        format!(
            "https://{}.zendesk.com/agent/tickets/{}",
            self.subdomain, ticket_id
        )
    }

    /// Tests connectivity to the Zendesk account.
    ///
    /// Runs a one-result ticket search to verify the host is reachable and
    /// the credentials are accepted.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::ConnectionTest` describing the failure.
    pub async fn test_connection(&self) -> Result<(), ZendeskError> {
        tracing::debug!("Testing connection to Zendesk");

        match self.search_tickets("", 1, 1).await {
            Ok(_) => {
                tracing::info!("Connection test successful");
                Ok(())
            }
            Err(e) if e.is_auth_failure() => Err(ZendeskError::connection_test(
                "Authentication failed - verify ZENDESK_EMAIL and ZENDESK_API_TOKEN",
            )),
            Err(ZendeskError::Http(e)) => {
                let message = ZendeskError::sanitize_message(&e.to_string(), &self.api_token);
                Err(ZendeskError::connection_test(format!(
                    "HTTP error: {} - verify ZENDESK_SUBDOMAIN is correct",
                    message
                )))
            }
            Err(e) => Err(ZendeskError::connection_test(
                e.sanitized_display(&self.api_token),
            )),
        }
    }

    /// Makes an authenticated GET request and decodes the JSON body.
    ///
    /// # Arguments
    ///
    /// * `path` - API endpoint path (e.g., "/search.json")
    /// * `query` - Query-string parameters
    async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ZendeskError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(path = %path, "Making Zendesk API request");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.username, Some(&self.api_token))
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(ZendeskError::Http)?;
        let status = response.status();

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(status = %status, error = %e, "Failed to read error response body");
                    String::new()
                }
            };
            tracing::debug!(status = %status, path = %path, "Zendesk API returned an error status");
            return Err(ZendeskError::HttpStatus { status, body });
        }

        let body = response.text().await.map_err(ZendeskError::Http)?;

        tracing::trace!(body = %body, "Zendesk API response");

        serde_json::from_str(&body).map_err(ZendeskError::Serialization)
    }

    /// Like `get`, but reports a 404 as `NotFound` for `resource`.
    async fn get_resource<T>(&self, path: &str, resource: String) -> Result<T, ZendeskError>
    where
        T: DeserializeOwned,
    {
        self.get(path, &[]).await.map_err(|e| match e {
            ZendeskError::HttpStatus { status, .. } if status == StatusCode::NOT_FOUND => {
                ZendeskError::not_found(resource)
            }
            other => other,
        })
    }

    /// Searches tickets.
    ///
    /// `query` uses Zendesk search syntax and is scoped to tickets by
    /// prefixing `type:ticket`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let page = client.search_tickets("status:open printer", 1, 50).await?;
    /// println!("{} matching tickets", page.count);
    /// ```
    pub async fn search_tickets(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResult<Ticket>, ZendeskError> {
        let query = format!("{} {}", TICKET_SEARCH_SCOPE, query);
        self.get(
            "/search.json",
            &[
                ("query", query),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ],
        )
        .await
    }

    /// Gets a single ticket.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::NotFound` if the ticket doesn't exist.
    pub async fn get_ticket(&self, id: u64) -> Result<Ticket, ZendeskError> {
        let path = format!("/tickets/{}.json", id);
        let response: TicketResponse = self.get_resource(&path, format!("ticket {}", id)).await?;
        Ok(response.ticket)
    }

    /// Searches Help Center articles.
    pub async fn search_articles(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResult<Article>, ZendeskError> {
        self.get(
            "/help_center/articles/search.json",
            &[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ],
        )
        .await
    }

    /// Gets a single Help Center article.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::NotFound` if the article doesn't exist.
    pub async fn get_article(&self, id: u64) -> Result<Article, ZendeskError> {
        let path = format!("/help_center/articles/{}.json", id);
        let response: ArticleResponse =
            self.get_resource(&path, format!("article {}", id)).await?;
        Ok(response.article)
    }

    /// Gets the comments on a ticket, in the order Zendesk returns them
    /// (oldest first).
    pub async fn get_ticket_comments(&self, id: u64) -> Result<Vec<Comment>, ZendeskError> {
        let path = format!("/tickets/{}/comments.json", id);
        let response: CommentsResponse = self
            .get_resource(&path, format!("comments for ticket {}", id))
            .await?;
        Ok(response.comments)
    }

    /// Searches tickets carrying `tag`.
    pub async fn get_tickets_by_tag(
        &self,
        tag: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResult<Ticket>, ZendeskError> {
        self.search_tickets(&format!("tags:{}", tag), page, per_page)
            .await
    }

    /// Searches tickets created in the last 30 days (UTC).
    pub async fn get_recent_tickets(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResult<Ticket>, ZendeskError> {
        let query = feedback::recent_tickets_query(Utc::now())
            .ok_or_else(|| ZendeskError::validation("recent-ticket window is out of range"))?;
        self.search_tickets(&query, page, per_page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Creates a client for unit tests without requiring env vars.
    fn test_client() -> ZendeskClient {
        let config = Config {
            subdomain: "acme".to_string(),
            email: "agent@acme.test".to_string(),
            api_token: "test_token".to_string(),
            base_url: None,
        };
        ZendeskClient::new(&config).expect("Failed to create test client")
    }

    #[test]
    fn test_new_derives_base_url_and_username() {
        let client = test_client();
        assert_eq!(client.base_url, "https://acme.zendesk.com/api/v2");
        assert_eq!(client.username, "agent@acme.test/token");
    }

    #[test]
    fn test_ticket_web_url() {
        let client = test_client();
        assert_eq!(
            client.ticket_web_url(42),
            "https://acme.zendesk.com/agent/tickets/42"
        );
    }
}
