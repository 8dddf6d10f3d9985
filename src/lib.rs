//! # zendesk-mcp
//!
//! An MCP (Model Context Protocol) server that gives assistants read-only
//! access to a Zendesk account: Support tickets and their comments, and
//! Help Center knowledge-base articles.
//!
//! ## Features
//!
//! - **Ticket lookup**: search with Zendesk query syntax, filter by tag, fetch one ticket with its comments
//! - **Knowledge base**: search and fetch Help Center articles
//! - **Feature feedback**: gather recent tickets about a feature and split them into bug reports, feature requests and support questions
//! - **Security**: the API token is never logged or exposed in tool output
//!
//! ## Architecture
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types with token-redacting display
//! - [`zendesk_client`] - HTTP client for the Zendesk REST API
//! - [`models`] - Zendesk API payload types
//! - [`feedback`] - Date-bounded queries and ticket classification
//! - [`tools`] - Tool inputs and response projections
//! - [`dispatch`] - Tool catalog and call-by-name dispatch
//! - [`server`] - MCP server implementation with tool routing
//!
//! ## Usage
//!
//! ```bash
//! export ZENDESK_SUBDOMAIN=acme
//! export ZENDESK_EMAIL=agent@acme.com
//! export ZENDESK_API_TOKEN=your-api-token
//!
//! ./zendesk-mcp
//! ```
//!
//! Optional:
//! - `ZENDESK_BASE_URL`: override the API root (e.g. for a proxy)
//! - `RUST_LOG`: Log level (e.g., `zendesk_mcp=debug`)
//!
//! ## Example
//!
//! Driving a tool without an MCP transport:
//!
//! ```ignore
//! use zendesk_mcp::config::Config;
//! use zendesk_mcp::dispatch::ToolDispatcher;
//! use zendesk_mcp::zendesk_client::ZendeskClient;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let dispatcher = ToolDispatcher::new(ZendeskClient::new(&config)?);
//!
//!     let response = dispatcher
//!         .call("get_tickets_by_tag", serde_json::json!({ "tag": "vip" }))
//!         .await;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod feedback;
pub mod models;
pub mod server;
pub mod tools;
pub mod zendesk_client;
