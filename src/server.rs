//! MCP server implementation for Zendesk.
//!
//! This module defines the `ZendeskServer` struct that implements the MCP
//! `ServerHandler` trait. Tool listing and tool calls are both answered by
//! the [`ToolDispatcher`], so unknown tool names and malformed arguments
//! come back as error-flagged tool results rather than protocol faults.

use std::future::Future;
use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, Content, ErrorData, JsonObject, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    RoleServer, ServerHandler,
};
use serde_json::Value;

use crate::dispatch::{ToolDispatcher, ToolResponse};
use crate::zendesk_client::ZendeskClient;

impl From<ToolResponse> for CallToolResult {
    fn from(response: ToolResponse) -> Self {
        let content = vec![Content::text(response.content)];
        if response.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}

/// The Zendesk MCP server.
#[derive(Clone)]
pub struct ZendeskServer {
    /// Executes tools against the Zendesk API.
    dispatcher: ToolDispatcher,
}

impl ZendeskServer {
    /// Creates a new Zendesk server instance.
    ///
    /// # Arguments
    ///
    /// * `client` - The Zendesk client for API operations
    pub fn new(client: ZendeskClient) -> Self {
        Self {
            dispatcher: ToolDispatcher::new(client),
        }
    }

    /// The tool catalog as MCP tool definitions.
    pub fn tools() -> Vec<Tool> {
        ToolDispatcher::catalog()
            .into_iter()
            .map(|tool| {
                let schema = match tool.input_schema {
                    Value::Object(map) => map,
                    _ => JsonObject::new(),
                };
                Tool::new(tool.name, tool.description, Arc::new(schema))
            })
            .collect()
    }

    /// Runs one tool call and wraps the outcome in an MCP tool result.
    pub async fn handle_call(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let arguments = arguments.map(Value::Object).unwrap_or(Value::Null);
        self.dispatcher.call(name, arguments).await.into()
    }
}

impl ServerHandler for ZendeskServer {
    /// Returns server information for the MCP initialize handshake.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Read-only access to Zendesk Support and Help Center. \
                 Use search_tickets or get_tickets_by_tag to find tickets, get_ticket for \
                 details and comments, search_articles and get_article for knowledge-base \
                 content, and search_feature_feedback to see how customers talk about a feature."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, ErrorData>> + Send + '_ {
        std::future::ready(Ok(ListToolsResult::with_all_items(Self::tools())))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            tracing::debug!(tool = %request.name, "Tool call received");
            Ok(self.handle_call(&request.name, request.arguments).await)
        }
    }
}
