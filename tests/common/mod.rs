#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use wiremock::MockServer;

use zendesk_mcp::config::Config;
use zendesk_mcp::dispatch::ToolDispatcher;
use zendesk_mcp::zendesk_client::ZendeskClient;

pub const EMAIL: &str = "agent@acme.test";
pub const API_TOKEN: &str = "s3cr3t-token-abc123";

pub fn config_for(server: &MockServer) -> Config {
    Config {
        subdomain: "acme".to_string(),
        email: EMAIL.to_string(),
        api_token: API_TOKEN.to_string(),
        base_url: Some(server.uri()),
    }
}

pub fn client_for(server: &MockServer) -> ZendeskClient {
    ZendeskClient::new(&config_for(server)).expect("client")
}

pub fn dispatcher_for(server: &MockServer) -> ToolDispatcher {
    ToolDispatcher::new(client_for(server))
}

/// The Authorization header Zendesk expects for token auth.
pub fn expected_auth_header() -> String {
    format!("Basic {}", STANDARD.encode(format!("{}/token:{}", EMAIL, API_TOKEN)))
}

pub fn ticket_json(id: u64, subject: &str, tags: &[&str]) -> Value {
    json!({
        "id": id,
        "subject": subject,
        "description": format!("Description of ticket {}", id),
        "status": "open",
        "priority": "normal",
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-02T11:30:00Z",
        "tags": tags,
        "custom_fields": [],
        "via": { "channel": "email" }
    })
}

pub fn article_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "body": format!("<p>{} explained.</p>", title),
        "author_id": 77,
        "html_url": format!("https://acme.zendesk.com/hc/en-us/articles/{}", id),
        "section_id": 900,
        "label_names": ["howto"],
        "created_at": "2024-01-10T09:00:00Z",
        "updated_at": "2024-02-10T09:00:00Z"
    })
}

pub fn search_page(results: Vec<Value>, count: u64) -> Value {
    json!({
        "results": results,
        "count": count,
        "next_page": null,
        "previous_page": null
    })
}

pub fn parse(content: &str) -> Value {
    serde_json::from_str(content).expect("tool output is JSON")
}
