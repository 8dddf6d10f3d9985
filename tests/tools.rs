mod common;

use chrono::{TimeZone, Utc};
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zendesk_mcp::server::ZendeskServer;
use zendesk_mcp::tools::SearchFeatureFeedbackInput;

#[tokio::test]
async fn search_tickets_caps_results_at_per_page() {
    let server = MockServer::start().await;
    let tickets = (1..=5)
        .map(|id| ticket_json(id, &format!("Ticket {}", id), &[]))
        .collect();
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("query", "type:ticket printer"))
        .and(query_param("per_page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(tickets, 42)))
        .expect(1)
        .mount(&server)
        .await;

    let response = dispatcher_for(&server)
        .call(
            "search_tickets",
            json!({ "query": "  printer ", "per_page": 3 }),
        )
        .await;

    assert!(!response.is_error, "{}", response.content);
    let body = parse(&response.content);
    assert_eq!(body["tickets"].as_array().unwrap().len(), 3);
    assert_eq!(body["count"], 42);
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 3);
    assert_eq!(body["tickets"][0]["subject"], "Ticket 1");
    assert_eq!(body["tickets"][0]["status"], "open");
    assert_eq!(body["tickets"][0]["channel"], "email");
}

#[tokio::test]
async fn get_ticket_includes_comments_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/42.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticket": ticket_json(42, "Login broken", &["bug"])
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/42/comments.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "comments": [{ "id": 1, "body": "It fails on Safari", "author_id": 3 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = dispatcher_for(&server)
        .call("get_ticket", json!({ "ticket_id": 42 }))
        .await;

    assert!(!response.is_error, "{}", response.content);
    let body = parse(&response.content);
    assert_eq!(body["id"], 42);
    assert_eq!(body["description"], "Description of ticket 42");
    assert_eq!(body["url"], "https://acme.zendesk.com/agent/tickets/42");
    assert_eq!(body["comments"][0]["body"], "It fails on Safari");
    assert_eq!(body["comments"][0]["public"], true);
}

#[tokio::test]
async fn get_ticket_without_comments_skips_comment_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/42.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ticket": ticket_json(42, "Login broken", &[])
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tickets/42/comments.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "comments": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let response = dispatcher_for(&server)
        .call(
            "get_ticket",
            json!({ "ticket_id": 42, "include_comments": false }),
        )
        .await;

    assert!(!response.is_error, "{}", response.content);
    assert!(parse(&response.content).get("comments").is_none());
}

#[tokio::test]
async fn get_ticket_not_found_is_in_band_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets/999.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "RecordNotFound" })))
        .mount(&server)
        .await;

    let response = dispatcher_for(&server)
        .call("get_ticket", json!({ "ticket_id": 999 }))
        .await;

    assert!(response.is_error);
    assert!(response.content.starts_with("Error: "));
    assert!(response.content.contains("404"));
    assert!(response.content.contains("ticket 999"));
}

#[tokio::test]
async fn error_output_never_contains_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(format!("upstream rejected {}", API_TOKEN)),
        )
        .mount(&server)
        .await;

    let response = dispatcher_for(&server)
        .call("get_tickets_by_tag", json!({ "tag": "vip" }))
        .await;

    assert!(response.is_error);
    assert!(response.content.contains("500"));
    assert!(!response.content.contains(API_TOKEN));
    assert!(response.content.contains("[REDACTED]"));
}

#[tokio::test]
async fn search_articles_projects_excerpt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/help_center/articles/search.json"))
        .and(query_param("query", "single sign-on"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            vec![article_json(7, "Single sign-on")],
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let response = dispatcher_for(&server)
        .call("search_articles", json!({ "query": "single sign-on" }))
        .await;

    assert!(!response.is_error, "{}", response.content);
    let body = parse(&response.content);
    assert_eq!(body["articles"][0]["id"], 7);
    assert_eq!(body["articles"][0]["excerpt"], "Single sign-on explained.");
    assert_eq!(
        body["articles"][0]["url"],
        "https://acme.zendesk.com/hc/en-us/articles/7"
    );
}

#[tokio::test]
async fn get_article_returns_full_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/help_center/articles/7.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "article": article_json(7, "Single sign-on")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = dispatcher_for(&server)
        .call("get_article", json!({ "article_id": 7 }))
        .await;

    assert!(!response.is_error, "{}", response.content);
    let body = parse(&response.content);
    assert_eq!(body["body"], "<p>Single sign-on explained.</p>");
    assert_eq!(body["author_id"], 77);
}

#[tokio::test]
async fn feature_feedback_classifies_tickets_and_collects_articles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("query", "type:ticket dark mode created>2024-03-17"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            vec![
                ticket_json(1, "App crashes on login", &["bug", "mobile"]),
                ticket_json(2, "Please add dark mode", &["enhancement"]),
                ticket_json(3, "How do I turn on dark mode?", &[]),
            ],
            3,
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/help_center/articles/search.json"))
        .and(query_param("query", "dark mode"))
        .and(query_param("per_page", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            vec![article_json(70, "Using dark mode")],
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let input = SearchFeatureFeedbackInput {
        feature_name: "dark mode".to_string(),
        include_solved: true,
        days_back: 90,
    };
    let response = dispatcher_for(&server)
        .search_feature_feedback_at(input, now)
        .await;

    assert!(!response.is_error, "{}", response.content);
    let body = parse(&response.content);
    assert_eq!(body["feature_name"], "dark mode");
    assert_eq!(body["created_after"], "2024-03-17");
    assert_eq!(
        body["summary"],
        json!({
            "total_tickets": 3,
            "bug_reports": 1,
            "feature_requests": 1,
            "support_questions": 1,
            "related_articles": 1,
            "support_overlap": 1
        })
    );
    assert_eq!(body["bug_reports"][0]["id"], 1);
    assert_eq!(body["feature_requests"][0]["id"], 2);
    assert_eq!(body["support_questions"][0]["id"], 3);
    assert_eq!(body["related_articles"][0]["id"], 70);
}

#[tokio::test]
async fn feature_feedback_unsolved_only_adds_status_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param(
            "query",
            "type:ticket dark mode created>2024-06-08 status<solved",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(vec![], 0)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/help_center/articles/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(vec![], 0)))
        .expect(1)
        .mount(&server)
        .await;

    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let input = SearchFeatureFeedbackInput {
        feature_name: "dark mode".to_string(),
        include_solved: false,
        days_back: 7,
    };
    let response = dispatcher_for(&server)
        .search_feature_feedback_at(input, now)
        .await;

    assert!(!response.is_error, "{}", response.content);
    assert_eq!(parse(&response.content)["summary"]["total_tickets"], 0);
}

#[tokio::test]
async fn feature_feedback_fails_when_article_search_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            vec![ticket_json(1, "Crash", &["bug"])],
            1,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/help_center/articles/search.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Help Center unavailable"))
        .mount(&server)
        .await;

    let response = dispatcher_for(&server)
        .call("search_feature_feedback", json!({ "feature_name": "export" }))
        .await;

    assert!(response.is_error);
    assert!(response.content.contains("503"));
}

#[tokio::test]
async fn blank_tag_is_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(vec![], 0)))
        .expect(0)
        .mount(&server)
        .await;

    let response = dispatcher_for(&server)
        .call("get_tickets_by_tag", json!({ "tag": "  " }))
        .await;

    assert!(response.is_error);
    assert_eq!(
        response.content,
        "Error: validation error: tag is required and cannot be empty"
    );
}

#[tokio::test]
async fn unknown_tool_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = dispatcher_for(&server)
        .call("update_ticket", json!({ "ticket_id": 1 }))
        .await;

    assert!(response.is_error);
    assert_eq!(response.content, "Error: unknown tool: update_ticket");
}

#[tokio::test]
async fn feature_feedback_fails_when_ticket_search_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("search backend down"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/help_center/articles/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(
            vec![article_json(70, "Exporting data")],
            1,
        )))
        .mount(&server)
        .await;

    let response = dispatcher_for(&server)
        .call("search_feature_feedback", json!({ "feature_name": "export" }))
        .await;

    assert!(response.is_error);
    assert!(response.content.contains("500"));
    assert!(!response.content.contains("related_articles"));
}

#[tokio::test]
async fn feature_feedback_rejects_unrepresentable_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(vec![], 0)))
        .expect(0)
        .mount(&server)
        .await;

    let response = dispatcher_for(&server)
        .call(
            "search_feature_feedback",
            json!({ "feature_name": "export", "days_back": u32::MAX }),
        )
        .await;

    assert!(response.is_error);
    assert_eq!(
        response.content,
        "Error: validation error: days_back is out of range"
    );
}

#[tokio::test]
async fn mcp_tool_call_wraps_success_as_text_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/help_center/articles/7.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "article": article_json(7, "Single sign-on")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut arguments = serde_json::Map::new();
    arguments.insert("article_id".to_string(), json!(7));
    let result = ZendeskServer::new(client_for(&server))
        .handle_call("get_article", Some(arguments))
        .await;

    let value = serde_json::to_value(&result).unwrap();
    assert_ne!(value["isError"], json!(true));
    let text = value["content"][0]["text"].as_str().unwrap();
    assert_eq!(parse(text)["id"], 7);
}

#[tokio::test]
async fn mcp_tool_call_reports_unknown_tool_in_band() {
    let server = MockServer::start().await;

    let result = ZendeskServer::new(client_for(&server))
        .handle_call("delete_ticket", None)
        .await;

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["isError"], json!(true));
    assert_eq!(value["content"][0]["text"], "Error: unknown tool: delete_ticket");
}
