//! Error types for the Zendesk MCP server.
//!
//! This module defines `ZendeskError`, the unified error type used throughout
//! the crate for consistent error handling and propagation.
//!
//! # Security
//!
//! Error messages can carry raw response bodies from the Zendesk API. Use
//! `sanitized_display()` before logging an error or returning it to a tool
//! caller so the API token never leaves the process.

use thiserror::Error;

/// Unified error type for all Zendesk operations.
///
/// Each variant provides specific context about the failure, enabling
/// meaningful error messages without leaking the API token.
#[derive(Error, Debug)]
pub enum ZendeskError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP response returned a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The raw response body, usually a Zendesk error document.
        body: String,
    },

    /// A single-resource fetch came back with HTTP 404.
    #[error("{resource} not found (HTTP {status})")]
    NotFound {
        /// Description of the missing resource, e.g. `ticket 42`.
        resource: String,
        /// The HTTP status code returned (always 404).
        status: reqwest::StatusCode,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Tool arguments failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A tool call named an operation that is not in the catalog.
    #[error("unknown tool: {name}")]
    UnknownTool {
        /// The name the caller asked for.
        name: String,
    },

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl ZendeskError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        ZendeskError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ZendeskError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ZendeskError::Validation(message.into())
    }

    /// Creates a not found error for the described resource.
    pub fn not_found(resource: impl Into<String>) -> Self {
        ZendeskError::NotFound {
            resource: resource.into(),
            status: reqwest::StatusCode::NOT_FOUND,
        }
    }

    /// Creates an unknown tool error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        ZendeskError::UnknownTool { name: name.into() }
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        ZendeskError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Returns the HTTP status carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ZendeskError::HttpStatus { status, .. } | ZendeskError::NotFound { status, .. } => {
                Some(*status)
            }
            ZendeskError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Returns true if this error means the credentials were rejected.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.status(),
            Some(reqwest::StatusCode::UNAUTHORIZED) | Some(reqwest::StatusCode::FORBIDDEN)
        )
    }

    /// Replaces every occurrence of `secret` in `message` with `[REDACTED]`.
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message.replace(secret, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    ///
    /// Use this when you need to include error details in logs or responses
    /// and want to ensure no sensitive data is leaked.
    #[must_use]
    pub fn sanitized_display(&self, secret: &str) -> String {
        Self::sanitize_message(&self.to_string(), secret)
    }
}
