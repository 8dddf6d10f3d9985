//! Configuration management for the Zendesk MCP server.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present.

use std::env;
use std::fmt;

use url::Url;

use crate::error::ZendeskError;

/// Environment variable holding the tenant subdomain.
pub const SUBDOMAIN_VAR: &str = "ZENDESK_SUBDOMAIN";
/// Environment variable holding the account email.
pub const EMAIL_VAR: &str = "ZENDESK_EMAIL";
/// Environment variable holding the API token.
pub const API_TOKEN_VAR: &str = "ZENDESK_API_TOKEN";
/// Optional environment variable overriding the derived API root.
pub const BASE_URL_VAR: &str = "ZENDESK_BASE_URL";

/// Configuration for connecting to a Zendesk account.
///
/// The API token is stored but never logged or exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// Tenant subdomain (the `acme` in `acme.zendesk.com`).
    pub subdomain: String,

    /// Account email; combined with `/token` to form the Basic auth username.
    pub email: String,

    /// API token used as the Basic auth password.
    /// This value must never be logged or included in error messages.
    pub api_token: String,

    /// Explicit API root, replacing `https://<subdomain>.zendesk.com/api/v2`.
    pub base_url: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("subdomain", &self.subdomain)
            .field("email", &self.email)
            .field("api_token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `ZENDESK_SUBDOMAIN`: The tenant subdomain
    /// - `ZENDESK_EMAIL`: The account email
    /// - `ZENDESK_API_TOKEN`: The API token
    ///
    /// `ZENDESK_BASE_URL` is optional.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::Config` if any required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, ZendeskError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// `from_env` is this function backed by the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ZendeskError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let subdomain = Self::get_required(&lookup, SUBDOMAIN_VAR)?;
        let email = Self::get_required(&lookup, EMAIL_VAR)?;
        let api_token = Self::get_required(&lookup, API_TOKEN_VAR)?;

        let subdomain = Self::normalize_subdomain(&subdomain)?;
        let email = Self::validate_email(&email)?;
        Self::validate_api_token(&api_token)?;

        let base_url = lookup(BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(|value| Self::validate_base_url(&value))
            .transpose()?;

        Ok(Config {
            subdomain,
            email,
            api_token,
            base_url,
        })
    }

    /// Returns the API token.
    ///
    /// Callers must not log the returned value.
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// Returns the API root all endpoint paths are appended to.
    pub fn api_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => format!("https://{}.zendesk.com/api/v2", self.subdomain),
        }
    }

    /// Gets a required variable, returning an error if missing or empty.
    fn get_required<F>(lookup: &F, name: &str) -> Result<String, ZendeskError>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(name)
            .ok_or_else(|| ZendeskError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(ZendeskError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Reduces `acme`, `acme.zendesk.com` or `https://acme.zendesk.com/` to `acme`.
    fn normalize_subdomain(raw: &str) -> Result<String, ZendeskError> {
        let value = raw.trim().to_lowercase();
        let value = value
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        let value = value.strip_suffix(".zendesk.com").unwrap_or(value);

        if value.is_empty()
            || !value
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-')
        {
            return Err(ZendeskError::invalid_config(format!(
                "{} must be a bare subdomain like \"acme\", got: {:?}",
                SUBDOMAIN_VAR,
                raw.chars().take(64).collect::<String>()
            )));
        }

        Ok(value.to_string())
    }

    fn validate_email(raw: &str) -> Result<String, ZendeskError> {
        let email = raw.trim();
        match email.split_once('@') {
            Some((user, domain)) if !user.is_empty() && !domain.is_empty() => {
                Ok(email.to_string())
            }
            _ => Err(ZendeskError::invalid_config(format!(
                "{} must be an email address",
                EMAIL_VAR
            ))),
        }
    }

    /// Validates the API token is not a placeholder value.
    fn validate_api_token(token: &str) -> Result<(), ZendeskError> {
        let token_lower = token.to_lowercase();
        let placeholder_patterns = [
            "your_api_token",
            "your_token",
            "placeholder",
            "xxx",
            "changeme",
        ];

        for pattern in placeholder_patterns {
            if token_lower.contains(pattern) {
                return Err(ZendeskError::invalid_config(format!(
                    "{} appears to be a placeholder value",
                    API_TOKEN_VAR
                )));
            }
        }

        Ok(())
    }

    /// Validates and normalizes an explicit API root.
    fn validate_base_url(raw: &str) -> Result<String, ZendeskError> {
        let url = raw.trim().trim_end_matches('/');

        let parsed = Url::parse(url).map_err(|e| {
            ZendeskError::invalid_config(format!("{} is not a valid URL: {}", BASE_URL_VAR, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ZendeskError::invalid_config(format!(
                "{} must start with http:// or https://",
                BASE_URL_VAR
            )));
        }

        if url.ends_with("/api/v2") {
            Ok(url.to_string())
        } else {
            Ok(format!("{}/api/v2", url))
        }
    }
}
