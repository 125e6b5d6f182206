//! Jira API client implementation.
//!
//! This module owns the HTTP transport: authentication, one request/response
//! exchange, and translation of error responses. The resource-specific
//! operations live in sibling modules as further `impl JiraClient` blocks.

use std::time::Duration;

use reqwest::{header, Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::types::{CurrentUser, ErrorEnvelope};
use crate::config::Config;

/// Request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The Jira API client.
#[derive(Debug)]
pub struct JiraClient {
    client: Client,
    /// Site root, e.g. `https://company.atlassian.net`.
    site_url: String,
    /// REST API v3 root.
    base_url: String,
    /// Agile API 1.0 root.
    agile_url: String,
    auth: Auth,
}

impl JiraClient {
    /// Create a client for the configured Jira Cloud site.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingConfig`] if the domain, email or token is
    /// empty. No request is made in that case.
    pub fn new(config: &Config) -> Result<Self> {
        if config.domain.is_empty() {
            return Err(ApiError::MissingConfig("domain"));
        }
        if config.email.is_empty() {
            return Err(ApiError::MissingConfig("email"));
        }
        if config.api_token.is_empty() {
            return Err(ApiError::MissingConfig("API token"));
        }

        let site_url = format!("https://{}.atlassian.net", config.domain);
        Self::with_site(&site_url, &config.email, &config.api_token)
    }

    /// Create a client for an explicit site URL.
    pub fn with_site(site_url: &str, email: &str, token: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)?;
        let site_url = site_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url: format!("{}/rest/api/3", site_url),
            agile_url: format!("{}/rest/agile/1.0", site_url),
            site_url,
            auth: Auth::new(email, token),
        })
    }

    /// URL under the REST API v3 root.
    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// URL under the Agile API root.
    pub(crate) fn agile_url(&self, path: &str) -> String {
        format!("{}/{}", self.agile_url, path)
    }

    /// The web URL for viewing an issue in a browser.
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.site_url, key)
    }

    /// The email the client authenticates as.
    pub fn email(&self) -> &str {
        self.auth.email()
    }

    /// Get the current authenticated user.
    ///
    /// Calls `GET /rest/api/3/myself`; also serves as a credentials check.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<CurrentUser> {
        let body = self.get(&self.api_url("myself")).await?;
        decode(&body, "current user")
    }

    pub(crate) async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.request::<()>(Method::GET, url, None).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Vec<u8>> {
        self.request(Method::POST, url, Some(body)).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Vec<u8>> {
        self.request(Method::PUT, url, Some(body)).await
    }

    pub(crate) async fn delete(&self, url: &str) -> Result<Vec<u8>> {
        self.request::<()>(Method::DELETE, url, None).await
    }

    /// Perform one authenticated exchange.
    ///
    /// Returns the raw body for statuses below 400; anything else becomes an
    /// [`ApiError::Api`].
    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        debug!("→ {} {}", method, url);
        let response = request.send().await?;
        let status = response.status();
        debug!(
            "← {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        );

        let bytes = response.bytes().await?;
        if status.as_u16() >= 400 {
            return Err(error_from_response(status, &bytes));
        }

        Ok(bytes.to_vec())
    }
}

/// Decode a successful response body.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidResponse(format!("failed to parse {}: {}", what, e)))
}

/// Translate an error status and body into an [`ApiError::Api`].
///
/// A JSON body is read as Jira's error envelope; anything else leaves the
/// message list empty so only the status text is shown.
pub(crate) fn error_from_response(status: StatusCode, body: &[u8]) -> ApiError {
    let messages = serde_json::from_slice::<ErrorEnvelope>(body)
        .map(ErrorEnvelope::into_messages)
        .unwrap_or_default();

    ApiError::Api {
        status: status.as_u16(),
        messages,
    }
}
