//! Basic authentication for the Jira Cloud API.
//!
//! Jira Cloud accepts HTTP Basic Auth where the password is an API token
//! generated at <https://id.atlassian.com/manage-profile/security/api-tokens>.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Authentication credentials for Jira.
#[derive(Clone)]
pub struct Auth {
    /// The user's email address.
    email: String,
    /// The complete `Basic ...` header value.
    auth_header: String,
}

impl Auth {
    /// Create credentials from an email and API token.
    ///
    /// The token is encoded immediately and the raw token is not stored.
    pub fn new(email: &str, token: &str) -> Self {
        Self {
            email: email.to_string(),
            auth_header: build_auth_header(email, token),
        }
    }

    /// The value for the `Authorization` header.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    /// The email the credentials belong to.
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("email", &self.email)
            .field("auth_header", &"Basic ***")
            .finish()
    }
}

/// Encode `email:token` in Base64 and prepend `Basic `.
fn build_auth_header(email: &str, token: &str) -> String {
    let credentials = format!("{}:{}", email, token);
    format!("Basic {}", BASE64.encode(credentials.as_bytes()))
}
