//! Issue operations: get, create, update, delete, assign.

use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

use super::adf::AtlassianDoc;
use super::client::{decode, JiraClient};
use super::error::{ApiError, Result};
use super::query::segment;
use super::types::{CreateIssueRequest, CreatedIssue, Issue, UpdateIssueRequest};

impl JiraClient {
    fn issue_url(&self, key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(ApiError::MissingIdentifier("issue key"));
        }
        Ok(self.api_url(&format!("issue/{}", segment(key))))
    }

    /// Get a single issue by key.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn get_issue(&self, key: &str) -> Result<Issue> {
        let url = self.issue_url(key)?;
        let body = self.get(&url).await?;
        let issue: Issue = decode(&body, "issue")?;
        debug!("Fetched issue: {}", issue.key);
        Ok(issue)
    }

    /// Create an issue. Build the request with [`build_create_request`].
    #[instrument(skip(self, request))]
    pub async fn create_issue(&self, request: &CreateIssueRequest) -> Result<CreatedIssue> {
        let body = self.post(&self.api_url("issue"), request).await?;
        decode(&body, "created issue")
    }

    /// Update an issue's fields. The server validates field names.
    #[instrument(skip(self, request), fields(issue_key = %key))]
    pub async fn update_issue(&self, key: &str, request: &UpdateIssueRequest) -> Result<()> {
        let url = self.issue_url(key)?;
        self.put(&url, request).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn delete_issue(&self, key: &str) -> Result<()> {
        let url = self.issue_url(key)?;
        self.delete(&url).await?;
        Ok(())
    }

    /// Assign an issue. An empty `account_id` unassigns it.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn assign_issue(&self, key: &str, account_id: &str) -> Result<()> {
        let url = format!("{}/assignee", self.issue_url(key)?);
        self.put(&url, &assign_body(account_id)).await?;
        Ok(())
    }

    /// Edit metadata: which fields can be set on the issue and their schemas.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn get_edit_meta(&self, key: &str) -> Result<Value> {
        let url = format!("{}/editmeta", self.issue_url(key)?);
        let body = self.get(&url).await?;
        decode(&body, "edit metadata")
    }
}

/// Body for the assignee sub-resource.
///
/// Jira unassigns on an explicit `null`; leaving the field out is rejected.
fn assign_body(account_id: &str) -> Value {
    if account_id.is_empty() {
        json!({ "accountId": Value::Null })
    } else {
        json!({ "accountId": account_id })
    }
}

/// Build the body for creating an issue.
///
/// `extra_fields` are merged last and win over the defaults built from the
/// other arguments.
pub fn build_create_request(
    project_key: &str,
    issue_type: &str,
    summary: &str,
    description: &str,
    extra_fields: Map<String, Value>,
) -> CreateIssueRequest {
    let mut fields = Map::new();
    fields.insert("project".to_string(), json!({ "key": project_key }));
    fields.insert("issuetype".to_string(), json!({ "name": issue_type }));
    fields.insert("summary".to_string(), json!(summary));

    let description = AtlassianDoc::from_plain_text(description);
    if !description.is_empty() {
        fields.insert("description".to_string(), json!(description));
    }

    fields.extend(extra_fields);
    CreateIssueRequest { fields }
}

/// Build the body for updating an issue.
pub fn build_update_request(fields: Map<String, Value>) -> UpdateIssueRequest {
    UpdateIssueRequest { fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::TestServer;

    fn client() -> JiraClient {
        JiraClient::with_site("https://company.atlassian.net", "a@b.c", "t").unwrap()
    }

    #[test]
    fn test_assign_body_sends_explicit_null() {
        let body = assign_body("");
        let object = body.as_object().unwrap();
        assert!(object.contains_key("accountId"));
        assert_eq!(object["accountId"], Value::Null);
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"accountId":null}"#);
    }

    #[test]
    fn test_assign_body_with_account() {
        assert_eq!(assign_body("abc123"), json!({ "accountId": "abc123" }));
    }

    #[test]
    fn test_build_create_request_defaults() {
        let request = build_create_request("PROJ", "Bug", "Login fails", "", Map::new());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "fields": {
                    "project": {"key": "PROJ"},
                    "issuetype": {"name": "Bug"},
                    "summary": "Login fails"
                }
            })
        );
    }

    #[test]
    fn test_build_create_request_skips_blank_description() {
        let request = build_create_request("PROJ", "Task", "s", "  \n ", Map::new());
        assert!(!request.fields.contains_key("description"));
    }

    #[test]
    fn test_build_create_request_with_description() {
        let request = build_create_request("PROJ", "Task", "s", "Steps to reproduce", Map::new());
        let description = &request.fields["description"];
        assert_eq!(description["type"], "doc");
        assert_eq!(
            description["content"][0]["content"][0]["text"],
            "Steps to reproduce"
        );
    }

    #[test]
    fn test_build_create_request_extras_override_defaults() {
        let mut extras = Map::new();
        extras.insert("summary".to_string(), json!("From extras"));
        extras.insert("labels".to_string(), json!(["cli"]));

        let request = build_create_request("PROJ", "Task", "Original", "", extras);
        assert_eq!(request.fields["summary"], json!("From extras"));
        assert_eq!(request.fields["labels"], json!(["cli"]));
        assert_eq!(request.fields["project"], json!({"key": "PROJ"}));
    }

    #[test]
    fn test_build_update_request_wraps_fields() {
        let mut fields = Map::new();
        fields.insert("summary".to_string(), json!("New"));
        let request = build_update_request(fields);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"fields": {"summary": "New"}})
        );
    }

    #[test]
    fn test_issue_url_escapes_key() {
        let client = client();
        assert_eq!(
            client.issue_url("PROJ-1").unwrap(),
            "https://company.atlassian.net/rest/api/3/issue/PROJ-1"
        );
        assert_eq!(
            client.issue_url("weird key").unwrap(),
            "https://company.atlassian.net/rest/api/3/issue/weird%20key"
        );
    }

    #[tokio::test]
    async fn test_empty_key_fails_without_request() {
        // The site does not resolve; reaching the network would give a
        // Network error instead of MissingIdentifier.
        let client = JiraClient::with_site("http://invalid.invalid", "a@b.c", "t").unwrap();

        assert!(matches!(
            client.get_issue("").await,
            Err(ApiError::MissingIdentifier("issue key"))
        ));
        assert!(matches!(
            client.delete_issue("").await,
            Err(ApiError::MissingIdentifier(_))
        ));
        assert!(matches!(
            client.assign_issue("", "abc").await,
            Err(ApiError::MissingIdentifier(_))
        ));
        assert!(matches!(
            client
                .update_issue("", &build_update_request(Map::new()))
                .await,
            Err(ApiError::MissingIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn test_unassign_puts_null_account() {
        let server = TestServer::start(|_| (204, String::new())).await;
        server.client().assign_issue("PROJ-7", "").await.unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(requests[0].path(), "/rest/api/3/issue/PROJ-7/assignee");
        assert_eq!(requests[0].body, r#"{"accountId":null}"#);
    }
}
