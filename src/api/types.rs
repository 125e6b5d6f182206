//! Jira API request and response types.
//!
//! These model the REST API v3 and Agile API 1.0 payloads the CLI reads and
//! writes. Issue fields are schema-free: a few are typed for display, the
//! rest are carried through untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::adf::AtlassianDoc;

/// The current authenticated user.
///
/// Returned by `GET /rest/api/3/myself`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub account_id: String,
    pub display_name: String,
    /// May be empty if the user hides it.
    #[serde(default)]
    pub email_address: String,
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// Search result from a JQL query, also used for sprint issue listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Total number of matching issues.
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// A Jira issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    /// The issue key (e.g., "PROJ-123").
    pub key: String,
    #[serde(rename = "self", default)]
    pub self_url: String,
    #[serde(default)]
    pub fields: IssueFields,
}

impl Issue {
    pub fn summary(&self) -> &str {
        &self.fields.summary
    }

    /// Status name, or empty when the field was not requested.
    pub fn status(&self) -> &str {
        self.fields
            .status
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or_default()
    }

    pub fn issue_type(&self) -> &str {
        self.fields
            .issuetype
            .as_ref()
            .map(|t| t.name.as_str())
            .unwrap_or_default()
    }

    pub fn priority(&self) -> Option<&str> {
        self.fields.priority.as_ref().map(|p| p.name.as_str())
    }

    pub fn assignee(&self) -> Option<&str> {
        self.fields.assignee.as_ref().map(|a| a.display_name.as_str())
    }

    /// Get the assignee display name, or "Unassigned" if not set.
    pub fn assignee_name(&self) -> &str {
        self.assignee().unwrap_or("Unassigned")
    }

    pub fn project_key(&self) -> Option<&str> {
        self.fields.project.as_ref().map(|p| p.key.as_str())
    }

    /// The description flattened to plain text.
    pub fn description_text(&self) -> String {
        self.fields
            .description
            .as_ref()
            .and_then(AtlassianDoc::from_value)
            .map(|doc| doc.to_plain_text())
            .unwrap_or_default()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.fields.summary)
    }
}

/// Issue fields.
///
/// Only the fields the CLI displays are typed; everything else lands in
/// `extra` and is serialized back out unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuetype: Option<IssueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    /// Usually an ADF document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    /// All remaining fields, keyed by field id.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_category: Option<StatusCategory>,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Status category (groups statuses into to-do, in-progress, done).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCategory {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueType {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtask: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Priority {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub account_id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: String,
}

/// Body for `POST /issue`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueRequest {
    pub fields: Map<String, Value>,
}

/// Body for `PUT /issue/{key}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateIssueRequest {
    pub fields: Map<String, Value>,
}

/// Response from `POST /issue`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self", default)]
    pub self_url: String,
}

/// A workflow transition available on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
    /// The status the issue moves to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Status>,
}

impl Transition {
    /// Name of the target status, or empty if the server omitted it.
    pub fn to_status(&self) -> &str {
        self.to.as_ref().map(|s| s.name.as_str()).unwrap_or_default()
    }
}

/// Response from `GET /issue/{key}/transitions`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// Body for `POST /issue/{key}/transitions`.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionRequest {
    pub transition: TransitionId,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitionId {
    pub id: String,
}

/// A comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub body: Option<AtlassianDoc>,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
}

impl Comment {
    pub fn body_text(&self) -> String {
        self.body
            .as_ref()
            .map(AtlassianDoc::to_plain_text)
            .unwrap_or_default()
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.display_name.as_str())
            .unwrap_or("Unknown")
    }
}

/// Response from `GET /issue/{key}/comment`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsResponse {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Body for `POST /issue/{key}/comment`.
#[derive(Debug, Clone, Serialize)]
pub struct AddCommentRequest {
    pub body: AtlassianDoc,
}

/// An agile board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: u64,
    pub name: String,
    /// `scrum`, `kanban` or `simple`.
    #[serde(rename = "type", default)]
    pub board_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<BoardLocation>,
}

impl Board {
    pub fn project_key(&self) -> &str {
        self.location
            .as_ref()
            .and_then(|l| l.project_key.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardLocation {
    #[serde(default)]
    pub project_key: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
}

/// Response from `GET /rest/agile/1.0/board`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardsResponse {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub is_last: bool,
    #[serde(default)]
    pub values: Vec<Board>,
}

/// A sprint on a scrum board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: u64,
    pub name: String,
    /// `future`, `active` or `closed`.
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_board_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

/// Response from `GET /rest/agile/1.0/board/{id}/sprint`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintsResponse {
    #[serde(default)]
    pub is_last: bool,
    #[serde(default)]
    pub values: Vec<Sprint>,
}

/// Error body Jira returns alongside a 4xx/5xx status.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: std::collections::BTreeMap<String, Value>,
}

impl ErrorEnvelope {
    /// All messages, `errorMessages` first, then `field: message` pairs.
    pub fn into_messages(self) -> Vec<String> {
        let mut messages = self.error_messages;
        messages.extend(self.errors.into_iter().map(|(field, message)| match message {
            Value::String(s) => format!("{}: {}", field, s),
            other => format!("{}: {}", field, other),
        }));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_minimal_issue() {
        let json = r#"{
            "id": "10001",
            "key": "PROJ-123",
            "self": "https://company.atlassian.net/rest/api/3/issue/10001",
            "fields": {
                "summary": "Test issue",
                "status": {"id": "1", "name": "To Do"},
                "issuetype": {"id": "10001", "name": "Bug"}
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.key, "PROJ-123");
        assert_eq!(issue.summary(), "Test issue");
        assert_eq!(issue.status(), "To Do");
        assert_eq!(issue.issue_type(), "Bug");
        assert!(issue.priority().is_none());
        assert_eq!(issue.assignee_name(), "Unassigned");
        assert_eq!(issue.description_text(), "");
    }

    #[test]
    fn test_issue_without_fields() {
        let issue: Issue = serde_json::from_value(json!({"id": "1", "key": "A-1"})).unwrap();
        assert_eq!(issue.summary(), "");
        assert_eq!(issue.status(), "");
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let issue: Issue = serde_json::from_value(json!({
            "id": "10001",
            "key": "PROJ-7",
            "fields": {
                "summary": "Story",
                "customfield_10016": 5.0,
                "labels": ["backend"],
                "assignee": {"accountId": "abc", "displayName": "Jane Smith"},
                "project": {"id": "1", "key": "PROJ", "name": "Project"},
                "description": {
                    "type": "doc",
                    "version": 1,
                    "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Details"}]}]
                }
            }
        }))
        .unwrap();

        assert_eq!(issue.fields.extra.get("customfield_10016"), Some(&json!(5.0)));
        assert_eq!(issue.fields.extra.get("labels"), Some(&json!(["backend"])));
        assert!(issue.fields.extra.get("summary").is_none());
        assert_eq!(issue.assignee(), Some("Jane Smith"));
        assert_eq!(issue.project_key(), Some("PROJ"));
        assert_eq!(issue.description_text(), "Details");

        let out = serde_json::to_value(&issue).unwrap();
        assert_eq!(out["fields"]["customfield_10016"], json!(5.0));
        assert_eq!(out["fields"]["summary"], json!("Story"));
    }

    #[test]
    fn test_null_description_and_assignee() {
        let issue: Issue = serde_json::from_value(json!({
            "id": "1",
            "key": "A-1",
            "fields": {"summary": "s", "description": null, "assignee": null}
        }))
        .unwrap();
        assert!(issue.fields.description.is_none());
        assert!(issue.assignee().is_none());
    }

    #[test]
    fn test_parse_search_result() {
        let result: SearchResult = serde_json::from_value(json!({
            "startAt": 0,
            "maxResults": 50,
            "total": 2,
            "issues": [
                {"id": "10001", "key": "PROJ-1", "fields": {"summary": "First"}},
                {"id": "10002", "key": "PROJ-2", "fields": {"summary": "Second"}}
            ]
        }))
        .unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.issues[1].key, "PROJ-2");
    }

    #[test]
    fn test_parse_transitions() {
        let response: TransitionsResponse = serde_json::from_value(json!({
            "expand": "transitions",
            "transitions": [
                {"id": "11", "name": "In Progress", "to": {"id": "3", "name": "In Progress"}},
                {"id": "21", "name": "Done", "to": {"id": "10001", "name": "Done"}}
            ]
        }))
        .unwrap();
        assert_eq!(response.transitions.len(), 2);
        assert_eq!(response.transitions[1].to_status(), "Done");
    }

    #[test]
    fn test_transition_request_shape() {
        let body = TransitionRequest {
            transition: TransitionId {
                id: "21".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"transition": {"id": "21"}})
        );
    }

    #[test]
    fn test_parse_boards_and_sprints() {
        let boards: BoardsResponse = serde_json::from_value(json!({
            "maxResults": 50,
            "startAt": 0,
            "isLast": true,
            "values": [
                {"id": 84, "name": "PROJ board", "type": "scrum",
                 "location": {"projectKey": "PROJ", "projectName": "Project"}}
            ]
        }))
        .unwrap();
        assert!(boards.is_last);
        assert_eq!(boards.values[0].board_type, "scrum");
        assert_eq!(boards.values[0].project_key(), "PROJ");

        let sprints: SprintsResponse = serde_json::from_value(json!({
            "isLast": true,
            "values": [
                {"id": 37, "name": "Sprint 1", "state": "active",
                 "startDate": "2024-01-01T00:00:00.000Z", "originBoardId": 84}
            ]
        }))
        .unwrap();
        assert!(sprints.is_last);
        assert_eq!(sprints.values[0].state, "active");
        assert_eq!(sprints.values[0].origin_board_id, Some(84));
    }

    #[test]
    fn test_comment_accessors() {
        let comment: Comment = serde_json::from_value(json!({
            "id": "100",
            "author": {"accountId": "a", "displayName": "Jane"},
            "body": {"type": "doc", "version": 1,
                     "content": [{"type": "paragraph", "content": [{"type": "text", "text": "LGTM"}]}]},
            "created": "2024-01-15T10:00:00.000+0000"
        }))
        .unwrap();
        assert_eq!(comment.author_name(), "Jane");
        assert_eq!(comment.body_text(), "LGTM");
    }

    #[test]
    fn test_error_envelope_messages() {
        let envelope: ErrorEnvelope = serde_json::from_value(json!({
            "errorMessages": ["Issue does not exist"],
            "errors": {"summary": "Summary is required", "assignee": "Bad user"}
        }))
        .unwrap();
        assert_eq!(
            envelope.into_messages(),
            vec![
                "Issue does not exist".to_string(),
                "assignee: Bad user".to_string(),
                "summary: Summary is required".to_string(),
            ]
        );
    }
}
