use std::io::{self, BufRead, Write};

use serde_json::{json, Value};

use super::{parse_fields, render_issues};
use crate::api::{build_create_request, build_update_request, AtlassianDoc, JiraClient};
use crate::cli::{IssueCreateArgs, IssueListArgs, IssueUpdateArgs};
use crate::error::{AppError, Result};
use crate::output::{or_dash, short_time, View};

/// Account alias for the authenticated user.
const ME: &str = "me";

pub async fn get(client: &JiraClient, view: &mut View, key: &str) -> Result<()> {
    let issue = client.get_issue(key).await?;

    let pairs = [
        ("Key", issue.key.clone()),
        ("Summary", issue.summary().to_string()),
        ("Type", or_dash(issue.issue_type())),
        ("Status", or_dash(issue.status())),
        ("Priority", or_dash(issue.priority().unwrap_or_default())),
        ("Assignee", issue.assignee_name().to_string()),
        ("Project", or_dash(issue.project_key().unwrap_or_default())),
        (
            "Created",
            or_dash(&short_time(issue.fields.created.as_deref().unwrap_or_default())),
        ),
        (
            "Updated",
            or_dash(&short_time(issue.fields.updated.as_deref().unwrap_or_default())),
        ),
        ("URL", client.browse_url(&issue.key)),
    ];
    view.render_record(&pairs, &issue)?;

    let description = issue.description_text();
    if !description.is_empty() {
        view.text("")?;
        view.text(&description)?;
    }
    Ok(())
}

pub async fn list(client: &JiraClient, view: &mut View, args: IssueListArgs) -> Result<()> {
    let jql = list_jql(&args);
    tracing::debug!(%jql, "Listing issues");
    let issues = client.search_all(&jql, args.max, &[]).await?;
    render_issues(view, &issues)
}

/// Build the JQL for `issues list` from its filters.
fn list_jql(args: &IssueListArgs) -> String {
    let mut clauses = Vec::new();
    if let Some(project) = &args.project {
        clauses.push(format!("project = {}", quote(project)));
    }
    if let Some(status) = &args.status {
        clauses.push(format!("status = {}", quote(status)));
    }
    match args.assignee.as_deref() {
        Some(ME) => clauses.push("assignee = currentUser()".to_string()),
        Some(account) => clauses.push(format!("assignee = {}", quote(account))),
        None => {}
    }

    let order = "ORDER BY updated DESC";
    if clauses.is_empty() {
        order.to_string()
    } else {
        format!("{} {order}", clauses.join(" AND "))
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

pub async fn create(client: &JiraClient, view: &mut View, args: IssueCreateArgs) -> Result<()> {
    let extra = parse_fields(&args.fields)?;
    let request = build_create_request(
        &args.project,
        &args.issue_type,
        &args.summary,
        args.description.as_deref().unwrap_or_default(),
        extra,
    );

    let created = client.create_issue(&request).await?;
    view.success(&format!("Created {}", created.key))?;
    view.info(&client.browse_url(&created.key))?;
    Ok(())
}

pub async fn update(client: &JiraClient, view: &mut View, args: IssueUpdateArgs) -> Result<()> {
    let mut fields = parse_fields(&args.fields)?;
    if let Some(summary) = args.summary {
        fields.insert("summary".to_string(), Value::String(summary));
    }
    if let Some(description) = args.description {
        fields.insert(
            "description".to_string(),
            json!(AtlassianDoc::from_plain_text(&description)),
        );
    }
    if fields.is_empty() {
        return Err(AppError::usage(
            "nothing to update: pass --summary, --description or --field",
        ));
    }

    client
        .update_issue(&args.key, &build_update_request(fields))
        .await?;
    view.success(&format!("Updated {}", args.key))?;
    Ok(())
}

pub async fn delete(client: &JiraClient, view: &mut View, key: &str, force: bool) -> Result<()> {
    if !force && !confirm(&format!("Delete {key}? This cannot be undone."))? {
        view.info("Cancelled")?;
        return Ok(());
    }
    client.delete_issue(key).await?;
    view.success(&format!("Deleted {key}"))?;
    Ok(())
}

/// Ask a yes/no question on stderr and read the answer from stdin.
fn confirm(question: &str) -> Result<bool> {
    eprint!("{question} [y/N] ");
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub async fn assign(
    client: &JiraClient,
    view: &mut View,
    key: &str,
    account: Option<String>,
    unassign: bool,
) -> Result<()> {
    let account_id = match account.as_deref() {
        _ if unassign => String::new(),
        Some(ME) => client.current_user().await?.account_id,
        Some(id) => id.to_string(),
        None => return Err(AppError::usage("an account ID, 'me' or --unassign is required")),
    };

    client.assign_issue(key, &account_id).await?;
    if account_id.is_empty() {
        view.success(&format!("Unassigned {key}"))?;
    } else {
        view.success(&format!("Assigned {key} to {account_id}"))?;
    }
    Ok(())
}

/// Show the fields that can be edited on an issue.
pub async fn meta(client: &JiraClient, view: &mut View, key: &str) -> Result<()> {
    let meta = client.get_edit_meta(key).await?;
    view.render(&["FIELD", "NAME", "TYPE", "REQUIRED"], meta_rows(&meta), &meta)?;
    Ok(())
}

fn meta_rows(meta: &Value) -> Vec<Vec<String>> {
    let Some(fields) = meta.get("fields").and_then(Value::as_object) else {
        return Vec::new();
    };
    fields
        .iter()
        .map(|(id, field)| {
            let text = |pointer: &str| {
                field
                    .pointer(pointer)
                    .and_then(Value::as_str)
                    .unwrap_or("-")
                    .to_string()
            };
            let required = field
                .get("required")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            vec![
                id.clone(),
                text("/name"),
                text("/schema/type"),
                if required { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect()
}

pub fn open(client: &JiraClient, view: &mut View, key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(AppError::usage("issue key is required"));
    }
    let url = client.browse_url(key);
    open::that(&url)?;
    view.info(&format!("Opened {url}"))?;
    Ok(())
}
