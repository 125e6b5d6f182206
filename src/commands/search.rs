use super::render_issues;
use crate::api::JiraClient;
use crate::cli::SearchArgs;
use crate::error::{AppError, Result};
use crate::output::View;

/// Run a JQL query, following pages until `--max` issues are collected.
pub async fn run(client: &JiraClient, view: &mut View, args: SearchArgs) -> Result<()> {
    if args.jql.trim().is_empty() {
        return Err(AppError::usage("JQL query is required"));
    }
    let fields: Vec<String> = args
        .fields
        .iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();

    let issues = client.search_all(&args.jql, args.max, &fields).await?;
    render_issues(view, &issues)
}
