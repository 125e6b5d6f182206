//! Command handlers.
//!
//! Each submodule turns parsed arguments into API calls and renders the
//! result through [`View`]. Errors are returned to `main` untouched.

pub mod boards;
pub mod comments;
pub mod config;
pub mod issues;
pub mod search;
pub mod sprints;
pub mod transitions;

use serde_json::{Map, Value};

use crate::api::types::Issue;
use crate::error::{AppError, Result};
use crate::output::{or_dash, truncate, View};

/// Column headers for issue listings.
pub(crate) const ISSUE_HEADERS: &[&str] = &["KEY", "TYPE", "STATUS", "ASSIGNEE", "SUMMARY"];

const SUMMARY_WIDTH: usize = 60;

pub(crate) fn issue_row(issue: &Issue) -> Vec<String> {
    vec![
        issue.key.clone(),
        or_dash(issue.issue_type()),
        or_dash(issue.status()),
        or_dash(issue.assignee_name()),
        truncate(issue.summary(), SUMMARY_WIDTH),
    ]
}

/// Render a list of issues, or a note when there are none.
pub(crate) fn render_issues(view: &mut View, issues: &[Issue]) -> Result<()> {
    let rows = issues.iter().map(issue_row).collect();
    view.render(ISSUE_HEADERS, rows, issues)?;
    Ok(())
}

/// Parse repeated `key=value` flags into an issue field map.
///
/// Values that are valid JSON are sent as JSON; anything else becomes a
/// string. The first `=` splits key from value.
pub(crate) fn parse_fields(pairs: &[String]) -> Result<Map<String, Value>> {
    let mut fields = Map::new();
    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| AppError::usage(format!("invalid field '{pair}': expected key=value")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::usage(format!("invalid field '{pair}': empty key")));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        fields.insert(key.to_string(), value);
    }
    Ok(fields)
}
