use super::render_issues;
use crate::api::types::Sprint;
use crate::api::JiraClient;
use crate::error::Result;
use crate::output::{or_dash, short_time, View};

const HEADERS: &[&str] = &["ID", "NAME", "STATE", "START", "END"];

fn date(value: Option<&String>) -> String {
    or_dash(&short_time(value.map(String::as_str).unwrap_or_default()))
}

fn row(sprint: &Sprint) -> Vec<String> {
    vec![
        sprint.id.to_string(),
        sprint.name.clone(),
        sprint.state.clone(),
        date(sprint.start_date.as_ref()),
        date(sprint.end_date.as_ref()),
    ]
}

fn render_sprint(view: &mut View, sprint: &Sprint) -> Result<()> {
    let pairs = [
        ("ID", sprint.id.to_string()),
        ("Name", sprint.name.clone()),
        ("State", sprint.state.clone()),
        ("Start", date(sprint.start_date.as_ref())),
        ("End", date(sprint.end_date.as_ref())),
        ("Completed", date(sprint.complete_date.as_ref())),
        (
            "Board",
            sprint
                .origin_board_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("Goal", or_dash(sprint.goal.as_deref().unwrap_or_default())),
    ];
    view.render_record(&pairs, sprint)?;
    Ok(())
}

pub async fn list(
    client: &JiraClient,
    view: &mut View,
    board_id: u64,
    state: Option<&str>,
) -> Result<()> {
    let sprints = client
        .list_all_sprints(board_id, state.unwrap_or_default())
        .await?;
    let rows = sprints.iter().map(row).collect();
    view.render(HEADERS, rows, &sprints)?;
    Ok(())
}

pub async fn get(client: &JiraClient, view: &mut View, id: u64) -> Result<()> {
    let sprint = client.get_sprint(id).await?;
    render_sprint(view, &sprint)
}

pub async fn issues(client: &JiraClient, view: &mut View, id: u64, max: usize) -> Result<()> {
    let issues = client.sprint_issues_all(id, max).await?;
    render_issues(view, &issues)
}

/// Show the board's active sprint.
pub async fn current(client: &JiraClient, view: &mut View, board_id: u64) -> Result<()> {
    let sprint = client.current_sprint(board_id).await?;
    render_sprint(view, &sprint)
}
