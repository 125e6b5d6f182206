use crate::api::types::Board;
use crate::api::JiraClient;
use crate::error::Result;
use crate::output::{or_dash, View};

fn row(board: &Board) -> Vec<String> {
    vec![
        board.id.to_string(),
        board.name.clone(),
        or_dash(&board.board_type),
        or_dash(board.project_key()),
    ]
}

pub async fn list(
    client: &JiraClient,
    view: &mut View,
    project: Option<&str>,
    max: u32,
) -> Result<()> {
    let response = client
        .list_boards(project.unwrap_or_default(), 0, max)
        .await?;
    let rows = response.values.iter().map(row).collect();
    view.render(&["ID", "NAME", "TYPE", "PROJECT"], rows, &response.values)?;

    if !response.is_last && response.total as usize > response.values.len() {
        view.info(&format!(
            "Showing {} of {} boards. Use --max to see more.",
            response.values.len(),
            response.total
        ))?;
    }
    Ok(())
}

pub async fn get(client: &JiraClient, view: &mut View, id: u64) -> Result<()> {
    let board = client.get_board(id).await?;
    let location = board.location.as_ref();
    let pairs = [
        ("ID", board.id.to_string()),
        ("Name", board.name.clone()),
        ("Type", or_dash(&board.board_type)),
        ("Project", or_dash(board.project_key())),
        (
            "Project name",
            or_dash(
                location
                    .and_then(|l| l.project_name.as_deref())
                    .unwrap_or_default(),
            ),
        ),
    ];
    view.render_record(&pairs, &board)?;
    Ok(())
}
