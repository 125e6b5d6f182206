//! Agile boards.

use tracing::instrument;

use super::client::{decode, JiraClient};
use super::error::{ApiError, Result};
use super::query::Query;
use super::types::{Board, BoardsResponse};

impl JiraClient {
    /// List boards, optionally limited to one project.
    #[instrument(skip(self))]
    pub async fn list_boards(
        &self,
        project_key_or_id: &str,
        start_at: u32,
        max_results: u32,
    ) -> Result<BoardsResponse> {
        let url = Query::new()
            .text("projectKeyOrId", project_key_or_id)
            .number("startAt", start_at)
            .number("maxResults", max_results)
            .apply(&self.agile_url("board"));

        let body = self.get(&url).await?;
        decode(&body, "boards")
    }

    #[instrument(skip(self))]
    pub async fn get_board(&self, board_id: u64) -> Result<Board> {
        if board_id == 0 {
            return Err(ApiError::MissingIdentifier("board id"));
        }
        let body = self.get(&self.agile_url(&format!("board/{}", board_id))).await?;
        decode(&body, "board")
    }
}
