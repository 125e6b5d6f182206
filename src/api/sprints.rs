//! Sprints on scrum boards.

use tracing::instrument;

use super::client::{decode, JiraClient};
use super::error::{ApiError, Result};
use super::paginate::{collect_pages, PAGE_SIZE};
use super::query::Query;
use super::search::DEFAULT_SEARCH_LIMIT;
use super::types::{Issue, SearchResult, Sprint, SprintsResponse};

/// Sprint state the current sprint is selected by.
const ACTIVE_STATE: &str = "active";

impl JiraClient {
    /// List a board's sprints. `state` may be a comma-separated list of
    /// `future`, `active` and `closed`; empty means all.
    #[instrument(skip(self))]
    pub async fn list_sprints(
        &self,
        board_id: u64,
        state: &str,
        start_at: u32,
        max_results: u32,
    ) -> Result<SprintsResponse> {
        if board_id == 0 {
            return Err(ApiError::MissingIdentifier("board id"));
        }
        let url = Query::new()
            .text("state", state)
            .number("startAt", start_at)
            .number("maxResults", max_results)
            .apply(&self.agile_url(&format!("board/{}/sprint", board_id)));

        let body = self.get(&url).await?;
        decode(&body, "sprints")
    }

    #[instrument(skip(self))]
    pub async fn get_sprint(&self, sprint_id: u64) -> Result<Sprint> {
        if sprint_id == 0 {
            return Err(ApiError::MissingIdentifier("sprint id"));
        }
        let body = self
            .get(&self.agile_url(&format!("sprint/{}", sprint_id)))
            .await?;
        decode(&body, "sprint")
    }

    /// Every sprint on a board, following pages until the last one.
    pub async fn list_all_sprints(&self, board_id: u64, state: &str) -> Result<Vec<Sprint>> {
        let mut sprints = Vec::new();
        loop {
            let page = self
                .list_sprints(board_id, state, sprints.len() as u32, PAGE_SIZE)
                .await?;
            let fetched = page.values.len();
            sprints.extend(page.values);
            if page.is_last || fetched == 0 {
                break;
            }
        }
        Ok(sprints)
    }

    /// One page of the issues in a sprint.
    #[instrument(skip(self))]
    pub async fn sprint_issues(
        &self,
        sprint_id: u64,
        start_at: u32,
        max_results: u32,
    ) -> Result<SearchResult> {
        if sprint_id == 0 {
            return Err(ApiError::MissingIdentifier("sprint id"));
        }
        let url = Query::new()
            .number("startAt", start_at)
            .number("maxResults", max_results)
            .apply(&self.agile_url(&format!("sprint/{}/issue", sprint_id)));

        let body = self.get(&url).await?;
        decode(&body, "sprint issues")
    }

    /// Every issue in a sprint, up to `limit` (0 means 1000).
    pub async fn sprint_issues_all(&self, sprint_id: u64, limit: usize) -> Result<Vec<Issue>> {
        let limit = if limit == 0 { DEFAULT_SEARCH_LIMIT } else { limit };
        collect_pages(limit, |start_at| async move {
            self.sprint_issues(sprint_id, start_at, PAGE_SIZE).await
        })
        .await
    }

    /// The board's active sprint.
    ///
    /// # Errors
    ///
    /// [`ApiError::NoActiveSprint`] when the board has none.
    #[instrument(skip(self))]
    pub async fn current_sprint(&self, board_id: u64) -> Result<Sprint> {
        let response = self.list_sprints(board_id, ACTIVE_STATE, 0, 1).await?;
        first_active(response, board_id)
    }
}

fn first_active(response: SprintsResponse, board_id: u64) -> Result<Sprint> {
    response
        .values
        .into_iter()
        .next()
        .ok_or(ApiError::NoActiveSprint(board_id))
}
