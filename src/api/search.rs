//! JQL search.

use tracing::{debug, instrument};

use super::client::{decode, JiraClient};
use super::error::Result;
use super::paginate::{collect_pages, PAGE_SIZE};
use super::query::Query;
use super::types::{Issue, SearchResult};

/// Limit used by [`JiraClient::search_all`] when the caller passes 0.
pub const DEFAULT_SEARCH_LIMIT: usize = 1000;

/// Page size used by [`JiraClient::search`] when the caller passes 0.
const DEFAULT_PAGE_RESULTS: u32 = 50;

/// Fields requested when the caller does not choose any.
pub const DEFAULT_FIELDS: &[&str] = &[
    "summary",
    "status",
    "assignee",
    "issuetype",
    "priority",
    "project",
    "created",
    "updated",
];

/// Options for a single search page.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub jql: String,
    pub start_at: u32,
    /// 0 means the default of 50.
    pub max_results: u32,
    /// Empty means [`DEFAULT_FIELDS`].
    pub fields: Vec<String>,
}

impl SearchOptions {
    fn fields_param(&self) -> String {
        if self.fields.is_empty() {
            DEFAULT_FIELDS.join(",")
        } else {
            self.fields.join(",")
        }
    }
}

impl JiraClient {
    /// Fetch one page of JQL results.
    #[instrument(skip(self, options), fields(jql = %options.jql, start_at = options.start_at))]
    pub async fn search(&self, options: &SearchOptions) -> Result<SearchResult> {
        let max_results = if options.max_results > 0 {
            options.max_results
        } else {
            DEFAULT_PAGE_RESULTS
        };

        let url = Query::new()
            .text("jql", &options.jql)
            .number("startAt", options.start_at)
            .number("maxResults", max_results)
            .text("fields", &options.fields_param())
            .apply(&self.api_url("search"));

        let body = self.get(&url).await?;
        let result: SearchResult = decode(&body, "search results")?;
        debug!("Found {} issues (total: {})", result.issues.len(), result.total);
        Ok(result)
    }

    /// Fetch every issue matching `jql`, up to `max_results` (0 means 1000).
    #[instrument(skip(self, fields))]
    pub async fn search_all(
        &self,
        jql: &str,
        max_results: usize,
        fields: &[String],
    ) -> Result<Vec<Issue>> {
        let limit = if max_results == 0 {
            DEFAULT_SEARCH_LIMIT
        } else {
            max_results
        };

        collect_pages(limit, |start_at| {
            let options = SearchOptions {
                jql: jql.to_string(),
                start_at,
                max_results: PAGE_SIZE,
                fields: fields.to_vec(),
            };
            async move { self.search(&options).await }
        })
        .await
    }
}
