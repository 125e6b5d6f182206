//! Issue comments.

use tracing::instrument;

use super::adf::AtlassianDoc;
use super::client::{decode, JiraClient};
use super::error::{ApiError, Result};
use super::paginate::{collect_pages, PAGE_SIZE};
use super::query::{segment, Query};
use super::types::{AddCommentRequest, Comment, CommentsResponse};

impl JiraClient {
    fn comments_url(&self, key: &str) -> Result<String> {
        if key.is_empty() {
            return Err(ApiError::MissingIdentifier("issue key"));
        }
        Ok(self.api_url(&format!("issue/{}/comment", segment(key))))
    }

    /// List every comment on an issue, oldest first.
    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn list_comments(&self, key: &str) -> Result<Vec<Comment>> {
        let url = self.comments_url(key)?;
        collect_pages(usize::MAX, |start_at| {
            let page_url = Query::new()
                .number("startAt", start_at)
                .number("maxResults", PAGE_SIZE)
                .apply(&url);
            async move {
                let body = self.get(&page_url).await?;
                decode::<CommentsResponse>(&body, "comments")
            }
        })
        .await
    }

    /// Add a plain-text comment.
    #[instrument(skip(self, text), fields(issue_key = %key))]
    pub async fn add_comment(&self, key: &str, text: &str) -> Result<Comment> {
        if text.trim().is_empty() {
            return Err(ApiError::MissingIdentifier("comment text"));
        }
        let request = AddCommentRequest {
            body: AtlassianDoc::from_plain_text(text),
        };
        let body = self.post(&self.comments_url(key)?, &request).await?;
        decode(&body, "comment")
    }

    #[instrument(skip(self), fields(issue_key = %key))]
    pub async fn delete_comment(&self, key: &str, comment_id: &str) -> Result<()> {
        if comment_id.is_empty() {
            return Err(ApiError::MissingIdentifier("comment id"));
        }
        let url = format!("{}/{}", self.comments_url(key)?, segment(comment_id));
        self.delete(&url).await?;
        Ok(())
    }
}
