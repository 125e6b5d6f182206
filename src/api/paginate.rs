//! Aggregation over offset-paged endpoints.

use std::future::Future;

use tracing::debug;

use super::error::Result;
use super::types::{Comment, CommentsResponse, SearchResult};

/// Number of items requested per page.
pub const PAGE_SIZE: u32 = 100;

/// One page of an offset-paged listing.
pub trait Page {
    type Item;

    /// Server-reported total across all pages.
    fn total(&self) -> usize;

    fn into_items(self) -> Vec<Self::Item>;
}

impl Page for SearchResult {
    type Item = super::types::Issue;

    fn total(&self) -> usize {
        self.total as usize
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.issues
    }
}

impl Page for CommentsResponse {
    type Item = Comment;

    fn total(&self) -> usize {
        self.total as usize
    }

    fn into_items(self) -> Vec<Self::Item> {
        self.comments
    }
}

/// Fetch pages until `limit` items or the server total is reached.
///
/// `fetch_page` receives the `startAt` offset. The offset advances by the
/// number of items actually returned, and an empty page ends the loop even
/// if the total says otherwise. Any error aborts the whole collection.
pub async fn collect_pages<P, F, Fut>(limit: usize, mut fetch_page: F) -> Result<Vec<P::Item>>
where
    P: Page,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<P>>,
{
    let mut items = Vec::new();
    let mut start_at: u32 = 0;

    loop {
        let page = fetch_page(start_at).await?;
        let total = page.total();
        let batch = page.into_items();
        let fetched = batch.len();
        items.extend(batch);

        debug!(start_at, fetched, total, collected = items.len(), "fetched page");

        if fetched == 0 || items.len() >= total || items.len() >= limit {
            break;
        }
        start_at += fetched as u32;
    }

    items.truncate(limit);
    Ok(items)
}
