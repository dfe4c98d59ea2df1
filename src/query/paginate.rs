use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::github::GitHubError;

/// Items requested per page; GitHub's maximum for these endpoints.
pub const PER_PAGE: u8 = 100;

/// Hard ceiling on pages fetched by one accumulation (10,000 items).
pub const MAX_PAGES: u32 = 100;

/// A paged remote collection that can be fetched one page at a time.
/// Pages are numbered from 1.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page: u32, per_page: u8) -> Result<Vec<Value>, GitHubError>;
}

/// Walk `source` from page 1 until it is exhausted, formatting every item.
///
/// Stops on an empty page, on a short page, or after `MAX_PAGES` pages.
/// Any fetch or format failure aborts the walk and discards what was
/// collected so far.
pub async fn collect_pages<S, T, F>(source: &S, format: F) -> Result<Vec<T>, GitHubError>
where
    S: PageSource + ?Sized,
    F: Fn(&Value) -> Result<T, GitHubError>,
{
    let mut collected = Vec::new();

    for page in 1..=MAX_PAGES {
        let raw = source.fetch_page(page, PER_PAGE).await?;
        debug!(page, items = raw.len(), "fetched page");

        if raw.is_empty() {
            debug!(page, "empty page, stopping");
            break;
        }

        for item in &raw {
            collected.push(format(item)?);
        }

        if raw.len() < usize::from(PER_PAGE) {
            debug!(page, "short page, stopping");
            break;
        }

        if page == MAX_PAGES {
            debug!(page, total = collected.len(), "page limit reached, stopping");
        }
    }

    Ok(collected)
}
