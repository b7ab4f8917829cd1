use std::collections::HashSet;

use tracing::{info, warn};

use coasterpedia_client::WikiError;

use crate::infra::{retry, RetryPolicy};
use crate::traits::WikiSource;

/// Walk a category listing page by page until `max_count` titles are
/// collected or the wiki stops returning a continuation token.
///
/// Titles keep source order; repeats across pages are dropped. A request that
/// still fails after retries fails the whole listing.
pub async fn fetch_entity_list(
    wiki: &dyn WikiSource,
    category: &str,
    max_count: usize,
    page_size: u32,
    policy: &RetryPolicy,
) -> Result<Vec<String>, WikiError> {
    let mut titles: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut continuation: Option<String> = None;
    let page_size = page_size.clamp(1, coasterpedia_client::MAX_PAGE_SIZE);

    while titles.len() < max_count {
        let remaining = (max_count - titles.len()).min(u32::MAX as usize) as u32;
        let limit = page_size.min(remaining);
        let token = continuation.as_deref();

        let page = retry(policy, "wiki.categorymembers", WikiError::is_transient, move || {
            wiki.category_page(category, limit, token)
        })
        .await?;

        for title in page.titles {
            if titles.len() >= max_count {
                break;
            }
            if seen.insert(title.clone()) {
                titles.push(title);
            }
        }

        match page.continuation {
            Some(next) if continuation.as_deref() == Some(next.as_str()) => {
                warn!(token = %next, "Listing returned the same continuation token twice, stopping");
                break;
            }
            Some(next) => {
                info!(token = %next, collected = titles.len(), "Next continuation token");
                continuation = Some(next);
            }
            None => break,
        }
    }

    info!(category, count = titles.len(), "Fetched coaster titles");
    Ok(titles)
}
