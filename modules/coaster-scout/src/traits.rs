// Trait seams for the two external APIs.
//
// WikiSource wraps the Coasterpedia MediaWiki endpoints, VideoPlatform the
// YouTube Data API. Both return the clients' own error types so callers can
// tell quota exhaustion apart from transient failures. The pipeline only ever
// holds `&dyn` references, which lets tests swap in the mocks from `testing`.

use async_trait::async_trait;

use coasterpedia_client::{CategoryPage, WikiClient};
use youtube_client::{SearchItem, VideoItem, YouTubeClient};

#[async_trait]
pub trait WikiSource: Send + Sync {
    /// One page of category members, resuming from `continuation` if given.
    async fn category_page(
        &self,
        category: &str,
        limit: u32,
        continuation: Option<&str>,
    ) -> coasterpedia_client::Result<CategoryPage>;

    /// Raw wikitext for a page, `None` when the page does not exist.
    async fn page_wikitext(&self, title: &str) -> coasterpedia_client::Result<Option<String>>;
}

#[async_trait]
impl WikiSource for WikiClient {
    async fn category_page(
        &self,
        category: &str,
        limit: u32,
        continuation: Option<&str>,
    ) -> coasterpedia_client::Result<CategoryPage> {
        self.category_members(category, limit, continuation).await
    }

    async fn page_wikitext(&self, title: &str) -> coasterpedia_client::Result<Option<String>> {
        WikiClient::page_wikitext(self, title).await
    }
}

#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Free-text video search.
    async fn search(&self, query: &str, max_results: u32) -> youtube_client::Result<Vec<SearchItem>>;

    /// Statistics lookup for at most 50 ids.
    async fn videos(&self, ids: &[String]) -> youtube_client::Result<Vec<VideoItem>>;
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn search(&self, query: &str, max_results: u32) -> youtube_client::Result<Vec<SearchItem>> {
        YouTubeClient::search(self, query, max_results).await
    }

    async fn videos(&self, ids: &[String]) -> youtube_client::Result<Vec<VideoItem>> {
        YouTubeClient::videos(self, ids).await
    }
}
