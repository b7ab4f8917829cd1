pub mod error;
pub mod types;

pub use error::{Result, YouTubeError, QUOTA_REASONS};
pub use types::{
    SearchItem, SearchItemId, SearchResponse, Snippet, Statistics, VideoItem, VideoListResponse,
};

use std::time::Duration;

use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// `videos.list` accepts at most this many ids per call.
pub const MAX_IDS_PER_CALL: usize = 50;

pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, timeout)
    }

    pub fn with_base_url(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Search videos, most-viewed first.
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchItem>> {
        let max_results = max_results.to_string();
        let params = [
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("maxResults", max_results.as_str()),
            ("safeSearch", "none"),
            ("order", "viewCount"),
        ];

        let resp: SearchResponse = self.get_json("search", &params).await?;
        tracing::debug!(query, count = resp.items.len(), "YouTube search complete");
        Ok(resp.items)
    }

    /// Look up statistics and snippets for up to [`MAX_IDS_PER_CALL`] videos.
    pub async fn videos(&self, ids: &[String]) -> Result<Vec<VideoItem>> {
        if ids.len() > MAX_IDS_PER_CALL {
            return Err(YouTubeError::Api {
                status: 400,
                reason: "tooManyIds".to_string(),
                message: format!("{} ids requested, limit is {MAX_IDS_PER_CALL}", ids.len()),
            });
        }

        let joined = ids.join(",");
        let params = [("part", "statistics,snippet"), ("id", joined.as_str())];

        let resp: VideoListResponse = self.get_json("videos", &params).await?;
        Ok(resp.items)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let resp = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(YouTubeError::from_response(status.as_u16(), &body));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
