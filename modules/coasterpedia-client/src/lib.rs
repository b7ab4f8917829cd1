pub mod error;
pub mod types;

pub use error::{Result, WikiError};
pub use types::CategoryPage;

use std::time::Duration;

use serde::de::DeserializeOwned;
use types::{CategoryMembersResponse, ParseResponse};

pub const DEFAULT_BASE_URL: &str = "https://coasterpedia.net/w/api.php";

/// Hard ceiling the MediaWiki API places on `cmlimit` for anonymous callers.
pub const MAX_PAGE_SIZE: u32 = 50;

pub struct WikiClient {
    client: reqwest::Client,
    base_url: String,
}

impl WikiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("coaster-scout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch one page of category members. `limit` is clamped to [`MAX_PAGE_SIZE`].
    pub async fn category_members(
        &self,
        category: &str,
        limit: u32,
        continuation: Option<&str>,
    ) -> Result<CategoryPage> {
        let limit = limit.clamp(1, MAX_PAGE_SIZE).to_string();
        let mut params = vec![
            ("action", "query"),
            ("list", "categorymembers"),
            ("cmtitle", category),
            ("cmlimit", limit.as_str()),
            ("format", "json"),
        ];
        if let Some(token) = continuation {
            params.push(("cmcontinue", token));
        }
        tracing::debug!(category, cmlimit = %limit, continuation, "Requesting category members");

        let resp: CategoryMembersResponse = self.get_json(&params).await?;
        Ok(resp.into())
    }

    /// Fetch the raw wikitext of a page. `Ok(None)` when the page does not exist.
    pub async fn page_wikitext(&self, title: &str) -> Result<Option<String>> {
        let params = [
            ("action", "parse"),
            ("page", title),
            ("prop", "wikitext"),
            ("format", "json"),
        ];

        let resp: ParseResponse = self.get_json(&params).await?;
        Ok(resp
            .parse
            .and_then(|p| p.wikitext)
            .and_then(|w| w.content))
    }

    async fn get_json<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T> {
        let resp = self
            .client
            .get(&self.base_url)
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(WikiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
