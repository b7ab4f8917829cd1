// Test mocks for the two API seams.
//
// - MockWiki (WikiSource): continuation-token keyed listing pages plus a
//   title -> wikitext map
// - MockVideoPlatform (VideoPlatform): query -> search behaviour plus an
//   id -> stats map
//
// Both record every call so tests can assert on request counts and shapes.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use coasterpedia_client::{CategoryPage, WikiError};
use youtube_client::{SearchItem, SearchItemId, Snippet, Statistics, VideoItem, YouTubeError};

use crate::traits::{VideoPlatform, WikiSource};

// ---------------------------------------------------------------------------
// MockWiki
// ---------------------------------------------------------------------------

/// Listing pages keyed by the continuation token that requests them (`None`
/// for the first page). Unregistered tokens return an API error.
pub struct MockWiki {
    pages: HashMap<Option<String>, CategoryPage>,
    wikitext: HashMap<String, String>,
    failing_titles: HashSet<String>,
    /// Number of transient failures to return before each listing request succeeds.
    flaky_listing: Mutex<u32>,
    pub listing_calls: Mutex<Vec<(u32, Option<String>)>>,
    pub page_calls: Mutex<Vec<String>>,
}

impl MockWiki {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            wikitext: HashMap::new(),
            failing_titles: HashSet::new(),
            flaky_listing: Mutex::new(0),
            listing_calls: Mutex::new(Vec::new()),
            page_calls: Mutex::new(Vec::new()),
        }
    }

    /// Register a listing page. `token` is the cmcontinue that fetches it,
    /// `next` the token it hands back.
    pub fn on_listing(mut self, token: Option<&str>, titles: &[&str], next: Option<&str>) -> Self {
        self.pages.insert(
            token.map(String::from),
            CategoryPage {
                titles: titles.iter().map(|t| t.to_string()).collect(),
                continuation: next.map(String::from),
            },
        );
        self
    }

    pub fn on_page(mut self, title: &str, wikitext: &str) -> Self {
        self.wikitext.insert(title.to_string(), wikitext.to_string());
        self
    }

    /// Page fetches for `title` fail with a non-transient API error.
    pub fn failing_page(mut self, title: &str) -> Self {
        self.failing_titles.insert(title.to_string());
        self
    }

    pub fn flaky_listing(self, failures: u32) -> Self {
        *self.flaky_listing.lock().unwrap() = failures;
        self
    }

    pub fn listing_call_count(&self) -> usize {
        self.listing_calls.lock().unwrap().len()
    }
}

impl Default for MockWiki {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WikiSource for MockWiki {
    async fn category_page(
        &self,
        _category: &str,
        limit: u32,
        continuation: Option<&str>,
    ) -> coasterpedia_client::Result<CategoryPage> {
        self.listing_calls
            .lock()
            .unwrap()
            .push((limit, continuation.map(String::from)));

        {
            let mut flaky = self.flaky_listing.lock().unwrap();
            if *flaky > 0 {
                *flaky -= 1;
                return Err(WikiError::Network("connection reset".to_string()));
            }
        }

        // Pages are returned whole; `limit` is only recorded.
        self.pages
            .get(&continuation.map(String::from))
            .cloned()
            .ok_or_else(|| WikiError::Api {
                status: 400,
                message: format!("unknown continuation {continuation:?}"),
            })
    }

    async fn page_wikitext(&self, title: &str) -> coasterpedia_client::Result<Option<String>> {
        self.page_calls.lock().unwrap().push(title.to_string());
        if self.failing_titles.contains(title) {
            return Err(WikiError::Api {
                status: 400,
                message: format!("bad title {title}"),
            });
        }
        Ok(self.wikitext.get(title).cloned())
    }
}

// ---------------------------------------------------------------------------
// MockVideoPlatform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum SearchBehavior {
    Items(Vec<SearchItem>),
    Quota,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsBehavior {
    Normal,
    /// Every stats call is quota-exhausted.
    Quota,
    /// Calls number `n` (zero-based) onwards are quota-exhausted.
    QuotaFromCall(usize),
    /// Every stats call fails with a non-quota error.
    Fail,
}

/// Unregistered queries return no results.
pub struct MockVideoPlatform {
    searches: HashMap<String, SearchBehavior>,
    stats: HashMap<String, VideoItem>,
    stats_behavior: StatsBehavior,
    pub search_calls: Mutex<Vec<String>>,
    pub stats_calls: Mutex<Vec<Vec<String>>>,
}

impl MockVideoPlatform {
    pub fn new() -> Self {
        Self {
            searches: HashMap::new(),
            stats: HashMap::new(),
            stats_behavior: StatsBehavior::Normal,
            search_calls: Mutex::new(Vec::new()),
            stats_calls: Mutex::new(Vec::new()),
        }
    }

    /// Register search hits for `query`: `(video_id, title)` pairs in API order.
    pub fn on_search(mut self, query: &str, hits: &[(&str, &str)]) -> Self {
        let items = hits.iter().map(|(id, title)| search_item(id, title)).collect();
        self.searches.insert(query.to_string(), SearchBehavior::Items(items));
        self
    }

    pub fn on_search_items(mut self, query: &str, items: Vec<SearchItem>) -> Self {
        self.searches.insert(query.to_string(), SearchBehavior::Items(items));
        self
    }

    pub fn quota_on_search(mut self, query: &str) -> Self {
        self.searches.insert(query.to_string(), SearchBehavior::Quota);
        self
    }

    pub fn failing_search(mut self, query: &str) -> Self {
        self.searches.insert(query.to_string(), SearchBehavior::Fail);
        self
    }

    /// Register raw stat strings for a video id.
    pub fn on_stats(mut self, id: &str, views: Option<&str>, likes: Option<&str>) -> Self {
        self.stats.insert(id.to_string(), video_item(id, views, likes));
        self
    }

    pub fn stats_behavior(mut self, behavior: StatsBehavior) -> Self {
        self.stats_behavior = behavior;
        self
    }

    pub fn search_call_count(&self) -> usize {
        self.search_calls.lock().unwrap().len()
    }

    pub fn stats_batch_sizes(&self) -> Vec<usize> {
        self.stats_calls.lock().unwrap().iter().map(Vec::len).collect()
    }
}

impl Default for MockVideoPlatform {
    fn default() -> Self {
        Self::new()
    }
}

fn quota_error() -> YouTubeError {
    YouTubeError::QuotaExceeded {
        reason: "quotaExceeded".to_string(),
    }
}

fn api_error() -> YouTubeError {
    YouTubeError::Api {
        status: 400,
        reason: "badRequest".to_string(),
        message: "mock failure".to_string(),
    }
}

#[async_trait]
impl VideoPlatform for MockVideoPlatform {
    async fn search(&self, query: &str, _max_results: u32) -> youtube_client::Result<Vec<SearchItem>> {
        self.search_calls.lock().unwrap().push(query.to_string());
        match self.searches.get(query) {
            Some(SearchBehavior::Items(items)) => Ok(items.clone()),
            Some(SearchBehavior::Quota) => Err(quota_error()),
            Some(SearchBehavior::Fail) => Err(api_error()),
            None => Ok(Vec::new()),
        }
    }

    async fn videos(&self, ids: &[String]) -> youtube_client::Result<Vec<VideoItem>> {
        let call_index = {
            let mut calls = self.stats_calls.lock().unwrap();
            calls.push(ids.to_vec());
            calls.len() - 1
        };

        match self.stats_behavior {
            StatsBehavior::Quota => return Err(quota_error()),
            StatsBehavior::QuotaFromCall(n) if call_index >= n => return Err(quota_error()),
            StatsBehavior::Fail => return Err(api_error()),
            _ => {}
        }

        Ok(ids.iter().filter_map(|id| self.stats.get(id).cloned()).collect())
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn search_item(video_id: &str, title: &str) -> SearchItem {
    SearchItem {
        id: SearchItemId {
            video_id: Some(video_id.to_string()),
        },
        snippet: Snippet {
            title: title.to_string(),
            channel_title: format!("{title} channel"),
            channel_id: String::new(),
            published_at: "2020-06-01T12:00:00Z".to_string(),
        },
    }
}

pub fn video_item(video_id: &str, views: Option<&str>, likes: Option<&str>) -> VideoItem {
    VideoItem {
        id: video_id.to_string(),
        statistics: Statistics {
            view_count: views.map(String::from),
            like_count: likes.map(String::from),
            comment_count: None,
        },
        snippet: Snippet {
            title: String::new(),
            channel_title: "Stats Channel".to_string(),
            channel_id: format!("UC-{video_id}"),
            published_at: String::new(),
        },
    }
}
