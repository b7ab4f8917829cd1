use std::collections::HashMap;
use std::time::Duration;

use tracing::{info, warn};

use coaster_common::{VideoCandidate, VideoStats};
use youtube_client::{VideoItem, YouTubeError, MAX_IDS_PER_CALL};

use crate::infra::{retry, RetryPolicy};
use crate::traits::VideoPlatform;

/// Search hits for `query` in API order. Hits without a video id (channels,
/// playlists) are dropped.
pub async fn search_candidates(
    platform: &dyn VideoPlatform,
    query: &str,
    max_results: u32,
    policy: &RetryPolicy,
) -> youtube_client::Result<Vec<VideoCandidate>> {
    let items = retry(policy, "youtube.search", YouTubeError::is_transient, move || {
        platform.search(query, max_results)
    })
    .await?;

    Ok(items
        .into_iter()
        .filter_map(|item| {
            let video_id = item.id.video_id.filter(|id| !id.is_empty())?;
            Some(VideoCandidate {
                video_id,
                video_title: item.snippet.title,
                channel_title: item.snippet.channel_title,
                published_at: item.snippet.published_at,
            })
        })
        .collect())
}

/// Result of a batched statistics lookup.
#[derive(Debug, Default)]
pub struct StatsFetch {
    pub stats: HashMap<String, VideoStats>,
    /// Set when a batch hit quota exhaustion; `stats` holds the earlier batches.
    pub quota_exhausted: bool,
    pub failed_batches: u32,
}

/// Statistics for `video_ids`, at most [`MAX_IDS_PER_CALL`] per request.
///
/// Quota exhaustion stops further batches and returns what was gathered.
/// Any other batch failure is logged and skipped. `delay` follows every batch
/// that was attempted.
pub async fn fetch_statistics(
    platform: &dyn VideoPlatform,
    video_ids: &[String],
    delay: Duration,
    policy: &RetryPolicy,
) -> StatsFetch {
    let mut fetch = StatsFetch::default();

    for batch in video_ids.chunks(MAX_IDS_PER_CALL) {
        let result = retry(policy, "youtube.videos", YouTubeError::is_transient, move || {
            platform.videos(batch)
        })
        .await;

        match result {
            Ok(items) => {
                for item in items {
                    let (id, stats) = stats_from_item(item);
                    fetch.stats.insert(id, stats);
                }
            }
            Err(e) if e.is_quota_exceeded() => {
                warn!(error = %e, fetched = fetch.stats.len(), "Quota exceeded while fetching video stats, returning partial stats");
                fetch.quota_exhausted = true;
                break;
            }
            Err(e) => {
                warn!(error = %e, batch_size = batch.len(), "Stats batch failed");
                fetch.failed_batches += 1;
            }
        }

        tokio::time::sleep(delay).await;
    }

    info!(
        requested = video_ids.len(),
        fetched = fetch.stats.len(),
        "Video stats fetched"
    );
    fetch
}

fn stats_from_item(item: VideoItem) -> (String, VideoStats) {
    let stats = VideoStats {
        view_count: parse_count(item.statistics.view_count.as_deref()),
        like_count: parse_count(item.statistics.like_count.as_deref()),
        comment_count: parse_count(item.statistics.comment_count.as_deref()),
        channel_id: item.snippet.channel_id,
        channel_title: item.snippet.channel_title,
    };
    (item.id, stats)
}

/// Only plain non-negative decimal strings count; anything else is absent.
pub fn parse_count(raw: Option<&str>) -> Option<u64> {
    let raw = raw?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
