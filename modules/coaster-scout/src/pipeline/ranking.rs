// Resumable video stage.
//
// Per coaster: search -> stats -> rank -> append, then mark processed. The
// video file is appended after every coaster, so an interrupted or
// quota-stopped run leaves a valid file and the next run picks up where this
// one ended. Coasters that fail to search are not marked and get retried.

use std::collections::{BTreeSet, HashSet};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

use coaster_common::{CoasterRecord, Config, VideoCandidate, VideoRow, VideoStats};

use crate::infra::RetryPolicy;
use crate::pipeline::query::{build_query, clean_wiki_text};
use crate::pipeline::stats::VideoRunStats;
use crate::pipeline::videos::{fetch_statistics, search_candidates};
use crate::store::{append_video_rows, load_processed, read_coaster_records};
use crate::traits::VideoPlatform;

/// What happened to one coaster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityOutcome {
    /// Already in the video file.
    Skipped,
    /// Search returned nothing; marked processed without rows.
    NoCandidates,
    /// Search failed for a reason other than quota; left for the next run.
    SearchFailed,
    /// Ranked rows were appended.
    Appended(usize),
    /// Quota ran out; the whole run stops.
    QuotaExhausted,
}

pub struct VideoRanker<'a> {
    platform: &'a dyn VideoPlatform,
    config: &'a Config,
    retry: RetryPolicy,
}

impl<'a> VideoRanker<'a> {
    pub fn new(platform: &'a dyn VideoPlatform, config: &'a Config) -> Self {
        Self {
            platform,
            config,
            retry: RetryPolicy::from_config(config),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Read the coaster CSV and run every coaster in it (up to the configured max).
    pub async fn run(&self) -> Result<VideoRunStats> {
        let records = read_coaster_records(&self.config.coasters_csv, self.config.video_max_coasters)
            .context("Failed to read coaster CSV")?;
        let fetched_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false);
        self.run_records(&records, &fetched_at).await
    }

    /// Drive the loop over `records`. `fetched_at` is stamped on every row.
    pub async fn run_records(
        &self,
        records: &[CoasterRecord],
        fetched_at: &str,
    ) -> Result<VideoRunStats> {
        let mut processed = load_processed(&self.config.videos_csv);
        let mut stats = VideoRunStats::default();
        let total = records.len();

        for (i, record) in records.iter().enumerate() {
            stats.coasters_seen += 1;
            let outcome = self
                .process_coaster(record, fetched_at, &mut processed, i + 1, total)
                .await?;

            match outcome {
                EntityOutcome::Skipped => stats.coasters_skipped += 1,
                EntityOutcome::NoCandidates => stats.coasters_without_candidates += 1,
                EntityOutcome::SearchFailed => stats.coasters_failed += 1,
                EntityOutcome::Appended(n) => {
                    stats.coasters_added += 1;
                    stats.rows_appended += n as u32;
                }
                EntityOutcome::QuotaExhausted => {
                    stats.stopped_on_quota = true;
                    break;
                }
            }
        }

        info!(
            added = stats.coasters_added,
            output = %self.config.videos_csv.display(),
            "Video run finished"
        );
        Ok(stats)
    }

    async fn process_coaster(
        &self,
        record: &CoasterRecord,
        fetched_at: &str,
        processed: &mut HashSet<String>,
        index: usize,
        total: usize,
    ) -> Result<EntityOutcome> {
        let title = clean_wiki_text(&record.title);
        if processed.contains(&title) {
            info!(index, total, title = title.as_str(), "Skipping already processed");
            return Ok(EntityOutcome::Skipped);
        }

        let query = build_query(&record.title, &record.park, &record.location, &record.country);
        info!(index, total, query = query.as_str(), "Searching");

        let candidates = match search_candidates(
            self.platform,
            &query,
            self.config.candidates_per_coaster,
            &self.retry,
        )
        .await
        {
            Ok(candidates) => candidates,
            Err(e) if e.is_quota_exceeded() => {
                warn!(error = %e, "Quota exceeded during search, stopping (progress already saved)");
                return Ok(EntityOutcome::QuotaExhausted);
            }
            Err(e) => {
                warn!(title = title.as_str(), error = %e, "Search failed");
                tokio::time::sleep(self.config.video_delay).await;
                return Ok(EntityOutcome::SearchFailed);
            }
        };

        if candidates.is_empty() {
            info!(title = title.as_str(), "No candidates found");
            processed.insert(title);
            return Ok(EntityOutcome::NoCandidates);
        }

        let video_ids: Vec<String> = candidates
            .iter()
            .map(|c| c.video_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let fetch =
            fetch_statistics(self.platform, &video_ids, self.config.stats_delay, &self.retry).await;
        if fetch.quota_exhausted {
            warn!(title = title.as_str(), "Quota exceeded during stats fetch, stopping (progress already saved)");
            return Ok(EntityOutcome::QuotaExhausted);
        }

        let park = clean_wiki_text(&record.park);
        let location = clean_wiki_text(&record.location);
        let country = clean_wiki_text(&record.country);
        let context = RowContext {
            coaster_title: &title,
            park: &park,
            location: &location,
            country: &country,
            search_query: &query,
            fetched_at,
        };
        let rows = build_rows(candidates, |id| fetch.stats.get(id), &context);
        let ranked = rank_top_k(rows, self.config.top_k_by_views);

        append_video_rows(&self.config.videos_csv, &ranked)?;
        let appended = ranked.len();
        info!(title = title.as_str(), rows = appended, "Appended video rows");

        processed.insert(title);
        tokio::time::sleep(self.config.video_delay).await;
        Ok(EntityOutcome::Appended(appended))
    }
}

/// Coaster-level fields shared by every row of one coaster.
pub struct RowContext<'c> {
    pub coaster_title: &'c str,
    pub park: &'c str,
    pub location: &'c str,
    pub country: &'c str,
    pub search_query: &'c str,
    pub fetched_at: &'c str,
}

/// Merge candidates with their stats. Candidates without stats keep empty
/// count and channel cells.
pub fn build_rows<'s, F>(
    candidates: Vec<VideoCandidate>,
    stats_for: F,
    ctx: &RowContext<'_>,
) -> Vec<VideoRow>
where
    F: Fn(&str) -> Option<&'s VideoStats>,
{
    candidates
        .into_iter()
        .map(|c| {
            let stats = stats_for(&c.video_id);
            VideoRow {
                video_id: c.video_id,
                video_title: c.video_title,
                channel_title: c.channel_title,
                published_at: c.published_at,
                coaster_title: ctx.coaster_title.to_string(),
                park: ctx.park.to_string(),
                location: ctx.location.to_string(),
                country: ctx.country.to_string(),
                search_query: ctx.search_query.to_string(),
                fetched_at_utc: ctx.fetched_at.to_string(),
                view_count: stats.and_then(|s| s.view_count),
                like_count: stats.and_then(|s| s.like_count),
                comment_count: stats.and_then(|s| s.comment_count),
                channel_id: stats.map(|s| s.channel_id.clone()),
                channel_title_api: stats.map(|s| s.channel_title.clone()),
            }
        })
        .collect()
}

/// Highest view counts first (missing counts as 0), keeping at most `k`.
/// Ties keep search order.
pub fn rank_top_k(mut rows: Vec<VideoRow>, k: usize) -> Vec<VideoRow> {
    rows.sort_by_key(|r| std::cmp::Reverse(r.view_count.unwrap_or(0)));
    rows.truncate(k);
    rows
}
