//! Video stage against MockVideoPlatform with a temp video CSV.

use std::path::Path;
use std::time::Duration;

use coaster_common::{CoasterRecord, Config, VideoRow};
use coaster_scout::infra::RetryPolicy;
use coaster_scout::pipeline::{build_query, fetch_statistics, search_candidates, VideoRanker};
use coaster_scout::store::load_processed;
use coaster_scout::testing::{search_item, MockVideoPlatform, StatsBehavior};

const FETCHED_AT: &str = "2026-10-15T08:00:00+00:00";

fn test_config(dir: &Path) -> Config {
    Config {
        video_delay: Duration::ZERO,
        stats_delay: Duration::ZERO,
        retry_base_delay: Duration::ZERO,
        top_k_by_views: 3,
        coasters_csv: dir.join("coasters_basic.csv"),
        videos_csv: dir.join("coaster_youtube_videos.csv"),
        ..Config::default()
    }
}

fn record(title: &str, park: &str, country: &str) -> CoasterRecord {
    CoasterRecord {
        title: title.to_string(),
        park: park.to_string(),
        location: String::new(),
        country: country.to_string(),
    }
}

fn read_rows(path: &Path) -> Vec<VideoRow> {
    if !path.exists() {
        return Vec::new();
    }
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.deserialize().map(|r| r.unwrap()).collect()
}

fn sv_query() -> String {
    build_query("Steel Vengeance", "[[Cedar Point]]", "", "")
}

fn fury_query() -> String {
    build_query("Fury 325", "[[Carowinds|Carowinds]]", "", "")
}

/// Steel Vengeance: five candidates with views [10, None, 30, 5, 20].
/// Fury 325: one candidate.
fn platform() -> MockVideoPlatform {
    MockVideoPlatform::new()
        .on_search(
            &sv_query(),
            &[("a", "SV 1"), ("b", "SV 2"), ("c", "SV 3"), ("d", "SV 4"), ("e", "SV 5")],
        )
        .on_stats("a", Some("10"), Some("1"))
        .on_stats("b", None, None)
        .on_stats("c", Some("30"), Some("3"))
        .on_stats("d", Some("5"), None)
        .on_stats("e", Some("20"), Some("hidden"))
        .on_search(&fury_query(), &[("f", "Fury POV")])
        .on_stats("f", Some("999"), None)
}

fn records() -> Vec<CoasterRecord> {
    vec![
        record("Steel Vengeance", "[[Cedar Point]]", "United States"),
        record("Fury 325", "[[Carowinds|Carowinds]]", ""),
    ]
}

#[tokio::test]
async fn keeps_top_k_by_views_per_coaster() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let platform = platform();

    let stats = VideoRanker::new(&platform, &config)
        .run_records(&records(), FETCHED_AT)
        .await
        .unwrap();

    assert_eq!(stats.coasters_added, 2);
    assert_eq!(stats.rows_appended, 4);
    assert!(!stats.stopped_on_quota);

    let rows = read_rows(&config.videos_csv);
    let sv: Vec<_> = rows.iter().filter(|r| r.coaster_title == "Steel Vengeance").collect();
    let views: Vec<_> = sv.iter().map(|r| r.view_count).collect();
    assert_eq!(views, vec![Some(30), Some(20), Some(10)]);

    let top = sv[0];
    assert_eq!(top.video_id, "c");
    assert_eq!(top.park, "Cedar Point");
    assert_eq!(top.country, "United States");
    assert_eq!(top.search_query, "\"Steel Vengeance\" \"Cedar Point\" roller coaster");
    assert_eq!(top.fetched_at_utc, FETCHED_AT);
    assert_eq!(top.channel_id.as_deref(), Some("UC-c"));
    assert_eq!(sv[1].like_count, None, "non-numeric likes are absent, not zero");

    let fury: Vec<_> = rows.iter().filter(|r| r.coaster_title == "Fury 325").collect();
    assert_eq!(fury.len(), 1);
    assert_eq!(fury[0].park, "Carowinds");
}

#[tokio::test]
async fn second_run_adds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let first = platform();
    VideoRanker::new(&first, &config)
        .run_records(&records(), FETCHED_AT)
        .await
        .unwrap();
    let rows_after_first = read_rows(&config.videos_csv).len();

    let second = platform();
    let stats = VideoRanker::new(&second, &config)
        .run_records(&records(), "2026-10-16T08:00:00+00:00")
        .await
        .unwrap();

    assert_eq!(stats.coasters_added, 0);
    assert_eq!(stats.coasters_skipped, 2);
    assert_eq!(second.search_call_count(), 0);
    assert_eq!(read_rows(&config.videos_csv).len(), rows_after_first);
}

#[tokio::test]
async fn quota_during_search_stops_and_keeps_earlier_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let platform = platform().quota_on_search(&fury_query());
    let mut input = records();
    input.push(record("Maverick", "Cedar Point", ""));

    let stats = VideoRanker::new(&platform, &config)
        .run_records(&input, FETCHED_AT)
        .await
        .unwrap();

    assert!(stats.stopped_on_quota);
    assert_eq!(stats.coasters_added, 1);
    assert_eq!(platform.search_call_count(), 2, "Maverick is never searched");

    let rows = read_rows(&config.videos_csv);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.coaster_title == "Steel Vengeance"));

    let processed = load_processed(&config.videos_csv);
    assert!(!processed.contains("Fury 325"), "Fury stays eligible for the next run");
}

#[tokio::test]
async fn quota_during_stats_stops_without_rows_for_that_coaster() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let platform = platform().stats_behavior(StatsBehavior::QuotaFromCall(1));

    let stats = VideoRanker::new(&platform, &config)
        .run_records(&records(), FETCHED_AT)
        .await
        .unwrap();

    assert!(stats.stopped_on_quota);
    assert_eq!(stats.coasters_added, 1);
    let rows = read_rows(&config.videos_csv);
    assert!(rows.iter().all(|r| r.coaster_title == "Steel Vengeance"));
}

#[tokio::test]
async fn failing_stats_still_writes_rows_without_counts() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let platform = platform().stats_behavior(StatsBehavior::Fail);

    let stats = VideoRanker::new(&platform, &config)
        .run_records(&records()[..1], FETCHED_AT)
        .await
        .unwrap();

    assert_eq!(stats.coasters_added, 1);
    let rows = read_rows(&config.videos_csv);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.view_count.is_none()));
    // All counts tie at zero, so search order is kept.
    let ids: Vec<_> = rows.iter().map(|r| r.video_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn search_failure_skips_coaster_but_continues() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let platform = platform().failing_search(&sv_query());

    let stats = VideoRanker::new(&platform, &config)
        .run_records(&records(), FETCHED_AT)
        .await
        .unwrap();

    assert_eq!(stats.coasters_failed, 1);
    assert_eq!(stats.coasters_added, 1);
    let processed = load_processed(&config.videos_csv);
    assert!(processed.contains("Fury 325"));
    assert!(!processed.contains("Steel Vengeance"));
}

#[tokio::test]
async fn no_candidates_marks_processed_without_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let platform = platform();
    let input = vec![
        record("Obscure Coaster", "", ""),
        record("Obscure Coaster", "", ""),
    ];

    let stats = VideoRanker::new(&platform, &config)
        .run_records(&input, FETCHED_AT)
        .await
        .unwrap();

    assert_eq!(stats.coasters_without_candidates, 1);
    assert_eq!(stats.coasters_skipped, 1);
    assert_eq!(platform.search_call_count(), 1);
    assert!(!config.videos_csv.exists());
}

#[tokio::test]
async fn run_reads_coaster_csv_and_honours_max() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.video_max_coasters = 1;
    std::fs::write(
        &config.coasters_csv,
        "title,name,park,location,country,speed\n\
         Steel Vengeance,Steel Vengeance,[[Cedar Point]],,United States,74 mph\n\
         Fury 325,Fury 325,[[Carowinds|Carowinds]],,,95 mph\n",
    )
    .unwrap();
    let platform = platform();

    let stats = VideoRanker::new(&platform, &config).run().await.unwrap();

    assert_eq!(stats.coasters_seen, 1);
    assert_eq!(platform.search_calls.lock().unwrap().as_slice(), &[sv_query()]);
}

#[tokio::test]
async fn stats_are_batched_fifty_at_a_time() {
    let platform = MockVideoPlatform::new();
    let ids: Vec<String> = (0..120).map(|i| format!("vid{i}")).collect();

    let fetch = fetch_statistics(&platform, &ids, Duration::ZERO, &RetryPolicy::none()).await;

    assert_eq!(platform.stats_batch_sizes(), vec![50, 50, 20]);
    assert!(!fetch.quota_exhausted);
}

#[tokio::test]
async fn stats_quota_returns_partial_result() {
    let mut platform = MockVideoPlatform::new().stats_behavior(StatsBehavior::QuotaFromCall(1));
    for i in 0..120 {
        platform = platform.on_stats(&format!("vid{i}"), Some("7"), None);
    }
    let ids: Vec<String> = (0..120).map(|i| format!("vid{i}")).collect();

    let fetch = fetch_statistics(&platform, &ids, Duration::ZERO, &RetryPolicy::none()).await;

    assert!(fetch.quota_exhausted);
    assert_eq!(fetch.stats.len(), 50);
    assert_eq!(platform.stats_batch_sizes(), vec![50, 50]);
    assert_eq!(fetch.stats["vid0"].view_count, Some(7));
}

#[tokio::test]
async fn failed_batches_are_skipped() {
    let platform = MockVideoPlatform::new().stats_behavior(StatsBehavior::Fail);
    let ids: Vec<String> = (0..60).map(|i| format!("vid{i}")).collect();

    let fetch = fetch_statistics(&platform, &ids, Duration::ZERO, &RetryPolicy::none()).await;

    assert!(!fetch.quota_exhausted);
    assert_eq!(fetch.failed_batches, 2);
    assert!(fetch.stats.is_empty());
}

#[tokio::test]
async fn search_drops_hits_without_video_id() {
    let mut channel_hit = search_item("", "A channel");
    channel_hit.id.video_id = None;
    let platform = MockVideoPlatform::new().on_search_items(
        "q",
        vec![search_item("x1", "One"), channel_hit, search_item("x2", "Two")],
    );

    let candidates = search_candidates(&platform, "q", 5, &RetryPolicy::none()).await.unwrap();

    let ids: Vec<_> = candidates.iter().map(|c| c.video_id.as_str()).collect();
    assert_eq!(ids, vec!["x1", "x2"]);
    assert_eq!(candidates[0].video_title, "One");
}

#[tokio::test]
async fn search_quota_error_is_distinguishable() {
    let platform = MockVideoPlatform::new().quota_on_search("q");
    let err = search_candidates(&platform, "q", 5, &RetryPolicy::new(3, Duration::ZERO))
        .await
        .unwrap_err();
    assert!(err.is_quota_exceeded());
    assert_eq!(platform.search_call_count(), 1, "quota is never retried");
}
