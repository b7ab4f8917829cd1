//! YouTubeClient against a mocked Data API.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use youtube_client::{YouTubeClient, YouTubeError};

fn client(server: &MockServer) -> YouTubeClient {
    YouTubeClient::with_base_url(&server.uri(), "test-key", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn search_sends_query_and_parses_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "\"Fury 325\" \"Carowinds\" roller coaster"))
        .and(query_param("type", "video"))
        .and(query_param("order", "viewCount"))
        .and(query_param("maxResults", "5"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": { "kind": "youtube#video", "videoId": "abc123" },
                    "snippet": {
                        "title": "Fury 325 POV",
                        "channelTitle": "CoasterForce",
                        "publishedAt": "2015-03-28T12:00:00Z"
                    }
                },
                {
                    "id": { "kind": "youtube#channel", "channelId": "UCxyz" },
                    "snippet": { "title": "A channel" }
                }
            ]
        })))
        .mount(&server)
        .await;

    let items = client(&server)
        .search("\"Fury 325\" \"Carowinds\" roller coaster", 5)
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id.video_id.as_deref(), Some("abc123"));
    assert_eq!(items[0].snippet.channel_title, "CoasterForce");
    assert!(items[1].id.video_id.is_none());
}

#[tokio::test]
async fn videos_joins_ids_and_keeps_raw_counts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "a,b"))
        .and(query_param("part", "statistics,snippet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": "a",
                    "statistics": { "viewCount": "1200", "likeCount": "40" },
                    "snippet": { "channelId": "UC1", "channelTitle": "One" }
                },
                { "id": "b", "statistics": {} }
            ]
        })))
        .mount(&server)
        .await;

    let items = client(&server)
        .videos(&["a".to_string(), "b".to_string()])
        .await
        .unwrap();

    assert_eq!(items[0].statistics.view_count.as_deref(), Some("1200"));
    assert!(items[0].statistics.comment_count.is_none());
    assert_eq!(items[0].snippet.channel_id, "UC1");
    assert!(items[1].statistics.view_count.is_none());
}

#[tokio::test]
async fn quota_response_is_distinguished() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "code": 403,
                "message": "quota",
                "errors": [ { "domain": "youtube.quota", "reason": "quotaExceeded" } ]
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server).search("x", 5).await.unwrap_err();
    assert!(err.is_quota_exceeded(), "got {err:?}");
}

#[tokio::test]
async fn too_many_ids_rejected_before_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let ids: Vec<String> = (0..51).map(|i| format!("v{i}")).collect();
    let err = client(&server).videos(&ids).await.unwrap_err();
    assert!(matches!(err, YouTubeError::Api { status: 400, .. }));
}
