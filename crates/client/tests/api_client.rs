//! `OpusApiClient` against a mock server.

use std::time::Duration;

use assert_matches::assert_matches;
use opus_client::helpers::{
    best_effort, fetch_assignment_map, fetch_style_song_rows, upsert_assignments,
};
use opus_client::models::{AssignmentUpdate, PlaybackMode, WeightUpdate};
use opus_client::{ClientConfig, ClientError, OpusApiClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "shared-secret";

fn client_for(server: &MockServer) -> OpusApiClient {
    OpusApiClient::new(ClientConfig {
        base_url: server.uri(),
        api_key: KEY.to_string(),
        timeout: Duration::from_secs(5),
    })
    .expect("client should build")
}

#[tokio::test]
async fn get_styles_sends_key_and_unwraps_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/styles"))
        .and(header("x-api-key", KEY))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": "s1", "name": "Ambient" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let styles = client_for(&server).get_styles().await.expect("request should succeed");
    assert_eq!(styles.len(), 1);
    assert_eq!(styles[0].name, "Ambient");
}

#[tokio::test]
async fn style_tracks_decode_optional_song() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/styles/s1/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [
            { "library_song_id": "t1", "sim_duration_seconds": 180,
              "song": { "id": "t1", "artist": "Eno", "title": "1/1", "album": null,
                        "peak_year": 1978, "run_time_seconds": 1033, "styles": null } },
            { "library_song_id": "t2", "sim_duration_seconds": null, "song": null },
        ]})))
        .mount(&server)
        .await;

    let tracks = client_for(&server).get_style_tracks("s1").await.unwrap();
    assert_eq!(tracks[0].song.as_ref().unwrap().peak_year, Some(1978));
    assert!(tracks[1].song.is_none());
}

#[tokio::test]
async fn update_assignments_puts_wrapped_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/styles/s1/assignments"))
        .and(body_json(json!({ "assignments": [
            { "library_song_id": "t1", "class_code": "A" }
        ]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "upserted": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let rows = [AssignmentUpdate {
        library_song_id: "t1".into(),
        class_code: "A".into(),
    }];
    let result = client_for(&server)
        .update_style_assignments("s1", &rows)
        .await
        .unwrap();
    assert!(result.ok);
    assert_eq!(result.upserted, 1);
}

#[tokio::test]
async fn delete_assignments_sends_song_ids() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/styles/s1/assignments"))
        .and(body_json(json!({ "songIds": ["t1", "t2"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "deleted": 1 })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .delete_style_assignments("s1", &["t1".to_string(), "t2".to_string()])
        .await
        .unwrap();
    assert_eq!(result.deleted, 1);
}

#[tokio::test]
async fn weights_round_trip_through_the_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/styles/s1/weights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [
            { "class_code": "A", "weight_pct": 70 },
            { "class_code": "B", "weight_pct": null },
        ]})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/styles/s1/weights"))
        .and(body_json(json!({ "weights": [{ "class_code": "A", "weight_pct": 100 }] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "upserted": 1 })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let weights = client.get_style_weights("s1").await.unwrap();
    assert_eq!(weights[0].weight_pct, Some(70));
    assert_eq!(weights[1].weight_pct, None);

    let result = client
        .update_style_weights(
            "s1",
            &[WeightUpdate {
                class_code: "A".into(),
                weight_pct: 100,
            }],
        )
        .await
        .unwrap();
    assert_eq!(result.upserted, 1);
}

#[tokio::test]
async fn playback_profile_requests_track_ids_on_demand() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/styles/s1/playback-profile"))
        .and(query_param("include_track_ids", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {
            "style_id": "s1",
            "mode": "CLASS_WEIGHTED",
            "updated_at": "2024-05-01T12:00:00.000Z",
            "weights": { "A": 60, "B": 40, "C": 0 },
            "pools": {
                "A": { "count": 1, "track_ids": ["t1"] },
                "B": { "count": 1, "track_ids": ["t2"] },
                "C": { "count": 0, "track_ids": [] },
                "UNCATEGORIZED": { "count": 0, "track_ids": [] },
                "REST": { "count": 0, "track_ids": [] },
            },
            "membership_truncated": false,
        }})))
        .mount(&server)
        .await;

    let profile = client_for(&server)
        .get_playback_profile("s1", true)
        .await
        .unwrap();
    assert_eq!(profile.mode, PlaybackMode::ClassWeighted);
    assert_eq!(profile.weights.a, 60);
    assert_eq!(profile.pools.a.track_ids.as_deref(), Some(&["t1".to_string()][..]));
    assert!(profile.updated_at.is_some());
}

#[tokio::test]
async fn health_needs_only_the_root_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    assert!(client_for(&server).health().await.unwrap().ok);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_body_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/styles/s1/weights"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "message": "Weights must sum to 100. Got 99.", "status": 400 }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .update_style_weights(
            "s1",
            &[WeightUpdate {
                class_code: "A".into(),
                weight_pct: 99,
            }],
        )
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ClientError::Api { status: 400, ref message } if message == "Weights must sum to 100. Got 99."
    );
}

#[tokio::test]
async fn non_json_error_falls_back_to_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/styles"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_styles().await.unwrap_err();
    assert_matches!(
        err,
        ClientError::Api { status: 502, ref message } if message == "API request failed"
    );
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn song_rows_drop_missing_ids_and_fill_blank_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/styles/s1/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [
            { "library_song_id": "t1", "sim_duration_seconds": 180,
              "song": { "id": "t1", "artist": "Eno", "title": null, "album": null,
                        "peak_year": null, "run_time_seconds": null, "styles": "ambient" } },
            { "library_song_id": "", "sim_duration_seconds": 90, "song": null },
            { "library_song_id": null, "sim_duration_seconds": 90, "song": null },
            { "sim_duration_seconds": 90, "song": null },
            { "library_song_id": "t2", "sim_duration_seconds": null, "song": null },
        ]})))
        .mount(&server)
        .await;

    let rows = fetch_style_song_rows(&client_for(&server), "s1").await.unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].song_id, "t1");
    assert_eq!(rows[0].sim_duration_seconds, Some(180));
    let song = rows[0].song.as_ref().unwrap();
    assert_eq!(song.artist, "Eno");
    assert_eq!(song.title, "");
    assert_eq!(song.album, "");
    assert_eq!(song.year, None);
    assert_eq!(song.run_time_seconds, 0);
    assert_eq!(song.styles, "ambient");

    assert_eq!(rows[1].song_id, "t2");
    assert_eq!(rows[1].sim_duration_seconds, None);
    assert!(rows[1].song.is_none());
}

#[tokio::test]
async fn assignment_map_skips_rows_without_an_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/styles/s1/assignments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [
            { "library_song_id": "t1", "class_code": "A", "moved_at": "2024-05-01T12:00:00Z" },
            { "library_song_id": "", "class_code": "B", "moved_at": null },
            { "library_song_id": null, "class_code": "C", "moved_at": null },
        ]})))
        .mount(&server)
        .await;

    let map = fetch_assignment_map(&client_for(&server), "s1").await.unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map["t1"].class_code, "A");
    assert!(map["t1"].moved_at.is_some());
}

#[tokio::test]
async fn empty_upsert_short_circuits_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = upsert_assignments(&client, "s1", &[]).await.unwrap();
    assert!(result.ok);
    assert_eq!(result.upserted, 0);

    let blank = [AssignmentUpdate {
        library_song_id: String::new(),
        class_code: "A".into(),
    }];
    let result = upsert_assignments(&client, "s1", &blank).await.unwrap();
    assert_eq!(result.upserted, 0);
}

#[tokio::test]
async fn best_effort_swallows_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/styles"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Unauthorized", "status": 401 }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(best_effort("load styles", client.get_styles()).await.is_none());
}
