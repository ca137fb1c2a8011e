//! Class weight list and upsert.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, error_message, get, put_json};
use opus_db::{MemoryStyleStore, StyleStore};
use serde_json::json;

const URI: &str = "/v1/styles/s1/weights";

fn setup() -> (Arc<MemoryStyleStore>, axum::Router) {
    let store = Arc::new(MemoryStyleStore::new());
    let app = common::build_test_app(Arc::clone(&store));
    (store, app)
}

fn weights(a: i32, b: i32, c: i32) -> serde_json::Value {
    json!({ "weights": [
        { "class_code": "A", "weight_pct": a },
        { "class_code": "B", "weight_pct": b },
        { "class_code": "C", "weight_pct": c },
    ]})
}

#[tokio::test]
async fn weights_summing_to_100_are_stored() {
    let (store, app) = setup();

    let response = put_json(app.clone(), URI, weights(50, 30, 20)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "ok": true, "upserted": 3 }));

    let json = body_json(get(app, URI).await).await;
    assert_eq!(
        json,
        json!({ "data": [
            { "class_code": "A", "weight_pct": 50 },
            { "class_code": "B", "weight_pct": 30 },
            { "class_code": "C", "weight_pct": 20 },
        ]})
    );
    assert_eq!(store.list_weights("s1").await.unwrap().len(), 3);
}

#[tokio::test]
async fn sums_other_than_100_are_rejected_before_writing() {
    for (a, expected) in [(49, 99), (51, 101)] {
        let (store, app) = setup();
        let response = put_json(app, URI, weights(a, 30, 20)).await;
        assert_eq!(
            error_message(response, 400).await,
            format!("Weights must sum to 100. Got {expected}.")
        );
        assert!(store.list_weights("s1").await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn rest_weight_is_accepted_and_counts_toward_the_sum() {
    let (store, app) = setup();
    let response = put_json(
        app,
        URI,
        json!({ "weights": [
            { "class_code": "a", "weight_pct": 60 },
            { "class_code": "Rest", "weight_pct": 40 },
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let codes: Vec<String> = store
        .list_weights("s1")
        .await
        .unwrap()
        .into_iter()
        .map(|w| w.class_code)
        .collect();
    assert_eq!(codes, vec!["A", "REST"]);
}

#[tokio::test]
async fn empty_weight_list_is_rejected() {
    let (store, app) = setup();
    let response = put_json(app, URI, json!({ "weights": [] })).await;
    let message = error_message(response, 400).await;
    assert!(message.contains("at least one entry"), "{message}");
    assert!(store.list_weights("s1").await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_class_code_is_rejected() {
    let (_, app) = setup();
    let response = put_json(
        app,
        URI,
        json!({ "weights": [{ "class_code": "", "weight_pct": 100 }] }),
    )
    .await;
    let message = error_message(response, 400).await;
    assert!(message.contains("class_code"), "{message}");
}

#[tokio::test]
async fn invalid_class_code_is_rejected() {
    let (_, app) = setup();
    let response = put_json(
        app,
        URI,
        json!({ "weights": [{ "class_code": "D", "weight_pct": 100 }] }),
    )
    .await;
    assert_eq!(error_message(response, 400).await, "Invalid class_code: D");
}

#[tokio::test]
async fn out_of_range_weight_is_rejected() {
    let (_, app) = setup();
    let response = put_json(
        app,
        URI,
        json!({ "weights": [
            { "class_code": "A", "weight_pct": 150 },
            { "class_code": "B", "weight_pct": -50 },
        ]}),
    )
    .await;
    let message = error_message(response, 400).await;
    assert!(message.contains("between 0 and 100"), "{message}");
}

#[tokio::test]
async fn non_integer_weight_is_a_shape_error() {
    let (_, app) = setup();
    let response = put_json(
        app,
        URI,
        json!({ "weights": [{ "class_code": "A", "weight_pct": "100" }] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn later_upsert_keeps_untouched_classes() {
    let (_, app) = setup();
    put_json(app.clone(), URI, weights(50, 30, 20)).await;
    put_json(
        app.clone(),
        URI,
        json!({ "weights": [{ "class_code": "A", "weight_pct": 100 }] }),
    )
    .await;

    let json = body_json(get(app, URI).await).await;
    assert_eq!(json["data"][0], json!({ "class_code": "A", "weight_pct": 100 }));
    assert_eq!(json["data"][1], json!({ "class_code": "B", "weight_pct": 30 }));
}

#[tokio::test]
async fn weight_store_failure_is_500_with_context() {
    let (store, app) = setup();
    store.set_failure(Some("read only")).await;

    let response = put_json(app.clone(), URI, weights(50, 30, 20)).await;
    assert_eq!(
        error_message(response, 500).await,
        "Failed to upsert weights: read only"
    );
    let response = get(app, URI).await;
    assert_eq!(
        error_message(response, 500).await,
        "Failed to fetch weights: read only"
    );
}
