use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::board::apply::MemorySink;
use crate::board::catalog::JobId;
use crate::board::router::submit_handler;
use crate::board::storage::MemoryStore;

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).expect("encode")))
        .expect("request")
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn card_ids(body: &Value) -> Vec<u64> {
    body["cards"]
        .as_array()
        .expect("cards array")
        .iter()
        .map(|card| card["job_id"].as_u64().expect("numeric id"))
        .collect()
}

#[tokio::test]
async fn listing_route_applies_query_criteria() {
    let router = router_for(shared_board());

    let response = router
        .clone()
        .oneshot(empty("GET", "/api/v1/jobs?search=designer"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(card_ids(&body), vec![3]);
    assert_eq!(body["criteria"]["search_term"], "designer");

    let response = router
        .oneshot(empty("GET", "/api/v1/jobs?location=new%20york"))
        .await
        .expect("response");
    assert_eq!(card_ids(&read_json_body(response).await), vec![2]);
}

#[tokio::test]
async fn bookmark_route_toggles_and_feeds_bookmark_view() {
    let board = shared_board();
    let router = router_for(board.clone());

    let response = router
        .clone()
        .oneshot(empty("POST", "/api/v1/jobs/4/bookmark"))
        .await
        .expect("response");
    assert_eq!(
        read_json_body(response).await,
        json!({ "job_id": 4, "bookmarked": true })
    );

    let response = router
        .clone()
        .oneshot(empty("GET", "/api/v1/bookmarks"))
        .await
        .expect("response");
    let body = read_json_body(response).await;
    assert_eq!(card_ids(&body), vec![4]);
    assert_eq!(body["cards"][0]["bookmarked"], true);

    let response = router
        .oneshot(empty("POST", "/api/v1/jobs/999/bookmark"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await["bookmarked"], false);

    let guard = board.lock().expect("board lock");
    assert_eq!(guard.bookmarks().ids(), vec![JobId(4)]);
}

#[tokio::test]
async fn apply_route_opens_modal_and_submit_closes_it() {
    let router = router_for(shared_board());

    let response = router
        .clone()
        .oneshot(empty("POST", "/api/v1/jobs/2/apply"))
        .await
        .expect("response");
    let body = read_json_body(response).await;
    assert_eq!(body["state"], "open");
    assert_eq!(body["job_title"], "Marketing Manager");

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/v1/application",
            json!({ "name": "Ada", "email": "ada@example.com" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = read_json_body(response).await;
    assert_eq!(record["job_id"], 2);
    assert_eq!(record["job_title"], "Marketing Manager");
    assert!(record["submitted_at"].as_str().is_some());

    let response = router
        .oneshot(empty("GET", "/api/v1/application"))
        .await
        .expect("response");
    assert_eq!(read_json_body(response).await, json!({ "state": "closed" }));
}

#[tokio::test]
async fn apply_route_ignores_unknown_jobs() {
    let router = router_for(shared_board());

    let response = router
        .oneshot(empty("POST", "/api/v1/jobs/999/apply"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, json!({ "state": "closed" }));
}

#[tokio::test]
async fn submit_without_open_modal_conflicts() {
    let response = submit_handler::<MemoryStore, MemorySink>(
        State(shared_board()),
        axum::Json(form()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn submit_missing_email_is_unprocessable_and_keeps_modal() {
    let board = shared_board();
    let router = router_for(board.clone());
    router
        .clone()
        .oneshot(empty("POST", "/api/v1/jobs/1/apply"))
        .await
        .expect("response");

    let response = router
        .oneshot(post_json("/api/v1/application", json!({ "name": "Ada" })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(read_json_body(response).await["field"], "email");
    assert!(board.lock().expect("board lock").flow().is_open());
}

#[tokio::test]
async fn delete_route_dismisses_modal() {
    let board = shared_board();
    let router = router_for(board.clone());
    router
        .clone()
        .oneshot(empty("POST", "/api/v1/jobs/3/apply"))
        .await
        .expect("response");

    let response = router
        .oneshot(empty("DELETE", "/api/v1/application"))
        .await
        .expect("response");

    assert_eq!(read_json_body(response).await, json!({ "state": "closed" }));
    assert!(!board.lock().expect("board lock").flow().is_open());
}

#[tokio::test]
async fn board_page_renders_escaped_cards() {
    let router = router_for(shared_board());

    let response = router
        .oneshot(empty("GET", "/board"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let html = String::from_utf8(body.to_vec()).expect("utf8 page");
    assert!(html.contains("id=\"jobs-container\""));
    assert!(html.contains("<h3>UI/UX Designer</h3>"));
    assert_eq!(html.matches("class=\"job-card\"").count(), 4);
}
