mod common;

use axum::http::StatusCode;
use calendar_backend::db::UserRepository;
use serde_json::{Value, json};

use common::{TestApp, spawn_app};

const NO_SCHEDULE: &str = "존재하지 않는 스케줄입니다.";
const NO_EVENT: &str = "존재하지 않는 event 입니다.";
const BAD_REQUEST: &str = "잘못된 요청입니다.";

fn timeless(content: &str) -> Value {
    json!({ "content": content, "date": "2023-01-01" })
}

fn timed(content: &str, start: &str, end: &str) -> Value {
    json!({ "content": content, "date": "2023-01-01", "startTime": start, "endTime": end })
}

/// Token for a user whose schedule was never created.
async fn orphan_token(app: &TestApp) -> String {
    let user = app
        .state
        .users
        .insert_user("orphan@example.com", "hash")
        .await
        .expect("Failed to insert user");
    app.state.keys.issue(user.id).expect("Failed to issue token")
}

#[tokio::test]
async fn test_event_endpoints_require_token() {
    let app = spawn_app().await;

    let (status, _) = app.send("GET", "/event", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send("POST", "/event", None, Some(timeless("x"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_schedule_on_every_endpoint() {
    let app = spawn_app().await;
    let token = orphan_token(&app).await;

    let requests = [
        ("GET", "/event", None),
        ("POST", "/event", Some(timeless("x"))),
        ("GET", "/event/single?date=2023-01-01&page=1", None),
        ("GET", "/event/timed?date=2023-01-01&page=1", None),
        ("PUT", "/event/1", Some(timeless("x"))),
        ("DELETE", "/event/1", None),
        ("GET", "/event/?date=2023-01-01", None),
        // 壊れたリクエストでもスケジュールの確認が先
        ("POST", "/event", Some(json!({ "content": "x" }))),
        ("POST", "/event", None),
        ("GET", "/event/single", None),
        ("GET", "/event/timed?date=2023-01-01&page=abc", None),
        ("PUT", "/event/1", Some(json!({ "content": "x" }))),
        ("PUT", "/event/abc", Some(timeless("x"))),
        ("DELETE", "/event/abc", None),
        ("POST", "/todo", Some(json!({}))),
    ];

    for (method, uri, body) in requests {
        let (status, message) = app.text(method, uri, Some(&token), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(message, NO_SCHEDULE, "{} {}", method, uri);
    }
}

#[tokio::test]
async fn test_malformed_requests_get_korean_message() {
    let app = spawn_app().await;
    let token = app.login_as("a@example.com").await;

    let requests = [
        ("POST", "/event", Some(json!({ "content": "x" }))),
        ("GET", "/event/single", None),
        ("GET", "/event/timed?date=2023-01-01&page=-1", None),
        ("PUT", "/event/1", Some(json!({ "content": "x" }))),
        ("DELETE", "/event/abc", None),
        ("POST", "/todo", Some(json!({}))),
    ];

    for (method, uri, body) in requests {
        let (status, message) = app.text(method, uri, Some(&token), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(message, BAD_REQUEST, "{} {}", method, uri);
    }
}

#[tokio::test]
async fn test_add_event_with_identical_times() {
    let app = spawn_app().await;
    let token = app.login_as("a@example.com").await;

    let event = app
        .add_event(
            &token,
            timed("회의", "2023-01-01T10:00:00.000Z", "2023-01-01T10:00:00.000Z"),
        )
        .await;

    assert_eq!(event["content"], "회의");
    assert_eq!(event["date"], "2023-01-01");
    assert_eq!(event["startTime"], "2023-01-01T10:00:00.000Z");
    assert!(event["endTime"].is_null());
}

#[tokio::test]
async fn test_add_event_accepts_client_date_strings() {
    let app = spawn_app().await;
    let token = app.login_as("a@example.com").await;

    let event = app
        .add_event(
            &token,
            timed(
                "회의",
                "Sun Jan 01 2023 19:00:00 GMT+0900 (한국 표준시)",
                "Sun Jan 01 2023 20:00:00 GMT+0900 (한국 표준시)",
            ),
        )
        .await;

    assert_eq!(event["startTime"], "2023-01-01T10:00:00.000Z");
    assert_eq!(event["endTime"], "2023-01-01T11:00:00.000Z");
}

#[tokio::test]
async fn test_add_event_rejects_bad_time() {
    let app = spawn_app().await;
    let token = app.login_as("a@example.com").await;

    let (status, message) = app
        .text("POST", "/event", Some(&token), Some(timed("회의", "soon", "later")))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "유효하지 않은 시간입니다.");
}

#[tokio::test]
async fn test_load_events_only_returns_own() {
    let app = spawn_app().await;
    let alice = app.login_as("a@example.com").await;
    let bob = app.login_as("b@example.com").await;

    app.add_event(&alice, timeless("alice")).await;
    app.add_event(&bob, timeless("bob")).await;

    let (status, events) = app.json("GET", "/event", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["content"], "alice");
}

#[tokio::test]
async fn test_load_events_with_trailing_slash() {
    let app = spawn_app().await;
    let token = app.login_as("a@example.com").await;
    app.add_event(&token, timeless("회의")).await;

    // クライアントは /event/?date=... で呼ぶ
    let (status, events) = app.json("GET", "/event/?date=2023-01-01", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["content"], "회의");
}

#[tokio::test]
async fn test_timeless_listing_pages() {
    let app = spawn_app().await;
    let token = app.login_as("a@example.com").await;

    for content in ["a", "b", "c"] {
        app.add_event(&token, timeless(content)).await;
    }
    app.add_event(
        &token,
        timed("timed", "2023-01-01T10:00:00.000Z", "2023-01-01T11:00:00.000Z"),
    )
    .await;

    let (status, body) = app
        .json("GET", "/event/single?date=2023-01-01&page=1", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eventsWithoutTime"].as_array().unwrap().len(), 2);
    assert_eq!(body["eventsWithoutTimeTotalPages"], 2);

    let (_, body) = app
        .json("GET", "/event/single?date=2023-01-01&page=2", Some(&token), None)
        .await;
    let page = body["eventsWithoutTime"].as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["content"], "c");

    // page 省略時は先頭ページ
    let (_, body) = app
        .json("GET", "/event/single?date=2023-01-01", Some(&token), None)
        .await;
    assert_eq!(body["eventsWithoutTime"][0]["content"], "a");
}

#[tokio::test]
async fn test_timed_listing_orders_and_renders() {
    let app = spawn_app().await;
    let token = app.login_as("a@example.com").await;

    app.add_event(
        &token,
        timed("late", "2023-01-01T15:00:00.000Z", "2023-01-01T16:00:00.000Z"),
    )
    .await;
    app.add_event(
        &token,
        timed("long", "2023-01-01T09:00:00.000Z", "2023-01-01T12:00:00.000Z"),
    )
    .await;
    app.add_event(
        &token,
        timed("short", "2023-01-01T09:00:00.000Z", "2023-01-01T10:00:00.000Z"),
    )
    .await;
    app.add_event(&token, timeless("none")).await;

    let (status, body) = app
        .json("GET", "/event/timed?date=2023-01-01&page=1", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["eventsWithTimeTotalPages"], 2);

    let page = body["parsedEventsWithTime"].as_array().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["content"], "short");
    assert_eq!(
        page[0]["startTime"],
        "Sun Jan 01 2023 09:00:00 GMT+0000 (Coordinated Universal Time)"
    );
    assert_eq!(
        page[0]["endTime"],
        "Sun Jan 01 2023 10:00:00 GMT+0000 (Coordinated Universal Time)"
    );
    assert_eq!(page[1]["content"], "long");

    let (_, body) = app
        .json("GET", "/event/timed?date=2023-01-01&page=2", Some(&token), None)
        .await;
    let page = body["parsedEventsWithTime"].as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["content"], "late");
}

#[tokio::test]
async fn test_edit_event_replaces_everything() {
    let app = spawn_app().await;
    let token = app.login_as("a@example.com").await;

    let event = app
        .add_event(
            &token,
            timed("회의", "2023-01-01T09:00:00.000Z", "2023-01-01T10:00:00.000Z"),
        )
        .await;
    let uri = format!("/event/{}", event["id"]);

    let (status, edited) = app
        .json(
            "PUT",
            &uri,
            Some(&token),
            Some(json!({ "content": "점심", "date": "2023-01-02" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited["id"], event["id"]);
    assert_eq!(edited["content"], "점심");
    assert_eq!(edited["date"], "2023-01-02");
    assert!(edited["startTime"].is_null());
    assert!(edited["endTime"].is_null());

    let (_, edited) = app
        .json(
            "PUT",
            &uri,
            Some(&token),
            Some(timed("다시", "2023-01-01T13:00:00.000Z", "2023-01-01T14:00:00.000Z")),
        )
        .await;
    assert_eq!(edited["startTime"], "2023-01-01T13:00:00.000Z");
    assert_eq!(edited["endTime"], "2023-01-01T14:00:00.000Z");
}

#[tokio::test]
async fn test_foreign_event_cannot_be_edited_or_deleted() {
    let app = spawn_app().await;
    let alice = app.login_as("a@example.com").await;
    let bob = app.login_as("b@example.com").await;

    let event = app.add_event(&alice, timeless("alice")).await;
    let uri = format!("/event/{}", event["id"]);

    let (status, message) = app.text("PUT", &uri, Some(&bob), Some(timeless("bob"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, NO_EVENT);

    let (status, message) = app.text("DELETE", &uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, NO_EVENT);

    let (_, events) = app.json("GET", "/event", Some(&alice), None).await;
    assert_eq!(events[0]["content"], "alice");
}

#[tokio::test]
async fn test_delete_event_returns_prior_state() {
    let app = spawn_app().await;
    let token = app.login_as("a@example.com").await;

    let event = app.add_event(&token, timeless("지울 일정")).await;
    let uri = format!("/event/{}", event["id"]);

    let (status, deleted) = app.json("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, event);

    let (status, message) = app.text("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, NO_EVENT);

    let (_, events) = app.json("GET", "/event", Some(&token), None).await;
    assert!(events.as_array().unwrap().is_empty());
}
