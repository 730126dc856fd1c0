//! Integration tests for history replay.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sketchrelay_db::repositories::ChatRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: history returns events newest-first under `messages`
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn history_returns_events_newest_first(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    ChatRepo::append(&pool, 5, 1, "first").await.unwrap();
    ChatRepo::append(&pool, 5, 1, "second").await.unwrap();
    ChatRepo::append(&pool, 6, 1, "other-room").await.unwrap();

    let response = get(app, "/api/v1/rooms/5/events").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let messages = json["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["message"], "second");
    assert_eq!(messages[1]["message"], "first");
    assert_eq!(messages[0]["roomId"], 5);
}

// ---------------------------------------------------------------------------
// Test: an empty room replays as an empty list
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn history_of_empty_room_is_empty_list(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/rooms/42/events").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["messages"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Test: the limit parameter caps the page
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn history_respects_limit(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    for i in 0..5 {
        ChatRepo::append(&pool, 8, 1, &format!("m{i}")).await.unwrap();
    }

    let response = get(app, "/api/v1/rooms/8/events?limit=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let messages = json["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["message"], "m4");
}

// ---------------------------------------------------------------------------
// Test: invalid room identifiers are rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn history_rejects_non_positive_room_id(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/rooms/-3/events").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
