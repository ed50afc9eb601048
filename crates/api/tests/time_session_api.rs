//! HTTP-level integration tests for the `/api/time-sessions` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json};
use serde_json::json;
use sqlx::SqlitePool;

async fn task_time(pool: &SqlitePool, task_id: &str) -> i64 {
    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/tasks/{task_id}"),
    )
    .await;
    body_json(response).await["time_spent"].as_i64().unwrap()
}

fn session_body(task_id: &str, minutes: i64) -> serde_json::Value {
    json!({
        "taskId": task_id,
        "durationMinutes": minutes,
        "startedAt": "2025-03-01T09:00:00Z",
        "endedAt": "2025-03-01T09:30:00Z",
        "notes": "standup",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_session_credits_task(pool: SqlitePool) {
    let project_id = common::create_project(&pool, "Sessions").await;
    let task_id = common::create_task(&pool, &project_id, "Meetings").await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/time-sessions",
        session_body(&task_id, 30),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["task_id"], task_id.as_str());
    assert_eq!(json["duration_minutes"], 30);
    assert_eq!(json["notes"], "standup");

    assert_eq!(task_time(&pool, &task_id).await, 30);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_session_for_unknown_task_returns_404(pool: SqlitePool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/time-sessions",
        session_body("ghost", 30),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_session_with_zero_duration_returns_400(pool: SqlitePool) {
    let project_id = common::create_project(&pool, "Sessions").await;
    let task_id = common::create_task(&pool, &project_id, "Meetings").await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/time-sessions",
        session_body(&task_id, 0),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "duration_minutes must be positive"
    );
    assert_eq!(task_time(&pool, &task_id).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_session_with_oversized_duration_returns_400(pool: SqlitePool) {
    let project_id = common::create_project(&pool, "Sessions").await;
    let task_id = common::create_task(&pool, &project_id, "Meetings").await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/time-sessions",
        session_body(&task_id, i64::MAX),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert_eq!(task_time(&pool, &task_id).await, 0);

    let response = get(
        common::build_test_app(pool),
        &format!("/api/time-sessions?task_id={task_id}"),
    )
    .await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_sessions_by_task(pool: SqlitePool) {
    let project_id = common::create_project(&pool, "Sessions").await;
    let task_id = common::create_task(&pool, &project_id, "Meetings").await;
    for minutes in [10, 20] {
        post_json(
            common::build_test_app(pool.clone()),
            "/api/time-sessions",
            session_body(&task_id, minutes),
        )
        .await;
    }

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/time-sessions?task_id={task_id}"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = get(common::build_test_app(pool), "/api/time-sessions").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_session_reverts_task_time(pool: SqlitePool) {
    let project_id = common::create_project(&pool, "Sessions").await;
    let task_id = common::create_task(&pool, &project_id, "Meetings").await;
    common::patch_json(
        common::build_test_app(pool.clone()),
        &format!("/api/tasks?id={task_id}"),
        json!({"action": "addTime", "minutes": 10}),
    )
    .await;

    let created = post_json(
        common::build_test_app(pool.clone()),
        "/api/time-sessions",
        session_body(&task_id, 30),
    )
    .await;
    let session_id = body_json(created).await["id"].as_str().unwrap().to_string();
    assert_eq!(task_time(&pool, &task_id).await, 40);

    let response = delete(
        common::build_test_app(pool.clone()),
        &format!("/api/time-sessions?id={session_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"success": true}));
    assert_eq!(task_time(&pool, &task_id).await, 10);

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/time-sessions?id={session_id}"),
    )
    .await;
    assert_eq!(body_json(response).await, json!({"success": false}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_session_without_id_returns_400(pool: SqlitePool) {
    let response = delete(common::build_test_app(pool), "/api/time-sessions").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Time session ID is required"
    );
}
