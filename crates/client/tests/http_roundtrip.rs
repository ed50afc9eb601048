//! End-to-end tests: `HttpTrackerApi` and `ProjectStore` against the real
//! router served over TCP with an in-memory database.

use assert_matches::assert_matches;
use timekeep_api::config::ServerConfig;
use timekeep_api::router::build_app_router;
use timekeep_api::state::AppState;
use timekeep_client::{format_minutes, ClientError, HttpTrackerApi, ProjectStore, TrackerApi};
use timekeep_core::models::project::CreateProject;
use timekeep_core::models::task::CreateTask;

/// Serve the full application on an ephemeral port and return its base URL.
async fn spawn_server() -> String {
    let pool = timekeep_db::create_pool("sqlite::memory:", 1).await.unwrap();
    timekeep_db::run_migrations(&pool).await.unwrap();

    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".into()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".into(),
        db_max_connections: 1,
    };
    let app = build_app_router(AppState { pool }, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn store_round_trips_through_http() {
    let base_url = spawn_server().await;
    let store = ProjectStore::new(HttpTrackerApi::new(&base_url));
    store.init().await.unwrap();
    assert!(store.snapshot().is_empty());

    let project = store
        .add_project(CreateProject {
            name: "Writing".into(),
            description: None,
            color: "#ff0000".into(),
        })
        .await
        .unwrap();
    let task = store
        .add_task(CreateTask {
            project_id: project.id.clone(),
            name: "Draft".into(),
            description: Some("First pass".into()),
        })
        .await
        .unwrap();

    let updated = store.add_time(&task.id, 90).await.unwrap();
    assert_eq!(updated.time_spent, 90);
    let toggled = store.toggle_task(&task.id).await.unwrap();
    assert_eq!(toggled.status, "completed");

    // A fresh store sees the same tasks and totals the first one cached.
    let fresh = ProjectStore::new(HttpTrackerApi::new(&base_url));
    fresh.init().await.unwrap();
    let loaded = fresh.snapshot();
    let cached = store.snapshot();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].tasks, cached[0].tasks);
    assert_eq!(loaded[0].project.total_minutes, cached[0].project.total_minutes);
    assert_eq!(format_minutes(loaded[0].project.total_minutes), "1h 30m");

    store.remove_project(&project.id).await.unwrap();
    fresh.init().await.unwrap();
    assert!(fresh.snapshot().is_empty());
}

#[tokio::test]
async fn server_errors_are_classified() {
    let base_url = spawn_server().await;
    let api = HttpTrackerApi::new(&base_url);

    let missing = api.toggle_task("ghost").await;
    assert_matches!(missing, Err(ClientError::NotFound(message)) if message.contains("ghost"));

    let invalid = api
        .create_project(&CreateProject {
            name: "".into(),
            description: None,
            color: "#000".into(),
        })
        .await;
    assert_matches!(
        invalid,
        Err(ClientError::Api { status: 400, message }) if message == "name is required"
    );

    assert!(!api.delete_task("ghost").await.unwrap());
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let store = ProjectStore::new(HttpTrackerApi::new("http://127.0.0.1:9"));

    let result = store.init().await;

    assert_matches!(result, Err(ClientError::Request(_)));
    assert!(store.snapshot().is_empty());
}
