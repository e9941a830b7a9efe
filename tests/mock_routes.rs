use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use serde_json::{Value, json};
use tower::ServiceExt;

use todo_rest::{config::AppConfig, db::entities::todo, routes::app, state::AppState};

fn mock_app(db: MockDatabase) -> Router {
    app(AppState::new(AppConfig::default(), db.into_connection()))
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn database_failures_surface_as_json_500() {
    let app = mock_app(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())]),
    );

    let (status, body) = call(
        app,
        Request::builder().uri("/todos/1").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "status": 500, "message": "Todo fetch failed" }));
}

#[tokio::test]
async fn failed_inserts_report_the_create_context() {
    let app = mock_app(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("disk full".to_string())]),
    );

    let (status, body) = call(
        app,
        Request::builder()
            .method("POST")
            .uri("/todos")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "title": "Buy milk" }).to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Create todo failed");
}

#[tokio::test]
async fn reads_come_straight_from_the_repository() {
    let app = mock_app(
        MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[todo::Model {
            id: 4,
            title: Some("Water plants".to_string()),
            description: None,
            completed: true,
        }]]),
    );

    let (status, body) = call(
        app,
        Request::builder().uri("/todos/4").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": 4, "title": "Water plants", "description": null, "completed": true })
    );
}
