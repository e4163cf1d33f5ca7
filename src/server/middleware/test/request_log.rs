use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::builder::TestBuilder;
use tower::ServiceExt;

use crate::server::{
    middleware::request_log::{is_slow, request_log, CORRELATION_ID_HEADER},
    state::AppState,
};

fn app(state: AppState, delay_ms: u64) -> Router {
    Router::new()
        .route(
            "/api/v1/books",
            get(move || async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                "done"
            }),
        )
        .route("/health", get(|| async { "ok" }))
        .layer(middleware::from_fn_with_state(state.clone(), request_log))
        .with_state(state)
}

fn with_threshold(db: &sea_orm::DatabaseConnection, threshold_ms: u64) -> AppState {
    let mut state = AppState::for_test(db.clone());
    Arc::make_mut(&mut state.config).slow_request_threshold_ms = threshold_ms;
    state
}

#[test]
fn slow_means_strictly_over_threshold() {
    assert!(!is_slow(1000, 1000));
    assert!(is_slow(1001, 1000));
    assert!(!is_slow(0, 0));
    assert!(is_slow(1, 0));
}

/// Tests a request over the threshold writes a performance row.
///
/// Expected: one api request row and one performance row for the path
#[tokio::test]
async fn slow_request_writes_performance_log() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let response = app(with_threshold(db, 10), 60)
        .oneshot(
            Request::builder()
                .uri("/api/v1/books")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let timings = entity::prelude::PerformanceLog::find().all(db).await?;
    assert_eq!(timings.len(), 1);
    assert_eq!(timings[0].component, "api");
    assert_eq!(timings[0].operation, "GET /api/v1/books");
    assert!(timings[0].duration_ms > 10);

    assert_eq!(entity::prelude::ApiRequestLog::find().count(db).await?, 1);

    Ok(())
}

/// Tests a request under the threshold writes only the api request row.
///
/// Expected: one api request row and zero performance rows
#[tokio::test]
async fn fast_request_skips_performance_log() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    app(with_threshold(db, 60_000), 0)
        .oneshot(
            Request::builder()
                .uri("/api/v1/books?page=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(entity::prelude::PerformanceLog::find().count(db).await?, 0);

    let requests = entity::prelude::ApiRequestLog::find().all(db).await?;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].endpoint, "/api/v1/books");
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].status_code, 200);
    assert_eq!(requests[0].query_params.as_deref(), Some("page=2"));
    assert_eq!(requests[0].user_id, None);

    Ok(())
}

/// Tests the caller's correlation id is echoed and stored.
///
/// Expected: response header equals the sent id, and so does the stored row
#[tokio::test]
async fn echoes_correlation_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let response = app(with_threshold(db, 60_000), 0)
        .oneshot(
            Request::builder()
                .uri("/api/v1/books")
                .header(&CORRELATION_ID_HEADER, "trace-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(&CORRELATION_ID_HEADER).unwrap(),
        "trace-123"
    );

    let requests = entity::prelude::ApiRequestLog::find().all(db).await?;
    assert_eq!(requests[0].correlation_id, "trace-123");

    Ok(())
}

/// Tests health checks are not logged.
///
/// Expected: zero api request rows
#[tokio::test]
async fn skips_health_checks() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_log_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    app(with_threshold(db, 0), 0)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(entity::prelude::ApiRequestLog::find().count(db).await?, 0);
    assert_eq!(entity::prelude::PerformanceLog::find().count(db).await?, 0);

    Ok(())
}
