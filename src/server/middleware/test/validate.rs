use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::post,
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::{model::auth::LoginDto, server::middleware::validate::ValidatedJson};

fn app() -> Router {
    Router::new().route(
        "/login",
        post(|ValidatedJson(dto): ValidatedJson<LoginDto>| async move { dto.username }),
    )
}

async fn send(body: &'static str) -> (StatusCode, serde_json::Value) {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

#[tokio::test]
async fn accepts_valid_body() {
    let (status, _) = send(r#"{"username":"ada","password":"secret"}"#).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_field_is_unprocessable() {
    let (status, json) = send(r#"{"username":"ada"}"#).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["errors"][0]["field"], "body");
}

#[tokio::test]
async fn failed_rule_names_the_field() {
    let (status, json) = send(r#"{"username":"","password":"secret"}"#).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["errors"][0]["field"], "username");
    assert_eq!(json["errors"][0]["message"], "must not be empty");
}
