use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use test_utils::{builder::TestBuilder, factory};
use tower::ServiceExt;

use crate::server::{
    model::user::User, router::router, service::token::TokenService, state::AppState,
};

mod book;
mod favorite;
mod health;
mod log;

fn app(db: &DatabaseConnection) -> Router {
    router(AppState::for_test(db.clone()))
}

/// Signs an access token with the secret `AppState::for_test` uses.
fn token_for(user: &entity::user::Model) -> String {
    TokenService::new("test-secret-key")
        .create_access_token(&User::from_entity(user.clone()), 30)
        .unwrap()
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends a request through the full router and decodes any JSON body.
async fn send(db: &DatabaseConnection, request: Request<Body>) -> (StatusCode, Value) {
    let response = app(db).oneshot(request).await.unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
