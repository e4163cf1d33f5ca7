//! Per-request api and performance logging.
//!
//! Runs outside every handler. One api request log row is written per request; a
//! performance row is added when the request took strictly longer than the configured
//! slow request threshold.

use std::{net::SocketAddr, time::Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
};

use crate::server::{
    middleware::context::RequestContext,
    model::log::{ApiRequestLogParams, PerformanceLogParams},
    service::log::LogService,
    state::AppState,
    util::{
        ip::{client_ip, user_agent},
        random::random_token,
    },
};

pub static CORRELATION_ID_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

/// Paths that are never logged.
const SKIPPED_PATHS: &[&str] = &["/health", "/api/v1/openapi.json"];

/// Whether a request of `elapsed_ms` is slow enough for a performance log.
pub fn is_slow(elapsed_ms: u128, threshold_ms: u64) -> bool {
    elapsed_ms > threshold_ms as u128
}

pub async fn request_log(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if method == Method::OPTIONS || SKIPPED_PATHS.contains(&path.as_str()) {
        return next.run(request).await;
    }

    let correlation_id = request
        .headers()
        .get(&CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(|| random_token(32));
    let query_params = request.uri().query().map(str::to_string);
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client_ip = client_ip(request.headers(), peer);
    let user_agent = user_agent(request.headers());

    let context = RequestContext::default();
    request.extensions_mut().insert(context.clone());

    let started = Instant::now();
    let mut response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis();

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response
            .headers_mut()
            .insert(CORRELATION_ID_HEADER.clone(), value);
    }

    let identity = context.identity();
    let user_id = identity.map(|i| i.user_id);
    let admin_id = identity.filter(|i| i.is_admin).map(|i| i.user_id);
    let status = response.status().as_u16();

    tracing::debug!(
        "{} {} -> {} in {}ms [{}]",
        method,
        path,
        status,
        elapsed_ms,
        correlation_id
    );

    let log = LogService::new(&state.db);
    log.record_api_request(ApiRequestLogParams {
        endpoint: path.clone(),
        method: method.to_string(),
        status_code: status as i32,
        duration_ms: elapsed_ms as i64,
        user_id,
        admin_id,
        client_ip,
        user_agent,
        correlation_id: correlation_id.clone(),
        query_params,
    })
    .await;

    if is_slow(elapsed_ms, state.config.slow_request_threshold_ms) {
        tracing::warn!("Slow request {} {} took {}ms", method, path, elapsed_ms);

        log.record_performance(PerformanceLogParams {
            component: "api".to_string(),
            operation: format!("{} {}", method, path),
            duration_ms: elapsed_ms as i64,
            endpoint: Some(path),
            user_id,
            admin_id,
            details: Some(serde_json::json!({
                "status_code": status,
                "correlation_id": correlation_id,
                "threshold_ms": state.config.slow_request_threshold_ms,
            })),
        })
        .await;
    }

    response
}
