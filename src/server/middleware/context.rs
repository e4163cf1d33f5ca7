//! Per-request context shared between the request logger and the auth extractors.
//!
//! The request logger inserts an empty `RequestContext` into the request extensions
//! before running the handler. When an auth extractor accepts a token it records the
//! identity there, so the api request log can attribute the request after the handler
//! returns.

use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, OnceLock},
};

use axum::{
    extract::{ConnectInfo, FromRequestParts, OriginalUri},
    http::request::Parts,
};

use crate::server::{
    model::log::ClientInfo,
    util::ip::{client_ip, user_agent},
};

/// Authenticated caller attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RequestContext(Arc<OnceLock<Identity>>);

impl RequestContext {
    /// Records the caller. Only the first identity set on a request is kept.
    pub fn set_identity(&self, identity: Identity) {
        let _ = self.0.set(identity);
    }

    pub fn identity(&self) -> Option<Identity> {
        self.0.get().copied()
    }
}

impl ClientInfo {
    /// Collects caller metadata from request parts.
    pub fn from_parts(parts: &Parts) -> Self {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map(|OriginalUri(uri)| uri.path().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        Self {
            ip_address: client_ip(&parts.headers, peer),
            user_agent: user_agent(&parts.headers),
            path: Some(path),
        }
    }
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientInfo::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn first_identity_wins() {
        let context = RequestContext::default();
        let shared = context.clone();

        shared.set_identity(Identity {
            user_id: 7,
            is_admin: true,
        });
        shared.set_identity(Identity {
            user_id: 8,
            is_admin: false,
        });

        assert_eq!(
            context.identity(),
            Some(Identity {
                user_id: 7,
                is_admin: true
            })
        );
    }

    #[test]
    fn client_info_reads_headers_and_path() {
        let (parts, _) = Request::builder()
            .uri("/api/v1/books?page=2")
            .header("x-real-ip", "198.51.100.4")
            .header("user-agent", "reader/1.0")
            .body(())
            .unwrap()
            .into_parts();

        let client = ClientInfo::from_parts(&parts);

        assert_eq!(client.ip_address.as_deref(), Some("198.51.100.4"));
        assert_eq!(client.user_agent.as_deref(), Some("reader/1.0"));
        assert_eq!(client.path.as_deref(), Some("/api/v1/books"));
    }
}
