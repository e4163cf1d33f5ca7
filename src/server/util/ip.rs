use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderMap;

/// Resolves the client address for log records.
///
/// Proxy headers win over the transport address: the first entry of
/// `X-Forwarded-For`, then `X-Real-IP`, then the socket peer when known.
///
/// # Arguments
/// - `headers` - Request headers
/// - `peer` - Socket address from `ConnectInfo`, absent in tests and custom services
///
/// # Returns
/// - `Some(String)` - Textual IP address
/// - `None` - No header or peer address was available
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            if let Ok(ip) = first.trim().parse::<IpAddr>() {
                return Some(ip.to_string());
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|value| value.to_str().ok()) {
        if let Ok(ip) = real_ip.trim().parse::<IpAddr>() {
            return Some(ip.to_string());
        }
    }

    peer.map(|addr| addr.ip().to_string())
}

/// Returns the `User-Agent` header when it is valid visible ASCII.
pub fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn prefers_first_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));

        assert_eq!(client_ip(&headers, None), Some("203.0.113.7".to_string()));
    }

    #[test]
    fn falls_back_to_real_ip_then_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("garbage"));
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.2"));
        assert_eq!(client_ip(&headers, None), Some("198.51.100.2".to_string()));

        let peer: SocketAddr = "192.0.2.1:4000".parse().unwrap();
        assert_eq!(
            client_ip(&HeaderMap::new(), Some(peer)),
            Some("192.0.2.1".to_string())
        );
        assert_eq!(client_ip(&HeaderMap::new(), None), None);
    }
}
