//! Request handler module
//!
//! Every GET request, whatever its path, query or headers, gets the same
//! JSON payload. Any other method gets 501.

pub mod payload;

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

pub use payload::HelloPayload;

/// Main entry point for HTTP request handling
#[allow(clippy::unused_async)]
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let response = respond(req.method());

    if state.access_log_enabled() {
        log_access(&req, &response, peer_addr, started, &state);
    }

    Ok(response)
}

/// Build the response for a request method
pub fn respond(method: &Method) -> Response<Full<Bytes>> {
    if method == Method::GET {
        http::json_response(StatusCode::OK, &HelloPayload::new())
    } else {
        logger::log_warning(&format!("Unsupported method: {method}"));
        http::build_501_response(method)
    }
}

fn log_access<B>(
    req: &Request<B>,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.to_string(),
        req.method(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.set_version(req.version());
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;

    const EXPECTED_BODY: &[u8] = br#"{"message": "Hello, World!", "status": "ok"}"#;

    fn test_state(access_log: bool) -> Arc<AppState> {
        let mut cfg = Config::load_from("does-not-exist/server").unwrap();
        cfg.logging.access_log = access_log;
        Arc::new(AppState::new(cfg))
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_get_any_path_returns_payload() {
        for uri in ["/", "/anything/goes", "/search?q=rust&page=2", "/%20weird"] {
            let req = Request::get(uri)
                .header("X-Custom", "ignored")
                .body(())
                .unwrap();
            let resp = handle_request(req, test_state(false), peer()).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "uri {uri}");
            assert_eq!(resp.headers()["content-type"], "application/json");
            assert_eq!(&body_of(resp).await[..], EXPECTED_BODY, "uri {uri}");
        }
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let state = test_state(false);
        let mut bodies = Vec::new();
        for _ in 0..5 {
            let req = Request::get("/").body(()).unwrap();
            let resp = handle_request(req, Arc::clone(&state), peer()).await.unwrap();
            bodies.push(body_of(resp).await);
        }
        assert!(bodies.windows(2).all(|w| w[0] == w[1]));
    }

    #[tokio::test]
    async fn test_other_methods_not_implemented() {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::HEAD] {
            let req = Request::builder()
                .method(method.clone())
                .uri("/")
                .body(())
                .unwrap();
            let resp = handle_request(req, test_state(false), peer()).await.unwrap();
            assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED, "method {method}");
        }
    }

    #[tokio::test]
    async fn test_access_log_does_not_change_response() {
        let req = Request::get("/logged?x=1")
            .header("User-Agent", "test-agent")
            .body(())
            .unwrap();
        let resp = handle_request(req, test_state(true), peer()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(&body_of(resp).await[..], EXPECTED_BODY);
    }
}
