#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use exactmux::security::TokenPayload;
use exactmux::{handler_fn, Handler, Request};
use http::{Method, StatusCode};

/// Scoped subscriber writing through the test harness, so `tracing` output
/// shows up only for failing tests.
pub fn test_tracing() -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Handler writing 200 with `body`.
pub fn ok(body: &'static str) -> Handler {
    handler_fn(move |w, _| w.write(StatusCode::OK, body))
}

/// Handler that counts its invocations.
pub fn counting(body: &'static str) -> (Handler, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let handler = handler_fn(move |w, _| {
        seen.fetch_add(1, Ordering::SeqCst);
        w.write(StatusCode::OK, body);
    });
    (handler, calls)
}

pub fn get(path: &str) -> Request {
    Request::new(Method::GET, path)
}

/// Request carrying a token payload with `roles`.
pub fn signed_in(path: &str, roles: &[&str]) -> Request {
    get(path).with_context(Arc::new(TokenPayload {
        id: 7,
        exp: i64::MAX,
        roles: roles.iter().map(|r| (*r).to_string()).collect(),
    }))
}
