use std::time::Instant;

use tracing::{info, info_span};

use super::Middleware;
use crate::handler::Handler;
use crate::server::{Request, ResponseWriter};

/// Opens a `request` span around the rest of the chain and logs the outcome.
///
/// Place it first in a route's middleware list so the span also covers the
/// auth gates and the recovery boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceRequests;

impl Middleware for TraceRequests {
    fn handle(&self, w: &mut dyn ResponseWriter, req: &Request, next: &Handler) {
        let span = info_span!(
            "request",
            request_id = %req.request_id,
            method = %req.method,
            path = %req.path,
        );
        let _guard = span.enter();
        let start = Instant::now();

        next(&mut *w, req);

        info!(
            status = w.status().map(|s| s.as_u16()),
            latency_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
            "Request complete"
        );
    }
}
