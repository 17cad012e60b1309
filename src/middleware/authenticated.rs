use http::StatusCode;
use tracing::debug;

use super::Middleware;
use crate::handler::Handler;
use crate::security::AuthPredicate;
use crate::server::{Request, ResponseWriter};

/// Lets only authenticated callers through.
///
/// Anonymous requests get `401 Unauthorized` and never reach the inner
/// handler.
#[derive(Clone)]
pub struct Authenticated {
    is_authenticated: AuthPredicate,
}

impl Authenticated {
    #[must_use]
    pub fn new(is_authenticated: AuthPredicate) -> Self {
        Self { is_authenticated }
    }
}

impl Middleware for Authenticated {
    fn handle(&self, w: &mut dyn ResponseWriter, req: &Request, next: &Handler) {
        if !(self.is_authenticated)(req.context()) {
            debug!(
                request_id = %req.request_id,
                method = %req.method,
                path = %req.path,
                "Rejected anonymous request"
            );
            w.error(StatusCode::UNAUTHORIZED);
            return;
        }

        next(w, req);
    }
}
