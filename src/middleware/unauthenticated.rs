use http::{HeaderValue, StatusCode};
use tracing::debug;

use super::{Middleware, MiddlewareConfigError};
use crate::handler::Handler;
use crate::security::AuthPredicate;
use crate::server::{Request, ResponseWriter};

/// Lets only anonymous callers through, e.g. for login and sign-up pages.
///
/// An authenticated caller is either sent to the configured redirect target
/// with `307 Temporary Redirect`, or refused with `401 Unauthorized` when no
/// target is configured.
#[derive(Clone)]
pub struct Unauthenticated {
    is_authenticated: AuthPredicate,
    redirect_to: Option<HeaderValue>,
}

impl Unauthenticated {
    /// Refuse authenticated callers with 401.
    #[must_use]
    pub fn new(is_authenticated: AuthPredicate) -> Self {
        Self {
            is_authenticated,
            redirect_to: None,
        }
    }

    /// Redirect authenticated callers to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`MiddlewareConfigError::InvalidRedirectUrl`] if `url` cannot be
    /// used as a `Location` header value.
    pub fn redirecting(
        is_authenticated: AuthPredicate,
        url: &str,
    ) -> Result<Self, MiddlewareConfigError> {
        Self::with_options(is_authenticated, true, url)
    }

    /// Flag-style constructor: `redirect` selects between the two behaviors
    /// and `redirect_url` is only validated when it will be used.
    ///
    /// # Errors
    ///
    /// Returns [`MiddlewareConfigError::InvalidRedirectUrl`] if `redirect` is set
    /// and `redirect_url` is not a valid header value.
    pub fn with_options(
        is_authenticated: AuthPredicate,
        redirect: bool,
        redirect_url: &str,
    ) -> Result<Self, MiddlewareConfigError> {
        let redirect_to = if redirect {
            let value = HeaderValue::from_str(redirect_url).map_err(|_| {
                MiddlewareConfigError::InvalidRedirectUrl {
                    url: redirect_url.to_string(),
                }
            })?;
            Some(value)
        } else {
            None
        };

        Ok(Self {
            is_authenticated,
            redirect_to,
        })
    }
}

impl Middleware for Unauthenticated {
    fn handle(&self, w: &mut dyn ResponseWriter, req: &Request, next: &Handler) {
        if !(self.is_authenticated)(req.context()) {
            next(w, req);
            return;
        }

        match &self.redirect_to {
            Some(location) => {
                debug!(
                    request_id = %req.request_id,
                    path = %req.path,
                    location = ?location,
                    "Redirecting authenticated caller away from anonymous-only route"
                );
                w.redirect(location, StatusCode::TEMPORARY_REDIRECT);
            }
            None => {
                debug!(
                    request_id = %req.request_id,
                    path = %req.path,
                    "Rejected authenticated caller on anonymous-only route"
                );
                w.error(StatusCode::UNAUTHORIZED);
            }
        }
    }
}
