use http::StatusCode;
use tracing::{debug, warn};

use super::{Middleware, MiddlewareConfigError};
use crate::handler::Handler;
use crate::security::ClaimsExtractor;
use crate::server::{Request, ResponseWriter};

/// Role-based access gate.
///
/// Access is granted when the caller holds at least one of the required
/// roles. Callers without claims, or without a matching role, get
/// `403 Forbidden`.
#[derive(Clone)]
pub struct Authorized {
    required_roles: Vec<String>,
    claims: ClaimsExtractor,
}

impl Authorized {
    /// # Errors
    ///
    /// Returns [`MiddlewareConfigError::NoRequiredRoles`] if `roles` is empty;
    /// such a gate could never grant access.
    pub fn new<I, S>(roles: I, claims: ClaimsExtractor) -> Result<Self, MiddlewareConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let required_roles: Vec<String> = roles.into_iter().map(Into::into).collect();
        if required_roles.is_empty() {
            return Err(MiddlewareConfigError::NoRequiredRoles);
        }
        Ok(Self {
            required_roles,
            claims,
        })
    }

    #[must_use]
    pub fn required_roles(&self) -> &[String] {
        &self.required_roles
    }
}

impl Middleware for Authorized {
    fn handle(&self, w: &mut dyn ResponseWriter, req: &Request, next: &Handler) {
        let Some(claims) = (self.claims)(req.context()) else {
            warn!(
                request_id = %req.request_id,
                path = %req.path,
                required_roles = ?self.required_roles,
                "No claims in request context - access denied"
            );
            w.error(StatusCode::FORBIDDEN);
            return;
        };

        let granted = self
            .required_roles
            .iter()
            .find(|required| claims.roles().contains(required));

        match granted {
            Some(role) => {
                debug!(
                    request_id = %req.request_id,
                    path = %req.path,
                    role = %role,
                    "Access granted"
                );
                next(w, req);
            }
            None => {
                debug!(
                    request_id = %req.request_id,
                    path = %req.path,
                    required_roles = ?self.required_roles,
                    held_roles = ?claims.roles(),
                    "Access denied"
                );
                w.error(StatusCode::FORBIDDEN);
            }
        }
    }
}
