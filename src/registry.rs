//! Named handlers and middleware.
//!
//! Configuration refers to code by name; the registry is where those names
//! are bound. A route naming a handler that was never registered fails to
//! load with [`RouteError::MissingHandler`].

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AuthConfig;
use crate::handler::Handler;
use crate::middleware::{
    Authenticated, Authorized, Middleware, MiddlewareConfigError, Recoverer, TraceRequests,
    Unauthenticated,
};
use crate::router::RouteError;
use crate::security::{AuthPredicate, ClaimsExtractor};

/// Name bound to [`Recoverer`] by [`Registry::with_builtin_middleware`].
pub const RECOVERER: &str = "recoverer";
/// Name bound to [`TraceRequests`].
pub const TRACE: &str = "trace";
/// Name bound to [`Authenticated`].
pub const AUTHENTICATED: &str = "authenticated";
/// Name bound to [`Unauthenticated`].
pub const UNAUTHENTICATED: &str = "unauthenticated";

#[derive(Clone, Default)]
pub struct Registry {
    handlers: HashMap<String, Handler>,
    middlewares: HashMap<String, Arc<dyn Middleware>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the stock middleware.
    ///
    /// Binds [`RECOVERER`], [`TRACE`], [`AUTHENTICATED`] and
    /// [`UNAUTHENTICATED`] (redirecting when `auth.redirect_url` is set), plus
    /// one [`Authorized`] gate per entry of `auth.role_gates`.
    ///
    /// # Errors
    ///
    /// Returns a [`MiddlewareConfigError`] if the redirect URL is invalid or a
    /// role gate lists no roles.
    pub fn with_builtin_middleware(
        is_authenticated: AuthPredicate,
        claims: ClaimsExtractor,
        auth: &AuthConfig,
    ) -> Result<Self, MiddlewareConfigError> {
        let mut registry = Self::new();
        registry.register_middleware(RECOVERER, Arc::new(Recoverer::new()));
        registry.register_middleware(TRACE, Arc::new(TraceRequests));
        registry.register_middleware(
            AUTHENTICATED,
            Arc::new(Authenticated::new(Arc::clone(&is_authenticated))),
        );

        let unauthenticated = match &auth.redirect_url {
            Some(url) => Unauthenticated::redirecting(Arc::clone(&is_authenticated), url)?,
            None => Unauthenticated::new(Arc::clone(&is_authenticated)),
        };
        registry.register_middleware(UNAUTHENTICATED, Arc::new(unauthenticated));

        for (name, roles) in &auth.role_gates {
            let gate = Authorized::new(roles.iter().cloned(), Arc::clone(&claims))?;
            registry.register_middleware(name, Arc::new(gate));
        }

        Ok(registry)
    }

    /// Bind `name` to a handler, replacing any previous binding.
    pub fn register_handler(&mut self, name: &str, handler: Handler) -> &mut Self {
        if self.handlers.insert(name.to_string(), handler).is_some() {
            warn!(handler_name = %name, "Replaced existing handler binding");
        } else {
            debug!(handler_name = %name, "Handler bound");
        }
        self
    }

    /// Bind `name` to a middleware, replacing any previous binding.
    pub fn register_middleware(&mut self, name: &str, middleware: Arc<dyn Middleware>) -> &mut Self {
        if self.middlewares.insert(name.to_string(), middleware).is_some() {
            warn!(middleware_name = %name, "Replaced existing middleware binding");
        } else {
            debug!(middleware_name = %name, "Middleware bound");
        }
        self
    }

    /// # Errors
    ///
    /// Returns [`RouteError::MissingHandler`] if nothing is bound to `name`.
    pub fn handler(&self, name: &str) -> Result<Handler, RouteError> {
        self.handlers
            .get(name)
            .cloned()
            .ok_or_else(|| RouteError::MissingHandler {
                name: name.to_string(),
            })
    }

    /// # Errors
    ///
    /// Returns [`RouteError::UnknownMiddleware`] if nothing is bound to `name`.
    pub fn middleware(&self, name: &str) -> Result<Arc<dyn Middleware>, RouteError> {
        self.middlewares
            .get(name)
            .cloned()
            .ok_or_else(|| RouteError::UnknownMiddleware {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn has_handler(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}
