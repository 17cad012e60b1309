//! Router core - registration and dispatch.

use std::sync::Arc;

use http::Method;
use parking_lot::RwLock;
use tracing::{debug, error, info};

use super::error::RouteError;
use super::table::{RouteMatch, RouteTable};
use crate::config::RouterConfig;
use crate::handler::Handler;
use crate::middleware::{compose, Middleware};
use crate::registry::Registry;
use crate::server::{HandlerResponse, Request, ResponseWriter};

/// Maps `(method, path)` to a composed handler.
///
/// Routes are registered through `&self`, so a router can be shared behind
/// an `Arc` and still accept registrations; registration takes the write
/// side of the table lock, resolution the read side. Handlers run after the
/// lock is released.
#[derive(Default)]
pub struct Router {
    table: RwLock<RouteTable>,
    not_found: Option<Handler>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a router from configuration, binding names through `registry`.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouteError`] hit while loading, see [`Router::load`].
    pub fn from_config(config: &RouterConfig, registry: &Registry) -> Result<Self, RouteError> {
        let mut router = Router::new();
        if let Some(name) = &config.not_found {
            router.set_not_found(registry.handler(name)?);
        }
        router.load(config, registry)?;

        info!(
            routes_count = router.len(),
            not_found = config.not_found.as_deref().unwrap_or("<none>"),
            "Routing table loaded from configuration"
        );
        Ok(router)
    }

    /// Register every route declared in `config`.
    ///
    /// The `not_found` setting is ignored here; it can only be set before the
    /// router is shared, see [`Router::from_config`]. Routes loaded before an
    /// error stay registered.
    ///
    /// # Errors
    ///
    /// Unknown handler or middleware names, invalid methods or patterns, and
    /// duplicate routes.
    pub fn load(&self, config: &RouterConfig, registry: &Registry) -> Result<(), RouteError> {
        for route in &config.routes {
            let middlewares = route
                .middleware
                .iter()
                .map(|name| registry.middleware(name))
                .collect::<Result<Vec<_>, _>>()?;
            let handler = registry.handler(&route.handler)?;
            self.try_route_str(&route.method, &route.pattern, handler, &middlewares)?;
        }
        Ok(())
    }

    /// Set the handler used when no route matches.
    #[must_use]
    pub fn with_not_found(mut self, handler: Handler) -> Self {
        self.set_not_found(handler);
        self
    }

    pub fn set_not_found(&mut self, handler: Handler) {
        self.not_found = Some(handler);
    }

    /// Register `handler` wrapped in `middlewares` (first listed runs first).
    ///
    /// # Errors
    ///
    /// - [`RouteError::InvalidPattern`] if `pattern` does not start with `/`
    /// - [`RouteError::Conflict`] if the exact `(method, pattern)` exists
    pub fn try_route(
        &self,
        method: Method,
        pattern: &str,
        handler: Handler,
        middlewares: &[Arc<dyn Middleware>],
    ) -> Result<(), RouteError> {
        let composed = compose(handler, middlewares);
        let weight = self.table.write().insert(method.clone(), pattern, composed)?;

        info!(
            method = %method,
            pattern = %pattern,
            weight = weight,
            middleware_count = middlewares.len(),
            "Route registered"
        );
        Ok(())
    }

    /// Like [`Router::try_route`] with the method given as text.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidMethod`] if `method` is not a valid HTTP
    /// method token, plus everything [`Router::try_route`] returns.
    pub fn try_route_str(
        &self,
        method: &str,
        pattern: &str,
        handler: Handler,
        middlewares: &[Arc<dyn Middleware>],
    ) -> Result<(), RouteError> {
        let method = Method::from_bytes(method.as_bytes()).map_err(|_| RouteError::InvalidMethod {
            method: method.to_string(),
        })?;
        self.try_route(method, pattern, handler, middlewares)
    }

    /// Register a route, panicking on configuration errors.
    ///
    /// # Panics
    ///
    /// Panics if `pattern` does not start with `/` or the route is already
    /// registered. These are programming mistakes and must surface at startup.
    #[allow(clippy::panic)]
    pub fn route(
        &self,
        method: Method,
        pattern: &str,
        handler: Handler,
        middlewares: &[Arc<dyn Middleware>],
    ) {
        if let Err(err) = self.try_route(method, pattern, handler, middlewares) {
            error!(error = %err, "Route registration failed");
            panic!("{err}");
        }
    }

    /// Register a GET route. See [`Router::route`].
    pub fn get(&self, pattern: &str, handler: Handler, middlewares: &[Arc<dyn Middleware>]) {
        self.route(Method::GET, pattern, handler, middlewares);
    }

    /// Register a POST route. See [`Router::route`].
    pub fn post(&self, pattern: &str, handler: Handler, middlewares: &[Arc<dyn Middleware>]) {
        self.route(Method::POST, pattern, handler, middlewares);
    }

    /// Register a PUT route. See [`Router::route`].
    pub fn put(&self, pattern: &str, handler: Handler, middlewares: &[Arc<dyn Middleware>]) {
        self.route(Method::PUT, pattern, handler, middlewares);
    }

    /// Register a PATCH route. See [`Router::route`].
    pub fn patch(&self, pattern: &str, handler: Handler, middlewares: &[Arc<dyn Middleware>]) {
        self.route(Method::PATCH, pattern, handler, middlewares);
    }

    /// Register a DELETE route. See [`Router::route`].
    pub fn delete(&self, pattern: &str, handler: Handler, middlewares: &[Arc<dyn Middleware>]) {
        self.route(Method::DELETE, pattern, handler, middlewares);
    }

    /// Find the route for `method` and `path`.
    ///
    /// Exact matches win over prefix matches regardless of weight; among
    /// prefix matches the highest weight wins.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        let result = self.table.read().resolve(method, path);

        match &result {
            Some(found) => debug!(
                method = %method,
                path = %path,
                pattern = %found.pattern,
                kind = ?found.kind,
                weight = found.weight,
                "Route matched"
            ),
            None => debug!(method = %method, path = %path, "No route matched"),
        }
        result
    }

    /// Serve `req` into `w`.
    ///
    /// Exactly one of these happens: the matched handler runs once, the
    /// not-found handler runs once, or nothing is written when no not-found
    /// handler is configured.
    pub fn serve(&self, w: &mut dyn ResponseWriter, req: &Request) {
        match self.resolve(&req.method, &req.path) {
            Some(found) => (found.handler)(w, req),
            None => {
                if let Some(not_found) = &self.not_found {
                    not_found(w, req);
                }
            }
        }
    }

    /// Serve `req` into a fresh buffered response.
    #[must_use]
    pub fn dispatch(&self, req: &Request) -> HandlerResponse {
        let mut res = HandlerResponse::new();
        self.serve(&mut res, req);
        res
    }

    /// Patterns and weights registered for `method`, in prefix-scan order.
    #[must_use]
    pub fn routes(&self, method: &Method) -> Vec<(Arc<str>, usize)> {
        self.table.read().entries(method)
    }

    /// Methods with at least one route.
    #[must_use]
    pub fn methods(&self) -> Vec<Method> {
        self.table.read().methods()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn has_not_found(&self) -> bool {
        self.not_found.is_some()
    }
}
