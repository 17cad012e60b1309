//! # exactmux
//!
//! **exactmux** is a small HTTP request multiplexer with exact and weighted
//! prefix matching, per-route middleware chains and a set of stock
//! authentication, authorization and panic-recovery middleware.
//!
//! ## Overview
//!
//! Routes are registered per HTTP method as `(pattern, handler, middleware)`.
//! A request path is resolved in two steps:
//!
//! 1. **Exact match** - a pattern equal to the path always wins.
//! 2. **Prefix match** - otherwise the pattern with the highest
//!    [`weight`](router::weight) that is a plain string prefix of the path
//!    wins. A pattern's weight grows with its depth, and a trailing `/`
//!    weighs one less than the same pattern without it.
//!
//! When nothing matches, the optional not-found handler runs instead. It
//! never runs in addition to a matched handler.
//!
//! ## Architecture
//!
//! - **[`router`]** - the route table and the [`Router`] front end
//! - **[`middleware`]** - the [`Middleware`] trait, composition and stock middleware
//! - **[`security`]** - identity plumbing consumed by the auth middleware
//! - **[`server`]** - framework-neutral [`Request`] and response types
//! - **[`config`]** / **[`registry`]** - declarative routing bound by name
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - the `exactmux` inspection binary
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use exactmux::middleware::{Middleware, Recoverer};
//! use exactmux::{handler_fn, Request, Router};
//! use http::{Method, StatusCode};
//!
//! let router = Router::new().with_not_found(handler_fn(|w, _| w.error(StatusCode::NOT_FOUND)));
//! let recoverer: Arc<dyn Middleware> = Arc::new(Recoverer::new());
//!
//! router.get("/", handler_fn(|w, _| w.write(StatusCode::OK, "home")), &[]);
//! router.get(
//!     "/users",
//!     handler_fn(|w, req| w.write(StatusCode::OK, &format!("users at {}", req.path))),
//!     &[recoverer],
//! );
//!
//! let res = router.dispatch(&Request::new(Method::GET, "/users/42"));
//! assert_eq!(res.body(), "users at /users/42");
//!
//! let res = router.dispatch(&Request::new(Method::POST, "/users"));
//! assert_eq!(res.status(), Some(StatusCode::NOT_FOUND));
//! ```

pub mod cli;
pub mod config;
pub mod echo;
pub mod handler;
pub mod logging;
pub mod middleware;
pub mod registry;
pub mod router;
pub mod security;
pub mod server;

pub use handler::{handler_fn, Handler};
pub use middleware::{compose, Middleware};
pub use router::{weight, MatchKind, RouteError, RouteMatch, Router};
pub use server::{HandlerResponse, Request, RequestId, ResponseWriter};
