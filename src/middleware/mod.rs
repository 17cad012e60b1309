//! # Middleware
//!
//! Decorators composed around a route's handler at registration time.
//!
//! A route registered with `[a, b]` runs `a` first; each middleware decides
//! whether to call the rest of the chain. The policies shipped here are all
//! immutable value objects, so a middleware's behavior is fixed by the
//! arguments it was built with:
//!
//! | middleware          | passes when                         | otherwise            |
//! |---------------------|-------------------------------------|----------------------|
//! | [`Authenticated`]   | predicate is true                   | 401                  |
//! | [`Unauthenticated`] | predicate is false                  | 307 redirect or 401  |
//! | [`Authorized`]      | caller holds one of the roles       | 403                  |
//! | [`Recoverer`]       | always (catches panics below it)    | 500 on panic         |
//! | [`TraceRequests`]   | always (span + completion log)      |                      |
//!
//! ```rust
//! use exactmux::handler::handler_fn;
//! use exactmux::middleware::{compose, Authenticated, Middleware, Recoverer};
//! use exactmux::security::{context_contains, TokenPayload};
//! use http::StatusCode;
//! use std::sync::Arc;
//!
//! let chain: Vec<Arc<dyn Middleware>> = vec![
//!     Arc::new(Recoverer::new()),
//!     Arc::new(Authenticated::new(context_contains::<Arc<TokenPayload>>())),
//! ];
//! let handler = compose(handler_fn(|w, _req| w.write(StatusCode::OK, "secret")), &chain);
//! ```

mod authenticated;
mod authorized;
mod core;
mod error;
mod recoverer;
mod tracing;
mod unauthenticated;

pub use self::core::{compose, Middleware};
pub use authenticated::Authenticated;
pub use authorized::Authorized;
pub use error::MiddlewareConfigError;
pub use recoverer::Recoverer;
pub use self::tracing::TraceRequests;
pub use unauthenticated::Unauthenticated;
