//! # Router Module
//!
//! Exact-plus-prefix request routing.
//!
//! ## Overview
//!
//! Routes are registered per HTTP method under a pattern beginning with `/`.
//! Resolving a request runs in two steps:
//!
//! 1. **Exact lookup**: if the path equals a registered pattern, that route
//!    wins, whatever its weight.
//! 2. **Prefix scan**: otherwise routes are tried in descending
//!    [`weight`] order and the first pattern that is a string prefix of the
//!    path wins.
//!
//! There are no path parameters and no regexes. Prefix tests are on raw
//! strings, so `/use` matches `/user/1`; register `/use/` if segment
//! boundaries matter.
//!
//! ## Example
//!
//! ```rust
//! use exactmux::handler::handler_fn;
//! use exactmux::router::{MatchKind, Router};
//! use http::{Method, StatusCode};
//!
//! let router = Router::new();
//! router.get("/", handler_fn(|w, _| w.write(StatusCode::OK, "root")), &[]);
//! router.get("/users", handler_fn(|w, _| w.write(StatusCode::OK, "users")), &[]);
//!
//! let found = router.resolve(&Method::GET, "/users/42").unwrap();
//! assert_eq!(&*found.pattern, "/users");
//! assert_eq!(found.kind, MatchKind::Prefix);
//! ```
//!
//! ## Errors
//!
//! Registration problems (bad pattern, duplicate route, unknown handler
//! name) are [`RouteError`]s. The `try_*` methods return them; the plain
//! registration methods panic, since they indicate a broken program rather
//! than a runtime condition.

mod core;
mod error;
mod table;
mod weight;

pub use self::core::Router;
pub use error::RouteError;
pub use table::{MatchKind, RouteEntry, RouteMatch, RouteTable};
pub use weight::weight;
