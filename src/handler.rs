//! The handler contract shared by business handlers, middleware chains and
//! the not-found fallback.

use std::sync::Arc;

use crate::server::{Request, ResponseWriter};

/// A request handler: writes a response for a request.
///
/// Composed chains have the same type as the terminal handler they wrap, so
/// the route table never needs to know whether middleware is involved.
pub type Handler = Arc<dyn Fn(&mut dyn ResponseWriter, &Request) + Send + Sync>;

/// Box a closure or function as a [`Handler`].
///
/// ```rust
/// use exactmux::handler::handler_fn;
/// use http::StatusCode;
///
/// let hello = handler_fn(|w, _req| w.write(StatusCode::OK, "hello"));
/// ```
pub fn handler_fn<F>(f: F) -> Handler
where
    F: Fn(&mut dyn ResponseWriter, &Request) + Send + Sync + 'static,
{
    Arc::new(f)
}
