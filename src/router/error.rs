use std::fmt;

use http::Method;

/// Route registration error
///
/// Every variant is a programming or configuration mistake. `Router::route`
/// and the per-method shortcuts turn these into panics at startup; the
/// `try_*` variants hand them back for callers that load routes from files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Pattern is empty or does not begin with `/`
    InvalidPattern {
        /// The rejected pattern
        pattern: String,
    },
    /// No handler is bound to the referenced name
    MissingHandler {
        /// Handler name looked up in the registry
        name: String,
    },
    /// No middleware is bound to the referenced name
    UnknownMiddleware {
        /// Middleware name looked up in the registry
        name: String,
    },
    /// Method string is not a valid HTTP method token
    InvalidMethod {
        /// The rejected method string
        method: String,
    },
    /// The exact `(method, pattern)` pair is already registered
    Conflict {
        /// Method of the existing route
        method: Method,
        /// Pattern of the existing route
        pattern: String,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::InvalidPattern { pattern } => {
                write!(f, "pattern must start with /: {:?}", pattern)
            }
            RouteError::MissingHandler { name } => {
                write!(f, "handler can't be empty: no handler registered as {:?}", name)
            }
            RouteError::UnknownMiddleware { name } => {
                write!(f, "no middleware registered as {:?}", name)
            }
            RouteError::InvalidMethod { method } => {
                write!(f, "invalid HTTP method: {:?}", method)
            }
            RouteError::Conflict { method, pattern } => {
                write!(f, "ambiguous mapping: {} {}", method, pattern)
            }
        }
    }
}

impl std::error::Error for RouteError {}
