use std::fmt::{Display, Formatter};
use std::str::FromStr;

use http::{Extensions, HeaderMap, HeaderName, HeaderValue, Method};

/// Header carrying a caller-supplied request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request identifier backed by ULID, used to correlate log lines.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(pub ulid::Ulid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Reuse the id from a header value when it parses, otherwise mint one.
    #[must_use]
    pub fn from_header_or_new(header_value: Option<&str>) -> Self {
        header_value
            .and_then(|s| s.parse::<RequestId>().ok())
            .unwrap_or_default()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s).map(RequestId)
    }
}

/// Request descriptor handed to handlers and middleware.
///
/// The router only looks at `method` and `path`. `context` is an opaque
/// type map that upstream collaborators (session lookup, token parsing)
/// fill before dispatch; the auth gates read it through the predicates and
/// extractors they were configured with.
#[derive(Debug, Clone)]
pub struct Request {
    /// Correlation id, taken from `x-request-id` when present
    pub request_id: RequestId,
    /// HTTP method
    pub method: Method,
    /// Request path without query string
    pub path: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Request-scoped values (claims, session markers, ...)
    pub context: Extensions,
}

impl Request {
    /// Create a request with empty headers and context.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            context: Extensions::new(),
        }
    }

    /// Build a descriptor from an `http::Request`, copying headers and extensions.
    ///
    /// The query string is dropped; routing only ever sees the path.
    #[must_use]
    pub fn from_http<B>(req: &http::Request<B>) -> Self {
        let headers = req.headers().clone();
        let request_id = RequestId::from_header_or_new(
            headers
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok()),
        );
        Self {
            request_id,
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            headers,
            context: req.extensions().clone(),
        }
    }

    /// Attach a request-scoped value to the context.
    #[must_use]
    pub fn with_context<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.context.insert(value);
        self
    }

    /// Add a header, replacing any previous value.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Get a header value as text (case-insensitive lookup).
    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Borrow the request context.
    #[inline]
    #[must_use]
    pub fn context(&self) -> &Extensions {
        &self.context
    }
}
