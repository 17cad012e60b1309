use http::header::{CONTENT_TYPE, LOCATION, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use tracing::warn;

/// Response sink handed to handlers and middleware.
///
/// Implementors only need `set_header` and `write`; plain-text errors and
/// redirects are built on top of them.
pub trait ResponseWriter {
    /// Set a response header, replacing previous values.
    fn set_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Write a status code and a chunk of body text.
    fn write(&mut self, status: StatusCode, body: &str);

    /// Status written so far, when the sink keeps track of it.
    fn status(&self) -> Option<StatusCode> {
        None
    }

    /// Reply with the canonical reason phrase of `status` as plain text.
    fn error(&mut self, status: StatusCode) {
        self.set_header(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.set_header(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        let reason = status.canonical_reason().unwrap_or("");
        self.write(status, &format!("{reason}\n"));
    }

    /// Redirect to `location` with the given 3xx status.
    fn redirect(&mut self, location: &HeaderValue, status: StatusCode) {
        self.set_header(LOCATION, location.clone());
        self.write(status, "");
    }
}

/// Buffered response, the default sink used by `Router::dispatch`.
///
/// The first status written wins; later writes only append body text. A
/// response nobody wrote to stays `is_written() == false`, which is how the
/// silent no-match outcome is observed.
#[derive(Debug, Clone, Default)]
pub struct HandlerResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: String,
}

impl HandlerResponse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status written so far, if any
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a header by name as text
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Whether any handler or middleware produced output
    #[must_use]
    pub fn is_written(&self) -> bool {
        self.status.is_some()
    }

    /// Replay this response into another writer.
    ///
    /// Headers are copied first, then the status and body are written. A
    /// response nobody wrote to only copies its headers.
    pub fn replay_into(self, w: &mut dyn ResponseWriter) {
        for (name, value) in &self.headers {
            w.set_header(name.clone(), value.clone());
        }
        if let Some(status) = self.status {
            w.write(status, &self.body);
        }
    }

    /// Convert into an `http::Response`.
    ///
    /// An unwritten response becomes an empty 200, the same thing a server
    /// sends when a handler returns without touching its writer.
    #[must_use]
    pub fn into_http(self) -> http::Response<String> {
        let mut res = http::Response::new(self.body);
        *res.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *res.headers_mut() = self.headers;
        res
    }
}

impl ResponseWriter for HandlerResponse {
    fn status(&self) -> Option<StatusCode> {
        self.status
    }

    fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        if self.status.is_some() {
            warn!(header = %name, "Header set after status was written - ignored");
            return;
        }
        self.headers.insert(name, value);
    }

    fn write(&mut self, status: StatusCode, body: &str) {
        match self.status {
            None => self.status = Some(status),
            Some(existing) if existing != status => {
                warn!(
                    status = existing.as_u16(),
                    superfluous = status.as_u16(),
                    "Superfluous status write - keeping the first one"
                );
            }
            Some(_) => {}
        }
        self.body.push_str(body);
    }
}
