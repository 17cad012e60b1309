use http::header::CONTENT_TYPE;
use http::{HeaderValue, StatusCode};
use serde_json::json;

use crate::handler::{handler_fn, Handler};

/// Handler that echoes the request back as JSON, tagged with `name`.
///
/// Used by the CLI to make every configured route dispatchable without the
/// real business handlers.
#[must_use]
pub fn echo_handler(name: &str) -> Handler {
    let name = name.to_string();
    handler_fn(move |w, req| {
        let body = json!({
            "handler": name,
            "method": req.method.as_str(),
            "path": req.path,
            "request_id": req.request_id.to_string(),
        });
        w.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        w.write(StatusCode::OK, &body.to_string());
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{HandlerResponse, Request};
    use http::Method;

    #[test]
    fn test_echo_reports_handler_and_path() {
        let handler = echo_handler("list_users");
        let mut res = HandlerResponse::new();
        handler(&mut res, &Request::new(Method::GET, "/users/7"));

        assert_eq!(res.status(), Some(StatusCode::OK));
        assert_eq!(res.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(res.body()).unwrap();
        assert_eq!(body["handler"], "list_users");
        assert_eq!(body["method"], "GET");
        assert_eq!(body["path"], "/users/7");
    }
}
