use std::io::Write;

use exactmux::config::{LogFormat, RouterConfig};
use exactmux::registry::Registry;
use exactmux::{handler_fn, RouteError, Router};
use http::StatusCode;
use tempfile::NamedTempFile;

mod common;
use common::{get, ok, signed_in};

const ROUTER_TOML: &str = r#"
not_found = "not_found"

[logging]
level = "debug"
format = "json"

[auth]
redirect_url = "/dashboard"

[auth.role_gates]
staff = ["admin", "mod"]

[[routes]]
method = "GET"
pattern = "/"
handler = "home"

[[routes]]
method = "GET"
pattern = "/login"
handler = "login"
middleware = ["unauthenticated"]

[[routes]]
method = "GET"
pattern = "/admin/"
handler = "admin"
middleware = ["trace", "recoverer", "authenticated", "staff"]
"#;

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

fn registry(config: &RouterConfig) -> Registry {
    let mut registry = Registry::with_builtin_middleware(
        exactmux::security::context_contains::<std::sync::Arc<exactmux::security::TokenPayload>>(),
        exactmux::security::claims_in_context::<exactmux::security::TokenPayload>(),
        &config.auth,
    )
    .unwrap();
    registry
        .register_handler("home", ok("home"))
        .register_handler("login", ok("login"))
        .register_handler("admin", ok("admin"))
        .register_handler(
            "not_found",
            handler_fn(|w, _| w.error(StatusCode::NOT_FOUND)),
        );
    registry
}

#[test]
fn test_load_config_from_file() {
    let file = write_config(ROUTER_TOML);
    let config = RouterConfig::from_path(file.path()).unwrap();

    assert_eq!(config.routes.len(), 3);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.handler_names(), vec!["admin", "home", "login", "not_found"]);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RouterConfig::from_path(dir.path().join("absent.toml")).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}

#[test]
fn test_router_from_config_serves_routes() {
    let config = RouterConfig::from_toml_str(ROUTER_TOML).unwrap();
    let router = Router::from_config(&config, &registry(&config)).unwrap();
    assert_eq!(router.len(), 3);

    assert_eq!(router.dispatch(&get("/")).body(), "home");
    assert_eq!(router.dispatch(&get("/login")).body(), "login");

    let res = router.dispatch(&signed_in("/login", &[]));
    assert_eq!(res.status(), Some(StatusCode::TEMPORARY_REDIRECT));
    assert_eq!(res.header("location"), Some("/dashboard"));

    assert_eq!(
        router.dispatch(&get("/admin/users")).status(),
        Some(StatusCode::UNAUTHORIZED)
    );
    assert_eq!(
        router.dispatch(&signed_in("/admin/users", &["guest"])).status(),
        Some(StatusCode::FORBIDDEN)
    );
    assert_eq!(
        router.dispatch(&signed_in("/admin/users", &["mod"])).body(),
        "admin"
    );

    let res = router.dispatch(&exactmux::Request::new(http::Method::POST, "/"));
    assert_eq!(res.status(), Some(StatusCode::NOT_FOUND));
}

#[test]
fn test_unknown_handler_fails_to_load() {
    let config = RouterConfig::from_toml_str(
        r#"
[[routes]]
method = "GET"
pattern = "/"
handler = "nobody"
"#,
    )
    .unwrap();
    let err = Router::from_config(&config, &registry(&config)).err();
    assert_eq!(
        err,
        Some(RouteError::MissingHandler {
            name: "nobody".to_string()
        })
    );
}

#[test]
fn test_unknown_middleware_fails_to_load() {
    let config = RouterConfig::from_toml_str(
        r#"
[[routes]]
method = "GET"
pattern = "/"
handler = "home"
middleware = ["gzip"]
"#,
    )
    .unwrap();
    let err = Router::from_config(&config, &registry(&config)).err();
    assert_eq!(
        err,
        Some(RouteError::UnknownMiddleware {
            name: "gzip".to_string()
        })
    );
}

#[test]
fn test_duplicate_route_fails_to_load() {
    let config = RouterConfig::from_toml_str(
        r#"
[[routes]]
method = "GET"
pattern = "/"
handler = "home"

[[routes]]
method = "GET"
pattern = "/"
handler = "login"
"#,
    )
    .unwrap();
    let err = Router::from_config(&config, &registry(&config)).err();
    assert_eq!(
        err,
        Some(RouteError::Conflict {
            method: http::Method::GET,
            pattern: "/".to_string()
        })
    );
}

#[test]
fn test_invalid_method_fails_to_load() {
    let config = RouterConfig::from_toml_str(
        r#"
[[routes]]
method = "G E T"
pattern = "/"
handler = "home"
"#,
    )
    .unwrap();
    assert!(matches!(
        Router::from_config(&config, &registry(&config)),
        Err(RouteError::InvalidMethod { .. })
    ));
}

#[test]
fn test_load_adds_routes_to_shared_router() {
    let config = RouterConfig::from_toml_str(ROUTER_TOML).unwrap();
    let router = Router::new();
    router.get("/health", ok("healthy"), &[]);

    router.load(&config, &registry(&config)).unwrap();
    assert_eq!(router.len(), 4);
    assert_eq!(router.dispatch(&get("/health")).body(), "healthy");
    assert_eq!(router.dispatch(&get("/")).body(), "home");

    // not_found is only bound by from_config
    assert!(!router.has_not_found());

    // loading the same routes twice conflicts on the first one
    assert!(matches!(
        router.load(&config, &registry(&config)),
        Err(RouteError::Conflict { .. })
    ));
}
