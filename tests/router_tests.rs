use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

use exactmux::{handler_fn, weight, HandlerResponse, MatchKind, Request, Router};
use http::{Method, StatusCode};

mod common;
use common::{counting, get, ok, test_tracing};

fn zoo_router() -> Router {
    let router = Router::new();
    router.get("/", ok("root"), &[]);
    router.get("/zoo", ok("zoo"), &[]);
    router.get("/zoo/", ok("zoo_dir"), &[]);
    router.get("/zoo/animals", ok("animals"), &[]);
    router.post("/zoo/animals", ok("create_animal"), &[]);
    router.put("/zoo/animals/", ok("update_animal"), &[]);
    router.patch("/zoo/animals/", ok("patch_animal"), &[]);
    router.delete("/zoo/animals/", ok("delete_animal"), &[]);
    router
}

fn assert_body(router: &Router, method: Method, path: &str, expected: &str) {
    let res = router.dispatch(&Request::new(method.clone(), path));
    assert_eq!(
        res.body(),
        expected,
        "Handler mismatch for {} {}: expected '{}', got '{}'",
        method,
        path,
        expected,
        res.body()
    );
}

#[test]
fn test_exact_matches() {
    let _tracing = test_tracing();
    let router = zoo_router();
    assert_body(&router, Method::GET, "/", "root");
    assert_body(&router, Method::GET, "/zoo", "zoo");
    assert_body(&router, Method::GET, "/zoo/", "zoo_dir");
    assert_body(&router, Method::GET, "/zoo/animals", "animals");
    assert_body(&router, Method::POST, "/zoo/animals", "create_animal");
}

#[test]
fn test_prefix_matches_prefer_heavier_patterns() {
    let router = zoo_router();
    // "/zoo/" (2) outweighs "/zoo" (1) and "/" (0)
    assert_body(&router, Method::GET, "/zoo/cats", "zoo_dir");
    // "/zoo/animals" (3) outweighs "/zoo/"
    assert_body(&router, Method::GET, "/zoo/animals/42", "animals");
    assert_body(&router, Method::GET, "/zoological", "zoo");
    assert_body(&router, Method::GET, "/elsewhere", "root");
}

#[test]
fn test_methods_are_independent() {
    let router = zoo_router();
    assert_body(&router, Method::PUT, "/zoo/animals/7", "update_animal");
    assert_body(&router, Method::PATCH, "/zoo/animals/7", "patch_animal");
    assert_body(&router, Method::DELETE, "/zoo/animals/7", "delete_animal");
    // POST only knows "/zoo/animals" and the path doesn't start with it
    assert!(router.resolve(&Method::POST, "/zoo").is_none());
    assert!(router.resolve(&Method::HEAD, "/").is_none());
}

#[test]
fn test_resolve_reports_kind_and_weight() {
    let router = zoo_router();

    let exact = router.resolve(&Method::GET, "/zoo/animals").unwrap();
    assert_eq!(&*exact.pattern, "/zoo/animals");
    assert_eq!(exact.kind, MatchKind::Exact);
    assert_eq!(exact.weight, weight("/zoo/animals"));

    let prefix = router.resolve(&Method::GET, "/zoo/animals/1/toys").unwrap();
    assert_eq!(&*prefix.pattern, "/zoo/animals");
    assert_eq!(prefix.kind, MatchKind::Prefix);
}

#[test]
fn test_routes_listed_in_weight_order() {
    let router = zoo_router();
    let listed: Vec<(String, usize)> = router
        .routes(&Method::GET)
        .into_iter()
        .map(|(p, w)| (p.to_string(), w))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("/zoo/animals".to_string(), 3),
            ("/zoo/".to_string(), 2),
            ("/zoo".to_string(), 1),
            ("/".to_string(), 0),
        ]
    );
    assert_eq!(router.len(), 8);
    assert_eq!(
        router.methods(),
        vec![Method::DELETE, Method::GET, Method::PATCH, Method::POST, Method::PUT]
    );
}

#[test]
#[should_panic(expected = "ambiguous mapping: GET /zoo")]
fn test_duplicate_registration_panics() {
    let router = zoo_router();
    router.get("/zoo", ok("again"), &[]);
}

#[test]
#[should_panic(expected = "pattern must start with /")]
fn test_pattern_without_slash_panics() {
    let router = Router::new();
    router.get("zoo", ok("zoo"), &[]);
}

#[test]
fn test_try_route_reports_errors() {
    let router = zoo_router();
    assert!(router
        .try_route(Method::GET, "/zoo", ok("again"), &[])
        .is_err());
    assert!(router
        .try_route_str("GE T", "/new", ok("new"), &[])
        .is_err());
    assert!(router
        .try_route_str("OPTIONS", "/", ok("options"), &[])
        .is_ok());
    assert_body(&router, Method::OPTIONS, "/anything", "options");
}

#[test]
fn test_not_found_runs_once_and_only_on_miss() {
    let (not_found, misses) = counting("missing");
    let (home, hits) = counting("home");
    let router = Router::new().with_not_found(not_found);
    router.get("/home", home, &[]);

    let res = router.dispatch(&get("/home"));
    assert_eq!(res.body(), "home");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(misses.load(Ordering::SeqCst), 0);

    let res = router.dispatch(&get("/nowhere"));
    assert_eq!(res.body(), "missing");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(misses.load(Ordering::SeqCst), 1);

    // Unknown method is a miss too
    router.dispatch(&Request::new(Method::DELETE, "/home"));
    assert_eq!(misses.load(Ordering::SeqCst), 2);
}

#[test]
fn test_miss_without_not_found_writes_nothing() {
    let router = Router::new();
    router.get("/api", ok("api"), &[]);

    let res = router.dispatch(&get("/other"));
    assert!(!res.is_written());
    assert_eq!(res.body(), "");
    assert!(res.headers().is_empty());
}

#[test]
fn test_not_found_can_write_404() {
    let router = Router::new().with_not_found(handler_fn(|w, _| w.error(StatusCode::NOT_FOUND)));
    let res = router.dispatch(&get("/"));
    assert_eq!(res.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(res.body(), "Not Found\n");
}

#[test]
fn test_serve_into_caller_writer() {
    let router = zoo_router();
    let mut res = HandlerResponse::new();
    router.serve(&mut res, &get("/zoo/animals"));
    assert_eq!(res.status(), Some(StatusCode::OK));
    assert_eq!(res.body(), "animals");
}

#[test]
fn test_concurrent_resolve_and_register() {
    let router = Arc::new(zoo_router());

    let readers: Vec<_> = (0..8)
        .map(|i| {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                for _ in 0..200 {
                    let res = router.dispatch(&get("/zoo/animals/1"));
                    assert_eq!(res.body(), "animals", "reader {i}");
                }
            })
        })
        .collect();

    let writer = {
        let router = Arc::clone(&router);
        thread::spawn(move || {
            for n in 0..50 {
                let pattern = format!("/extra/{n}");
                router
                    .try_route(Method::GET, &pattern, ok("extra"), &[])
                    .unwrap();
            }
        })
    };

    for reader in readers {
        reader.join().unwrap();
    }
    writer.join().unwrap();

    assert_eq!(router.len(), 58);
    assert_body(&router, Method::GET, "/extra/49", "extra");
}

#[test]
fn test_handler_may_reenter_router() {
    // Handlers run after the table lock is released, so a handler can
    // register routes or resolve through the same router.
    let router = Arc::new(Router::new());
    let inner = Arc::clone(&router);
    router.get(
        "/register",
        handler_fn(move |w, _| {
            let added = inner.try_route(Method::GET, "/late", ok("late"), &[]).is_ok();
            w.write(StatusCode::OK, if added { "added" } else { "exists" });
        }),
        &[],
    );

    assert_eq!(router.dispatch(&get("/register")).body(), "added");
    assert_eq!(router.dispatch(&get("/late")).body(), "late");
    assert_eq!(router.dispatch(&get("/register")).body(), "exists");
}
