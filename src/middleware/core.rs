use std::sync::Arc;

use crate::handler::Handler;
use crate::server::{Request, ResponseWriter};

/// A decorator around a handler.
///
/// `handle` receives the rest of the chain as `next`. Calling it continues
/// the request; returning without calling it short-circuits everything
/// further in.
pub trait Middleware: Send + Sync {
    fn handle(&self, w: &mut dyn ResponseWriter, req: &Request, next: &Handler);
}

impl<F> Middleware for F
where
    F: Fn(&mut dyn ResponseWriter, &Request, &Handler) + Send + Sync,
{
    fn handle(&self, w: &mut dyn ResponseWriter, req: &Request, next: &Handler) {
        self(w, req, next)
    }
}

/// Wrap `handler` in `middlewares`.
///
/// The first middleware in the list is the outermost wrapper: for
/// `compose(h, [a, b])` a request flows `a -> b -> h`, and `a` can stop it
/// before `b` or `h` ever run.
#[must_use]
pub fn compose(handler: Handler, middlewares: &[Arc<dyn Middleware>]) -> Handler {
    middlewares.iter().rev().fold(handler, |next, mw| {
        let mw = Arc::clone(mw);
        let wrapped: Handler =
            Arc::new(move |w: &mut dyn ResponseWriter, req: &Request| mw.handle(w, req, &next));
        wrapped
    })
}
