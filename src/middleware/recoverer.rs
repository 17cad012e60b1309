use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::panic::{self, catch_unwind, AssertUnwindSafe};
use std::sync::Once;

use http::StatusCode;
use tracing::error;

use super::Middleware;
use crate::handler::Handler;
use crate::server::{HandlerResponse, Request, ResponseWriter};

/// Fault boundary around the rest of the chain.
///
/// The inner chain writes into a staged response that is replayed into the
/// caller's writer only when it completes normally. A panic anywhere below
/// this middleware discards whatever was staged, is logged once with the
/// panic site and its backtrace, and is answered with a clean
/// `500 Internal Server Error`. The serving thread stays alive for the next
/// request. Only unwinding panics can be caught; a binary built with
/// `panic = "abort"` still aborts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Recoverer;

impl Recoverer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for Recoverer {
    fn handle(&self, w: &mut dyn ResponseWriter, req: &Request, next: &Handler) {
        let mut staged = HandlerResponse::new();
        let outcome = guarded(|| next(&mut staged, req));

        match outcome {
            Ok(()) => staged.replay_into(w),
            Err(caught) => {
                let location = caught.location.as_deref().unwrap_or("<unknown>");
                let backtrace = caught
                    .backtrace
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                error!(
                    request_id = %req.request_id,
                    method = %req.method,
                    path = %req.path,
                    panic_message = %caught.message,
                    panic_location = %location,
                    backtrace = %backtrace,
                    "Handler panicked - recovered"
                );
                w.error(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }
}

/// What the panic hook saw at the panic site.
struct CaughtPanic {
    message: String,
    location: Option<String>,
    backtrace: Option<Backtrace>,
}

thread_local! {
    /// Number of active `guarded` frames on this thread.
    static GUARD_DEPTH: Cell<usize> = const { Cell::new(0) };
    static PANIC_SITE: RefCell<Option<(String, Backtrace)>> = const { RefCell::new(None) };
}

static HOOK: Once = Once::new();

/// Chain a panic hook that records the location and backtrace of panics
/// raised under `guarded`, while the panicking frames are still on the stack.
/// Those panics are reported through `tracing` instead of the default hook;
/// every other panic goes to the previous hook unchanged.
fn install_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if GUARD_DEPTH.with(Cell::get) == 0 {
                previous(info);
                return;
            }
            let location = info
                .location()
                .map_or_else(|| "<unknown>".to_string(), ToString::to_string);
            let backtrace = Backtrace::capture();
            PANIC_SITE.with(|site| *site.borrow_mut() = Some((location, backtrace)));
        }));
    });
}

fn guarded<F: FnOnce()>(f: F) -> Result<(), CaughtPanic> {
    install_hook();
    GUARD_DEPTH.with(|depth| depth.set(depth.get() + 1));
    let outcome = catch_unwind(AssertUnwindSafe(f));
    GUARD_DEPTH.with(|depth| depth.set(depth.get() - 1));

    outcome.map_err(|panic| {
        let site = PANIC_SITE.with(|site| site.borrow_mut().take());
        let (location, backtrace) = match site {
            Some((location, backtrace)) => (Some(location), Some(backtrace)),
            None => (None, None),
        };
        CaughtPanic {
            message: panic_message(&*panic),
            location,
            backtrace,
        }
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
