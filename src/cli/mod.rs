//! # CLI Module
//!
//! The `exactmux` binary loads a routing configuration, binds an echo
//! handler to every handler name it mentions, and lets you inspect the
//! result.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print the routing table per method, heaviest pattern first:
//!
//! ```bash
//! exactmux routes --config router.toml
//! ```
//!
//! ### `resolve`
//!
//! Resolve one request, run it through the middleware chain and print the
//! outcome:
//!
//! ```bash
//! exactmux resolve --config router.toml --method GET /admin/users --roles admin
//! ```
//!
//! Options:
//! - `--authenticated` - attach an identity to the request context
//! - `--roles <ROLES>` - roles carried by that identity (implies `--authenticated`)
//!
//! ### `weight`
//!
//! Print pattern weights:
//!
//! ```bash
//! exactmux weight / /users /users/ /a/b/c
//! ```
//!
//! Logging goes to stderr and follows the `[logging]` section of the
//! configuration plus the `EXACTMUX_LOG_*` variables.

mod commands;


pub use commands::{load_router, run_cli, Cli, Commands};
