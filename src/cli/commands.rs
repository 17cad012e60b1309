use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use http::Method;
use tracing::debug;

use crate::config::{LogConfig, RouterConfig};
use crate::echo::echo_handler;
use crate::logging::init_logging;
use crate::registry::Registry;
use crate::router::{weight, Router};
use crate::security::{claims_in_context, context_contains, TokenPayload};
use crate::server::Request;

/// Command-line interface for exactmux
///
/// Inspects a routing configuration and dry-runs requests against it with
/// echo handlers standing in for the real ones.
#[derive(Parser)]
#[command(name = "exactmux")]
#[command(about = "exactmux routing table inspector", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the routing table, per method, in prefix-scan order
    Routes {
        /// Path to the router configuration (TOML)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Resolve and dispatch one request against the configured routes
    ///
    /// Every handler is replaced by an echo handler so the full middleware
    /// chain runs without any application code.
    Resolve {
        /// Path to the router configuration (TOML)
        #[arg(short, long)]
        config: PathBuf,

        /// HTTP method of the request
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Request path, e.g. /users/42
        path: String,

        /// Treat the request as authenticated
        #[arg(long, default_value_t = false)]
        authenticated: bool,

        /// Roles carried by the caller (comma-separated or repeated); implies --authenticated
        #[arg(long, num_args = 1.., value_delimiter = ',')]
        roles: Vec<String>,
    },
    /// Print the weight of one or more patterns
    Weight {
        /// Patterns to weigh
        #[arg(required = true)]
        patterns: Vec<String>,
    },
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The configuration cannot be read or parsed
/// - A route names an unknown handler or middleware, or conflicts with another
/// - The request method is not a valid HTTP method
/// - Logging cannot be initialised
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Routes { config } => {
            let config = RouterConfig::from_path(config)?;
            init_logging(&config.logging)?;
            let router = load_router(&config)?;
            print!("{}", render_routes(&router, &config));
            Ok(())
        }
        Commands::Resolve {
            config,
            method,
            path,
            authenticated,
            roles,
        } => {
            let config = RouterConfig::from_path(config)?;
            init_logging(&config.logging)?;
            let router = load_router(&config)?;

            let method = Method::from_bytes(method.as_bytes())
                .with_context(|| format!("Invalid HTTP method {method}"))?;
            let mut req = Request::new(method, path);
            if *authenticated || !roles.is_empty() {
                req = req.with_context(Arc::new(TokenPayload {
                    id: 0,
                    exp: i64::MAX,
                    roles: roles.clone(),
                }));
            }

            match router.resolve(&req.method, &req.path) {
                Some(found) => println!(
                    "matched: {} ({:?}, weight {})",
                    found.pattern, found.kind, found.weight
                ),
                None if router.has_not_found() => println!("matched: <not found>"),
                None => println!("matched: <none>"),
            }

            let res = router.dispatch(&req);
            match res.status() {
                Some(status) => println!("status: {status}"),
                None => println!("status: <nothing written>"),
            }
            if let Some(location) = res.header("location") {
                println!("location: {location}");
            }
            if !res.body().is_empty() {
                println!("body: {}", res.body().trim_end());
            }
            Ok(())
        }
        Commands::Weight { patterns } => {
            init_logging(&LogConfig::from_env())?;
            for pattern in patterns {
                println!("{:>4}  {pattern}", weight(pattern));
            }
            Ok(())
        }
    }
}

/// Build a router from `config` with echo handlers bound to every handler name.
///
/// The stock auth middleware treats a request as authenticated when its
/// context holds an `Arc<TokenPayload>`.
///
/// # Errors
///
/// Returns an error if the auth settings are invalid or a route fails to load.
pub fn load_router(config: &RouterConfig) -> Result<Router> {
    let mut registry = Registry::with_builtin_middleware(
        context_contains::<Arc<TokenPayload>>(),
        claims_in_context::<TokenPayload>(),
        &config.auth,
    )
    .context("Invalid auth configuration")?;

    let names = config.handler_names();
    for name in &names {
        registry.register_handler(name, echo_handler(name));
    }
    debug!(handlers = names.len(), "Echo handlers bound");

    Router::from_config(config, &registry).context("Failed to load routes")
}

/// One block per method, one line per route: weight, pattern, handler name.
pub(crate) fn render_routes(router: &Router, config: &RouterConfig) -> String {
    let mut out = String::new();
    for method in router.methods() {
        out.push_str(&format!("{method}\n"));
        for (pattern, weight) in router.routes(&method) {
            let handler = config
                .routes
                .iter()
                .find(|r| r.method == method.as_str() && r.pattern == *pattern)
                .map_or("?", |r| r.handler.as_str());
            out.push_str(&format!("  {weight:>4}  {pattern:<32} {handler}\n"));
        }
    }
    if let Some(not_found) = &config.not_found {
        out.push_str(&format!("not found: {not_found}\n"));
    }
    out
}
