//! # Configuration
//!
//! Routes, auth settings and logging can be declared in TOML and bound to
//! code through a [`Registry`](crate::registry::Registry):
//!
//! ```toml
//! not_found = "not_found"
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [auth]
//! redirect_url = "/dashboard"
//!
//! [auth.role_gates]
//! staff = ["admin", "mod"]
//!
//! [[routes]]
//! method = "GET"
//! pattern = "/users"
//! handler = "list_users"
//! middleware = ["recoverer", "authenticated", "staff"]
//! ```
//!
//! Logging settings can be overridden from the environment, see
//! [`LogConfig::apply_env`].

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use crate::logging::{LogConfig, LogFormat};

/// Top-level router configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    pub logging: LogConfig,
    pub auth: AuthConfig,
    /// Handler name served when no route matches
    pub not_found: Option<String>,
    pub routes: Vec<RouteConfig>,
}

/// Settings for the stock auth middleware
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Where `unauthenticated` sends signed-in callers; 401 when unset
    pub redirect_url: Option<String>,
    /// Named role gates: each entry becomes an `Authorized` middleware
    pub role_gates: BTreeMap<String, Vec<String>>,
}

/// One route declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    pub method: String,
    pub pattern: String,
    pub handler: String,
    /// Middleware names, outermost first
    #[serde(default)]
    pub middleware: Vec<String>,
}

impl RouterConfig {
    /// Load configuration from a TOML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid configuration.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read router config {}", path.display()))?;
        let mut config = Self::from_toml_str(&text)
            .with_context(|| format!("Invalid router config {}", path.display()))?;
        config.logging.apply_env();
        Ok(config)
    }

    /// Parse configuration from TOML text. No environment overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not valid configuration.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse router config TOML")
    }

    /// Distinct handler names referenced by routes and `not_found`.
    #[must_use]
    pub fn handler_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .routes
            .iter()
            .map(|r| r.handler.as_str())
            .chain(self.not_found.as_deref())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
