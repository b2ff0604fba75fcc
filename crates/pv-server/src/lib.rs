//! Server assembly for the PV installation service: configuration and the
//! top-level router with HTTP tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use pv_core::store::InstallationStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered from built-in defaults, an optional TOML file and `PV_*`
/// environment variables (e.g. `PV_PORT=9000`), later sources winning.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
}

impl ServerConfig {
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 8080)?
      .set_default("database_path", "pv-installations.sqlite3")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("PV"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router wrapped in a per-request tracing span.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: InstallationStore + 'static,
{
  pv_api::api_router(store).layer(TraceLayer::new_for_http())
}
