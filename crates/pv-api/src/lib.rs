//! JSON REST API for the PV installation service.
//!
//! Exposes an axum [`Router`] backed by any [`InstallationStore`].
//! Transport concerns (binding, tracing layers) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = pv_api::api_router(Arc::new(store));
//! ```

pub mod error;
pub mod installations;
pub mod logs;
pub mod params;
pub mod reports;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use pv_core::store::InstallationStore;

pub use error::ApiError;

/// Build the API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: InstallationStore + 'static,
{
  Router::new()
    // Installations
    .route("/installations", post(installations::create::<S>))
    .route("/installations/{id}", get(installations::get_one::<S>))
    .route("/installations/{id}/deactivate", post(installations::deactivate::<S>))
    // Reports
    .route(
      "/installations/{id}/reports",
      get(reports::aggregate::<S>).post(reports::submit::<S>),
    )
    .route("/installations/{id}/timeline", get(reports::timeline::<S>))
    // Audit log
    .route("/logs", get(logs::list::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
