//! Handler for `GET /logs` — the installation audit trail.

use std::sync::Arc;

use axum::{Json, extract::State};
use pv_core::{log::InstallationLog, store::InstallationStore};

use crate::error::ApiError;

/// `GET /logs` — all entries, oldest first.
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<InstallationLog>>, ApiError>
where
  S: InstallationStore,
{
  let logs = store.list_logs().await.map_err(ApiError::store)?;
  Ok(Json(logs))
}
