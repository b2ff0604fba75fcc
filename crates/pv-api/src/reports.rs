//! Handlers for production reports of an installation.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/installations/:id/reports` | Body: [`NewReport`]; returns 201 + id |
//! | `GET`  | `/installations/:id/reports` | `?timestamp&duration`; returns produced sum × duration |
//! | `GET`  | `/installations/:id/timeline` | `?startTimestamp&duration&page`; 60 points per page |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use pv_core::{
  report::NewReport,
  store::InstallationStore,
  timeline::{TimelinePoint, produced_energy, timeline_page},
  window::{ReportQuery, validate_duration, validate_page, validate_start},
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  installations::{created, require},
  params::optional_timestamp,
};

// ─── Submit ───────────────────────────────────────────────────────────────────

/// `POST /installations/:id/reports`
///
/// Accepted whether or not the installation is active.
pub async fn submit<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
  body: Result<Json<NewReport>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: InstallationStore,
{
  let Path(id) = path?;
  require(store.as_ref(), id).await?;

  let Json(input) = body?;
  input.validate()?;

  let report = store
    .insert_report(id, input)
    .await
    .map_err(ApiError::store)?;

  tracing::info!(installation = id, report = report.id, "production report recorded");
  Ok(created(format!("/installations/{id}/reports/{}", report.id), report.id))
}

// ─── Aggregate ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AggregateParams {
  /// Window start.
  #[serde(default, deserialize_with = "optional_timestamp")]
  pub timestamp: Option<DateTime<Utc>>,
  /// Window length in minutes; also the multiplier of the result.
  pub duration:  Option<i64>,
}

/// `GET /installations/:id/reports[?timestamp=...][&duration=...]`
///
/// Returns `null` when no duration is given.
pub async fn aggregate<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
  query: Result<Query<AggregateParams>, QueryRejection>,
) -> Result<Json<Option<f64>>, ApiError>
where
  S: InstallationStore,
{
  let Path(id) = path?;
  let Query(params) = query?;
  require(store.as_ref(), id).await?;
  validate_start("timestamp", params.timestamp)?;
  validate_duration(params.duration)?;

  let query = ReportQuery::window(id, params.timestamp, params.duration);
  tracing::debug!(?query, "aggregating production");

  let reports = store
    .query_reports(&query)
    .await
    .map_err(ApiError::store)?;

  Ok(Json(produced_energy(&reports, params.duration)))
}

// ─── Timeline ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineParams {
  #[serde(default, deserialize_with = "optional_timestamp")]
  pub start_timestamp: Option<DateTime<Utc>>,
  pub duration:        Option<i64>,
  /// 1-based page number.
  pub page:            Option<i64>,
}

/// `GET /installations/:id/timeline[?startTimestamp=...][&duration=...][&page=...]`
pub async fn timeline<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
  query: Result<Query<TimelineParams>, QueryRejection>,
) -> Result<Json<Vec<TimelinePoint>>, ApiError>
where
  S: InstallationStore,
{
  let Path(id) = path?;
  let Query(params) = query?;
  require(store.as_ref(), id).await?;
  validate_start("startTimestamp", params.start_timestamp)?;
  validate_duration(params.duration)?;
  validate_page(params.page)?;

  let query = ReportQuery::window(id, params.start_timestamp, params.duration);
  tracing::debug!(?query, page = ?params.page, "building timeline");

  let reports = store
    .query_reports(&query)
    .await
    .map_err(ApiError::store)?;

  Ok(Json(timeline_page(&reports, params.page)))
}
