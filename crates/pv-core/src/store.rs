//! The `InstallationStore` trait.
//!
//! Implemented by storage backends (e.g. `pv-store-sqlite`). The HTTP layer
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  installation::{NewInstallation, PvInstallation},
  log::{InstallationLog, NewInstallationLog},
  report::{NewReport, ProductionReport},
  window::ReportQuery,
};

/// Abstraction over a storage backend for installations, their production
/// reports and the audit log.
///
/// The audit log is only written as part of installation writes.
///
/// Inputs are assumed to be validated by the caller. All methods return
/// `Send` futures so the trait can be used with tokio and `axum`.
pub trait InstallationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Installations ─────────────────────────────────────────────────────

  /// Persist a new installation with `is_active = true` and return it with
  /// its assigned id. The matching [`NewInstallationLog::created`] entry is
  /// appended in the same transaction.
  fn insert_installation(
    &self,
    input: NewInstallation,
  ) -> impl Future<Output = Result<PvInstallation, Self::Error>> + Send + '_;

  /// Retrieve an installation by id. Returns `None` if not found.
  fn get_installation(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<PvInstallation>, Self::Error>> + Send + '_;

  /// Write back the mutable fields of an existing installation and append
  /// `entry` atomically. Neither is persisted if either write fails.
  fn update_installation(
    &self,
    installation: PvInstallation,
    entry: NewInstallationLog,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reports ───────────────────────────────────────────────────────────

  /// Record a report for `installation_id`. The timestamp is set by the
  /// store to the current time truncated to whole seconds.
  fn insert_report(
    &self,
    installation_id: i64,
    input: NewReport,
  ) -> impl Future<Output = Result<ProductionReport, Self::Error>> + Send + '_;

  /// Reports matching `query`, in insertion order.
  fn query_reports<'a>(
    &'a self,
    query: &'a ReportQuery,
  ) -> impl Future<Output = Result<Vec<ProductionReport>, Self::Error>> + Send + 'a;

  // ── Audit log ─────────────────────────────────────────────────────────

  /// All audit entries in insertion order.
  fn list_logs(
    &self,
  ) -> impl Future<Output = Result<Vec<InstallationLog>, Self::Error>> + Send + '_;
}
