//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeDelta, TimeZone as _, Timelike as _, Utc};
use pv_core::{
  installation::NewInstallation,
  log::NewInstallationLog,
  report::NewReport,
  store::InstallationStore,
  window::ReportQuery,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn installation() -> NewInstallation {
  NewInstallation {
    longitude:  -122.4194,
    latitude:   37.7749,
    address:    "1 Market St, San Francisco".into(),
    owner_name: "Ada Lovelace".into(),
    comments:   Some("south-facing roof".into()),
  }
}

fn report(produced: f64) -> NewReport {
  NewReport {
    produced_wattage:  produced,
    household_wattage: 300.0,
    battery_wattage:   50.0,
    grid_wattage:      120.0,
  }
}

// ─── Installations ───────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_installation() {
  let s = store().await;

  let inst = s.insert_installation(installation()).await.unwrap();
  assert!(inst.is_active);

  let fetched = s.get_installation(inst.id).await.unwrap().unwrap();
  assert_eq!(fetched, inst);
  assert_eq!(fetched.longitude, -122.4194);
  assert_eq!(fetched.comments.as_deref(), Some("south-facing roof"));
}

#[tokio::test]
async fn ids_are_distinct() {
  let s = store().await;
  let a = s.insert_installation(installation()).await.unwrap();
  let b = s.insert_installation(installation()).await.unwrap();
  assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn get_installation_missing_returns_none() {
  let s = store().await;
  assert!(s.get_installation(4242).await.unwrap().is_none());
}

#[tokio::test]
async fn update_persists_deactivation() {
  let s = store().await;
  let mut inst = s.insert_installation(installation()).await.unwrap();

  let was_active = inst.deactivate();
  s.update_installation(inst.clone(), NewInstallationLog::deactivated(inst.id, was_active))
    .await
    .unwrap();

  let fetched = s.get_installation(inst.id).await.unwrap().unwrap();
  assert!(!fetched.is_active);
}

#[tokio::test]
async fn update_missing_installation_errors() {
  let s = store().await;
  let mut ghost = s.insert_installation(installation()).await.unwrap();
  ghost.id += 100;

  let err = s
    .update_installation(ghost.clone(), NewInstallationLog::deactivated(ghost.id, true))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::InstallationNotFound(_)));

  // Only the create entry of the real installation.
  let logs = s.list_logs().await.unwrap();
  assert_eq!(logs.len(), 1);
  assert_eq!(logs[0].action, "create");
}

#[tokio::test]
async fn overlong_address_is_rejected_by_schema() {
  let s = store().await;
  let input = NewInstallation { address: "x".repeat(1025), ..installation() };
  assert!(matches!(
    s.insert_installation(input).await.unwrap_err(),
    crate::Error::Database(_)
  ));
  assert!(s.list_logs().await.unwrap().is_empty());
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn report_timestamp_is_whole_seconds() {
  let s = store().await;
  let inst = s.insert_installation(installation()).await.unwrap();

  let before = Utc::now() - TimeDelta::seconds(1);
  let r = s.insert_report(inst.id, report(1000.0)).await.unwrap();
  assert_eq!(r.timestamp.nanosecond(), 0);
  assert!(r.timestamp >= before);
  assert_eq!(r.pv_installation_id, Some(inst.id));

  let stored = s.query_reports(&ReportQuery::all(inst.id)).await.unwrap();
  assert_eq!(stored.len(), 1);
  assert_eq!(stored[0], r);
}

#[tokio::test]
async fn report_for_unknown_installation_violates_foreign_key() {
  let s = store().await;
  assert!(s.insert_report(999, report(1.0)).await.is_err());
  assert!(s.query_reports(&ReportQuery::all(999)).await.unwrap().is_empty());
}

#[tokio::test]
async fn query_is_scoped_to_installation_and_ordered() {
  let s = store().await;
  let a = s.insert_installation(installation()).await.unwrap();
  let b = s.insert_installation(installation()).await.unwrap();

  for w in [10.0, 20.0, 30.0] {
    s.insert_report(a.id, report(w)).await.unwrap();
  }
  s.insert_report(b.id, report(99.0)).await.unwrap();

  let reports = s.query_reports(&ReportQuery::all(a.id)).await.unwrap();
  let produced: Vec<f64> = reports.iter().map(|r| r.produced_wattage).collect();
  assert_eq!(produced, vec![10.0, 20.0, 30.0]);
}

#[tokio::test]
async fn query_applies_window_bounds() {
  let s = store().await;
  let inst = s.insert_installation(installation()).await.unwrap();
  let r = s.insert_report(inst.id, report(10.0)).await.unwrap();

  let around = ReportQuery::window(inst.id, Some(r.timestamp - TimeDelta::minutes(1)), Some(2));
  assert_eq!(s.query_reports(&around).await.unwrap().len(), 1);

  let exact = ReportQuery::window(inst.id, Some(r.timestamp), Some(0));
  assert_eq!(s.query_reports(&exact).await.unwrap().len(), 1);

  let later = ReportQuery::window(inst.id, Some(r.timestamp + TimeDelta::seconds(1)), None);
  assert!(s.query_reports(&later).await.unwrap().is_empty());

  let earlier = ReportQuery::window(inst.id, Some(r.timestamp - TimeDelta::minutes(10)), Some(5));
  assert!(s.query_reports(&earlier).await.unwrap().is_empty());
}

#[tokio::test]
async fn subsecond_window_start_excludes_earlier_whole_second() {
  let s = store().await;
  let inst = s.insert_installation(installation()).await.unwrap();
  let r = s.insert_report(inst.id, report(10.0)).await.unwrap();

  let start = r.timestamp + TimeDelta::milliseconds(500);
  let q = ReportQuery::window(inst.id, Some(start), None);
  assert!(s.query_reports(&q).await.unwrap().is_empty());
}

#[tokio::test]
async fn window_ending_past_year_9999_is_open_above() {
  let s = store().await;
  let inst = s.insert_installation(installation()).await.unwrap();
  let r = s.insert_report(inst.id, report(10.0)).await.unwrap();

  let q = ReportQuery::window(inst.id, Some(r.timestamp - TimeDelta::minutes(1)), Some(5_000_000_000));
  let reports = s.query_reports(&q).await.unwrap();
  assert_eq!(reports.len(), 1);
  assert_eq!(reports[0].id, r.id);
}

#[tokio::test]
async fn five_digit_year_bounds_are_not_compared_as_text() {
  let s = store().await;
  let inst = s.insert_installation(installation()).await.unwrap();
  s.insert_report(inst.id, report(10.0)).await.unwrap();

  let far = Utc.with_ymd_and_hms(10_000, 1, 1, 0, 0, 0).unwrap();

  let open_above = ReportQuery { installation_id: inst.id, from: None, until: Some(far) };
  assert_eq!(s.query_reports(&open_above).await.unwrap().len(), 1);

  let after_everything = ReportQuery { installation_id: inst.id, from: Some(far), until: None };
  assert!(s.query_reports(&after_everything).await.unwrap().is_empty());
}

// ─── Audit log ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_writes_one_create_entry() {
  let s = store().await;
  let inst = s.insert_installation(installation()).await.unwrap();

  let logs = s.list_logs().await.unwrap();
  assert_eq!(logs.len(), 1);
  assert_eq!(logs[0].action, "create");
  assert!(logs[0].previous_value.is_none());

  let record: serde_json::Value =
    serde_json::from_str(logs[0].new_value.as_deref().unwrap()).unwrap();
  assert_eq!(record["id"], inst.id);
}

#[tokio::test]
async fn logs_are_appended_in_order() {
  let s = store().await;
  let mut inst = s.insert_installation(installation()).await.unwrap();

  let was_active = inst.deactivate();
  s.update_installation(inst.clone(), NewInstallationLog::deactivated(inst.id, was_active))
    .await
    .unwrap();

  let logs = s.list_logs().await.unwrap();
  assert_eq!(logs.len(), 2);
  assert!(logs[0].id < logs[1].id);
  assert_eq!(logs[0].action, "create");
  assert_eq!(logs[1].action, "deactivate");

  let expected = NewInstallationLog::deactivated(inst.id, true);
  assert_eq!(logs[1].previous_value, expected.previous_value);
  assert_eq!(logs[1].new_value, expected.new_value);
}

#[tokio::test]
async fn failed_log_write_rolls_back_installation_insert() {
  let s = store().await;
  s.execute_batch("DROP TABLE installation_logs").await.unwrap();

  assert!(matches!(
    s.insert_installation(installation()).await.unwrap_err(),
    crate::Error::Database(_)
  ));
  assert!(s.get_installation(1).await.unwrap().is_none());
}

#[tokio::test]
async fn failed_log_write_rolls_back_installation_update() {
  let s = store().await;
  let mut inst = s.insert_installation(installation()).await.unwrap();
  s.execute_batch("DROP TABLE installation_logs").await.unwrap();

  let was_active = inst.deactivate();
  assert!(
    s.update_installation(inst.clone(), NewInstallationLog::deactivated(inst.id, was_active))
      .await
      .is_err()
  );

  let fetched = s.get_installation(inst.id).await.unwrap().unwrap();
  assert!(fetched.is_active);
}

#[tokio::test]
async fn empty_log_lists_nothing() {
  let s = store().await;
  assert!(s.list_logs().await.unwrap().is_empty());
}
