//! [`SqliteStore`] — the SQLite implementation of [`InstallationStore`].

use std::path::Path;

use chrono::{DateTime, Datelike as _, Utc};
use rusqlite::OptionalExtension as _;

use pv_core::{
  installation::{NewInstallation, PvInstallation},
  log::{InstallationLog, NewInstallationLog},
  report::{NewReport, ProductionReport, truncate_to_seconds},
  store::InstallationStore,
  window::{MAX_BOUND_YEAR, ReportQuery},
};

use crate::{
  encode::{RawLog, RawReport, encode_dt},
  schema::SCHEMA,
  Error, Result,
};

const INSTALLATION_COLUMNS: &str =
  "id, longitude, latitude, address, owner_name, is_active, comments";

const REPORT_COLUMNS: &str = "id, timestamp, produced_wattage, household_wattage, \
                              battery_wattage, grid_wattage, pv_installation_id";

fn installation_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PvInstallation> {
  Ok(PvInstallation {
    id:         row.get(0)?,
    longitude:  row.get(1)?,
    latitude:   row.get(2)?,
    address:    row.get(3)?,
    owner_name: row.get(4)?,
    is_active:  row.get(5)?,
    comments:   row.get(6)?,
  })
}

/// Append `entry` with `timestamp` using `conn`, typically an open
/// transaction.
fn insert_log(
  conn:      &rusqlite::Connection,
  timestamp: &str,
  entry:     &NewInstallationLog,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO installation_logs (timestamp, action, previous_value, new_value)
     VALUES (?1, ?2, ?3, ?4)",
    rusqlite::params![timestamp, entry.action, entry.previous_value, entry.new_value],
  )?;
  Ok(())
}

/// Encode a window bound, or `None` when the bound lies past
/// [`MAX_BOUND_YEAR`] and cannot be compared textually.
fn encode_bound(bound: Option<DateTime<Utc>>) -> Option<String> {
  bound
    .filter(|dt| dt.year() <= MAX_BOUND_YEAR)
    .map(encode_dt)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An installation store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema initialised");
    Ok(())
  }

  /// Run raw SQL against the connection.
  #[cfg(test)]
  pub(crate) async fn execute_batch(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── InstallationStore impl ──────────────────────────────────────────────────

impl InstallationStore for SqliteStore {
  type Error = Error;

  // ── Installations ─────────────────────────────────────────────────────────

  async fn insert_installation(&self, input: NewInstallation) -> Result<PvInstallation> {
    let ts_str = encode_dt(Utc::now());

    let installation = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO pv_installations
             (longitude, latitude, address, owner_name, is_active, comments)
           VALUES (?1, ?2, ?3, ?4, 1, ?5)",
          rusqlite::params![
            input.longitude,
            input.latitude,
            input.address,
            input.owner_name,
            input.comments,
          ],
        )?;

        let installation = PvInstallation {
          id:         tx.last_insert_rowid(),
          longitude:  input.longitude,
          latitude:   input.latitude,
          address:    input.address,
          owner_name: input.owner_name,
          is_active:  true,
          comments:   input.comments,
        };
        insert_log(&tx, &ts_str, &NewInstallationLog::created(&installation))?;

        tx.commit()?;
        Ok(installation)
      })
      .await?;

    Ok(installation)
  }

  async fn get_installation(&self, id: i64) -> Result<Option<PvInstallation>> {
    let installation = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {INSTALLATION_COLUMNS} FROM pv_installations WHERE id = ?1"),
            rusqlite::params![id],
            installation_from_row,
          )
          .optional()?)
      })
      .await?;
    Ok(installation)
  }

  async fn update_installation(
    &self,
    installation: PvInstallation,
    entry:        NewInstallationLog,
  ) -> Result<()> {
    let id     = installation.id;
    let ts_str = encode_dt(Utc::now());

    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE pv_installations
           SET longitude = ?2, latitude = ?3, address = ?4,
               owner_name = ?5, is_active = ?6, comments = ?7
           WHERE id = ?1",
          rusqlite::params![
            installation.id,
            installation.longitude,
            installation.latitude,
            installation.address,
            installation.owner_name,
            installation.is_active,
            installation.comments,
          ],
        )?;
        if changed == 0 {
          return Ok(false);
        }

        insert_log(&tx, &ts_str, &entry)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !updated {
      return Err(Error::InstallationNotFound(id));
    }
    Ok(())
  }

  // ── Reports ───────────────────────────────────────────────────────────────

  async fn insert_report(
    &self,
    installation_id: i64,
    input:           NewReport,
  ) -> Result<ProductionReport> {
    let timestamp = truncate_to_seconds(Utc::now());
    let ts_str    = encode_dt(timestamp);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO production_reports (
             timestamp, produced_wattage, household_wattage,
             battery_wattage, grid_wattage, pv_installation_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            ts_str,
            input.produced_wattage,
            input.household_wattage,
            input.battery_wattage,
            input.grid_wattage,
            installation_id,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(ProductionReport {
      id,
      timestamp,
      produced_wattage:   input.produced_wattage,
      household_wattage:  input.household_wattage,
      battery_wattage:    input.battery_wattage,
      grid_wattage:       input.grid_wattage,
      pv_installation_id: Some(installation_id),
    })
  }

  async fn query_reports(&self, query: &ReportQuery) -> Result<Vec<ProductionReport>> {
    let installation_id = query.installation_id;
    if query.from.is_some_and(|from| from.year() > MAX_BOUND_YEAR) {
      return Ok(Vec::new());
    }
    let from_str        = encode_bound(query.from);
    let until_str       = encode_bound(query.until);

    let raws: Vec<RawReport> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {REPORT_COLUMNS}
           FROM production_reports
           WHERE pv_installation_id = ?1
             AND (?2 IS NULL OR timestamp >= ?2)
             AND (?3 IS NULL OR timestamp <= ?3)
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![installation_id, from_str, until_str],
            RawReport::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawReport::into_report).collect()
  }

  // ── Audit log ─────────────────────────────────────────────────────────────

  async fn list_logs(&self) -> Result<Vec<InstallationLog>> {
    let raws: Vec<RawLog> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, timestamp, action, previous_value, new_value
           FROM installation_logs
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], RawLog::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLog::into_log).collect()
  }
}
