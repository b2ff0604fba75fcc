//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed nine-digit
//! fraction, so lexicographic order in SQL matches chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use pv_core::{log::InstallationLog, report::ProductionReport};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `production_reports` row.
pub struct RawReport {
  pub id:                 i64,
  pub timestamp:          String,
  pub produced_wattage:   f64,
  pub household_wattage:  f64,
  pub battery_wattage:    f64,
  pub grid_wattage:       f64,
  pub pv_installation_id: Option<i64>,
}

impl RawReport {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                 row.get(0)?,
      timestamp:          row.get(1)?,
      produced_wattage:   row.get(2)?,
      household_wattage:  row.get(3)?,
      battery_wattage:    row.get(4)?,
      grid_wattage:       row.get(5)?,
      pv_installation_id: row.get(6)?,
    })
  }

  pub fn into_report(self) -> Result<ProductionReport> {
    Ok(ProductionReport {
      id:                 self.id,
      timestamp:          decode_dt(&self.timestamp)?,
      produced_wattage:   self.produced_wattage,
      household_wattage:  self.household_wattage,
      battery_wattage:    self.battery_wattage,
      grid_wattage:       self.grid_wattage,
      pv_installation_id: self.pv_installation_id,
    })
  }
}

/// Raw values read directly from an `installation_logs` row.
pub struct RawLog {
  pub id:             i64,
  pub timestamp:      String,
  pub action:         String,
  pub previous_value: Option<String>,
  pub new_value:      Option<String>,
}

impl RawLog {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      timestamp:      row.get(1)?,
      action:         row.get(2)?,
      previous_value: row.get(3)?,
      new_value:      row.get(4)?,
    })
  }

  pub fn into_log(self) -> Result<InstallationLog> {
    Ok(InstallationLog {
      id:             self.id,
      timestamp:      decode_dt(&self.timestamp)?,
      action:         self.action,
      previous_value: self.previous_value,
      new_value:      self.new_value,
    })
  }
}
