//! Production reports — timestamped power-flow snapshots.
//!
//! Reports are append-only. The timestamp is assigned by the server at insert
//! time and is never supplied by the client.

use chrono::{DateTime, SubsecRound as _, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A persisted production report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionReport {
  pub id:                 i64,
  pub timestamp:          DateTime<Utc>,
  pub produced_wattage:   f64,
  pub household_wattage:  f64,
  pub battery_wattage:    f64,
  pub grid_wattage:       f64,
  pub pv_installation_id: Option<i64>,
}

/// The four wattages submitted by a client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
  pub produced_wattage:  f64,
  pub household_wattage: f64,
  pub battery_wattage:   f64,
  pub grid_wattage:      f64,
}

impl NewReport {
  /// Each wattage must be non-negative. Checked in declaration order; the
  /// first failure is returned.
  pub fn validate(&self) -> Result<(), ValidationError> {
    let fields = [
      ("producedWattage", self.produced_wattage),
      ("householdWattage", self.household_wattage),
      ("batteryWattage", self.battery_wattage),
      ("gridWattage", self.grid_wattage),
    ];
    for (field, value) in fields {
      if value.is_nan() || value < 0.0 {
        return Err(ValidationError::new(
          field,
          format!("{field} must be greater than or equal to 0"),
        ));
      }
    }
    Ok(())
  }
}

/// Drop the sub-second component of `dt`. Never rounds up.
pub fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
  dt.trunc_subsecs(0)
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone as _, Timelike as _};

  use super::*;

  fn valid() -> NewReport {
    NewReport {
      produced_wattage:  1200.0,
      household_wattage: 400.0,
      battery_wattage:   0.0,
      grid_wattage:      800.0,
    }
  }

  #[test]
  fn zero_is_allowed() {
    let zero = NewReport {
      produced_wattage:  0.0,
      household_wattage: 0.0,
      battery_wattage:   0.0,
      grid_wattage:      0.0,
    };
    assert!(zero.validate().is_ok());
    assert!(valid().validate().is_ok());
  }

  #[test]
  fn each_negative_field_is_named() {
    let cases = [
      (NewReport { produced_wattage: -1.0, ..valid() }, "producedWattage"),
      (NewReport { household_wattage: -0.1, ..valid() }, "householdWattage"),
      (NewReport { battery_wattage: -5.0, ..valid() }, "batteryWattage"),
      (NewReport { grid_wattage: -100.0, ..valid() }, "gridWattage"),
    ];
    for (input, field) in cases {
      assert_eq!(input.validate().unwrap_err().field, field);
    }
  }

  #[test]
  fn earlier_field_reported_first() {
    let input = NewReport {
      household_wattage: -1.0,
      grid_wattage:      -1.0,
      ..valid()
    };
    assert_eq!(input.validate().unwrap_err().field, "householdWattage");
  }

  #[test]
  fn nan_is_rejected() {
    let input = NewReport { battery_wattage: f64::NAN, ..valid() };
    assert_eq!(input.validate().unwrap_err().field, "batteryWattage");
  }

  #[test]
  fn truncation_drops_subseconds_without_rounding() {
    let dt = Utc
      .with_ymd_and_hms(2024, 6, 1, 12, 30, 59)
      .unwrap()
      .with_nanosecond(999_999_999)
      .unwrap();
    let truncated = truncate_to_seconds(dt);
    assert_eq!(truncated.nanosecond(), 0);
    assert_eq!(truncated.second(), 59);
    assert_eq!(truncated.minute(), 30);
  }
}
