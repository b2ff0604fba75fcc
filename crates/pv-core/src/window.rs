//! Time-window filtering for report queries.
//!
//! A window is anchored at an optional start timestamp and extends for an
//! optional number of minutes. The upper bound only exists when both are
//! given; a duration without a start has nothing to anchor to and filters
//! nothing.
//!
//! Bounds are limited to four-digit years so that stores may compare
//! encoded timestamps textually.

use chrono::{DateTime, Datelike as _, TimeDelta, Utc};

use crate::error::ValidationError;

/// Last year a window bound may fall in.
pub const MAX_BOUND_YEAR: i32 = 9999;

/// Parameters for [`InstallationStore::query_reports`](crate::store::InstallationStore::query_reports).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
  pub installation_id: i64,
  /// Inclusive lower bound on `timestamp`.
  pub from:            Option<DateTime<Utc>>,
  /// Inclusive upper bound on `timestamp`.
  pub until:           Option<DateTime<Utc>>,
}

impl ReportQuery {
  /// All reports of an installation, unfiltered.
  pub fn all(installation_id: i64) -> Self {
    Self { installation_id, from: None, until: None }
  }

  /// Build the window `[start, start + duration_minutes]`.
  ///
  /// If the upper bound is not representable, or falls after
  /// [`MAX_BOUND_YEAR`], the window is left open above. Starts past
  /// [`MAX_BOUND_YEAR`] are rejected by [`validate_start`].
  pub fn window(
    installation_id:  i64,
    start:            Option<DateTime<Utc>>,
    duration_minutes: Option<i64>,
  ) -> Self {
    let until = match (start, duration_minutes) {
      (Some(start), Some(minutes)) => TimeDelta::try_minutes(minutes)
        .and_then(|delta| start.checked_add_signed(delta))
        .filter(|until| until.year() <= MAX_BOUND_YEAR),
      _ => None,
    };
    Self { installation_id, from: start, until }
  }

  /// Whether `timestamp` lies inside the window.
  pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
    self.from.is_none_or(|from| timestamp >= from)
      && self.until.is_none_or(|until| timestamp <= until)
  }
}

/// A window start must not lie after [`MAX_BOUND_YEAR`].
pub fn validate_start(
  field: &'static str,
  start: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
  match start {
    Some(s) if s.year() > MAX_BOUND_YEAR => Err(ValidationError::new(
      field,
      format!("{field} must be before the year {}", MAX_BOUND_YEAR + 1),
    )),
    _ => Ok(()),
  }
}

/// `duration` must be non-negative when supplied.
pub fn validate_duration(duration: Option<i64>) -> Result<(), ValidationError> {
  match duration {
    Some(d) if d < 0 => Err(ValidationError::new(
      "duration",
      "duration must be greater than or equal to 0",
    )),
    _ => Ok(()),
  }
}

/// `page` must be non-negative when supplied.
pub fn validate_page(page: Option<i64>) -> Result<(), ValidationError> {
  match page {
    Some(p) if p < 0 => Err(ValidationError::new(
      "page",
      "page must be greater than or equal to 0",
    )),
    _ => Ok(()),
  }
}
