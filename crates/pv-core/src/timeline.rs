//! Aggregation and paging over filtered production reports.

use serde::{Deserialize, Serialize};

use crate::report::ProductionReport;

/// Number of timeline points per page.
pub const TIMELINE_PAGE_SIZE: usize = 60;

/// One point of the production timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
  pub produced_wattage:  f64,
  pub household_wattage: f64,
  pub battery_wattage:   f64,
  pub grid_wattage:      f64,
}

impl TimelinePoint {
  pub const ZERO: Self = Self {
    produced_wattage:  0.0,
    household_wattage: 0.0,
    battery_wattage:   0.0,
    grid_wattage:      0.0,
  };
}

impl From<&ProductionReport> for TimelinePoint {
  fn from(r: &ProductionReport) -> Self {
    Self {
      produced_wattage:  r.produced_wattage,
      household_wattage: r.household_wattage,
      battery_wattage:   r.battery_wattage,
      grid_wattage:      r.grid_wattage,
    }
  }
}

/// Sum of `produced_wattage` multiplied by `duration_minutes`.
///
/// The multiplier applies whether or not the duration actually bounded the
/// window. Returns `None` when no duration was given.
pub fn produced_energy(
  reports:          &[ProductionReport],
  duration_minutes: Option<i64>,
) -> Option<f64> {
  let sum: f64 = reports.iter().map(|r| r.produced_wattage).sum();
  duration_minutes.map(|d| sum * d as f64)
}

/// One page of the timeline for `reports`, which must already be filtered
/// and in insertion order.
///
/// - No reports: a single [`TimelinePoint::ZERO`].
/// - `page` is 1-based and defaults to 1; page 0 is treated like page 1.
/// - A page starting past the end is empty.
pub fn timeline_page(reports: &[ProductionReport], page: Option<i64>) -> Vec<TimelinePoint> {
  if reports.is_empty() {
    return vec![TimelinePoint::ZERO];
  }

  let page = page.unwrap_or(1);
  let skip = (TIMELINE_PAGE_SIZE as i64).saturating_mul(page.saturating_sub(1));
  if (reports.len() as i64) < skip {
    return Vec::new();
  }

  reports
    .iter()
    .skip(skip.max(0) as usize)
    .take(TIMELINE_PAGE_SIZE)
    .map(TimelinePoint::from)
    .collect()
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone as _, Utc};

  use super::*;

  fn reports(wattages: &[f64]) -> Vec<ProductionReport> {
    wattages
      .iter()
      .enumerate()
      .map(|(i, &w)| ProductionReport {
        id:                 i as i64 + 1,
        timestamp:          Utc.with_ymd_and_hms(2024, 1, 1, 0, i as u32 % 60, 0).unwrap(),
        produced_wattage:   w,
        household_wattage:  w / 2.0,
        battery_wattage:    1.0,
        grid_wattage:       2.0,
        pv_installation_id: Some(1),
      })
      .collect()
  }

  #[test]
  fn energy_is_sum_times_duration() {
    assert_eq!(produced_energy(&reports(&[10.0, 20.0, 30.0]), Some(10)), Some(600.0));
  }

  #[test]
  fn energy_without_duration_is_none() {
    assert_eq!(produced_energy(&reports(&[10.0]), None), None);
  }

  #[test]
  fn energy_of_empty_set_is_zero() {
    assert_eq!(produced_energy(&[], Some(15)), Some(0.0));
  }

  #[test]
  fn empty_timeline_is_single_zero_point() {
    assert_eq!(timeline_page(&[], Some(1)), vec![TimelinePoint::ZERO]);
    assert_eq!(timeline_page(&[], Some(9)), vec![TimelinePoint::ZERO]);
  }

  #[test]
  fn first_page_keeps_order() {
    let page = timeline_page(&reports(&[5.0, 4.0, 3.0, 2.0, 1.0]), Some(1));
    let produced: Vec<f64> = page.iter().map(|p| p.produced_wattage).collect();
    assert_eq!(produced, vec![5.0, 4.0, 3.0, 2.0, 1.0]);
    assert_eq!(page[0].household_wattage, 2.5);
  }

  #[test]
  fn pages_are_sliced() {
    let all: Vec<f64> = (0..130).map(f64::from).collect();
    let rs = reports(&all);

    let first = timeline_page(&rs, Some(1));
    assert_eq!(first.len(), TIMELINE_PAGE_SIZE);
    assert_eq!(first[0].produced_wattage, 0.0);

    let third = timeline_page(&rs, Some(3));
    assert_eq!(third.len(), 10);
    assert_eq!(third[0].produced_wattage, 120.0);

    assert!(timeline_page(&rs, Some(4)).is_empty());
  }

  #[test]
  fn missing_and_zero_page_behave_like_first() {
    let rs = reports(&[1.0, 2.0]);
    assert_eq!(timeline_page(&rs, None).len(), 2);
    assert_eq!(timeline_page(&rs, Some(0)).len(), 2);
  }

  #[test]
  fn huge_page_does_not_overflow() {
    assert!(timeline_page(&reports(&[1.0]), Some(i64::MAX)).is_empty());
  }
}
