//! Installation — a registered physical PV system.
//!
//! Installations are never deleted. The only mutation after creation is
//! deactivation, which flips `is_active` from `true` to `false` and never back.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MAX_ADDRESS_LEN:    usize = 1024;
pub const MAX_OWNER_NAME_LEN: usize = 512;
pub const MAX_COMMENTS_LEN:   usize = 1024;

/// A persisted installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PvInstallation {
  pub id:         i64,
  pub longitude:  f64,
  pub latitude:   f64,
  pub address:    String,
  pub owner_name: String,
  pub is_active:  bool,
  pub comments:   Option<String>,
}

impl PvInstallation {
  /// Mark the installation inactive and return the previous `is_active`
  /// value. Calling this on an inactive installation is a no-op.
  pub fn deactivate(&mut self) -> bool {
    std::mem::replace(&mut self.is_active, false)
  }
}

/// Input for registering a new installation. The store assigns the id and
/// sets `is_active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInstallation {
  pub longitude:  f64,
  pub latitude:   f64,
  pub address:    String,
  pub owner_name: String,
  #[serde(default)]
  pub comments:   Option<String>,
}

impl NewInstallation {
  /// Check every field against its constraint, stopping at the first failure.
  ///
  /// Order: longitude, latitude, address, owner name, comments.
  pub fn validate(&self) -> Result<(), ValidationError> {
    if !(-180.0..=180.0).contains(&self.longitude) {
      return Err(ValidationError::new(
        "longitude",
        "longitude must be between -180 and 180",
      ));
    }
    if !(-90.0..=90.0).contains(&self.latitude) {
      return Err(ValidationError::new(
        "latitude",
        "latitude must be between -90 and 90",
      ));
    }
    if self.address.chars().count() > MAX_ADDRESS_LEN {
      return Err(ValidationError::new(
        "address",
        format!("address must be at most {MAX_ADDRESS_LEN} characters"),
      ));
    }
    if self.owner_name.chars().count() > MAX_OWNER_NAME_LEN {
      return Err(ValidationError::new(
        "ownerName",
        format!("ownerName must be at most {MAX_OWNER_NAME_LEN} characters"),
      ));
    }
    if let Some(comments) = &self.comments
      && comments.chars().count() > MAX_COMMENTS_LEN
    {
      return Err(ValidationError::new(
        "comments",
        format!("comments must be at most {MAX_COMMENTS_LEN} characters"),
      ));
    }
    Ok(())
  }
}
