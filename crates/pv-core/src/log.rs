//! Audit log entries for installation mutations.
//!
//! Every write to an installation appends exactly one entry, in the same
//! transaction as the write. Entries are never updated or deleted. Values are
//! JSON objects that always carry the installation `id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::installation::PvInstallation;

pub const ACTION_CREATE:     &str = "create";
pub const ACTION_DEACTIVATE: &str = "deactivate";

/// A persisted audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationLog {
  pub id:             i64,
  pub timestamp:      DateTime<Utc>,
  pub action:         String,
  pub previous_value: Option<String>,
  pub new_value:      Option<String>,
}

/// An entry waiting to be appended. The store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInstallationLog {
  pub action:         String,
  pub previous_value: Option<String>,
  pub new_value:      Option<String>,
}

impl NewInstallationLog {
  /// Entry for a freshly registered installation; `new_value` holds the
  /// stored record.
  pub fn created(installation: &PvInstallation) -> Self {
    let record = json!({
      "id":        installation.id,
      "longitude": installation.longitude,
      "latitude":  installation.latitude,
      "address":   installation.address,
      "ownerName": installation.owner_name,
      "isActive":  installation.is_active,
      "comments":  installation.comments,
    });
    Self {
      action:         ACTION_CREATE.to_owned(),
      previous_value: None,
      new_value:      Some(record.to_string()),
    }
  }

  /// Entry for a deactivation of installation `id`. `was_active` is the
  /// value of `is_active` before the write.
  pub fn deactivated(id: i64, was_active: bool) -> Self {
    Self {
      action:         ACTION_DEACTIVATE.to_owned(),
      previous_value: Some(json!({ "id": id, "isActive": was_active }).to_string()),
      new_value:      Some(json!({ "id": id, "isActive": false }).to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::Value;

  use super::*;

  fn parse(value: Option<&str>) -> Value {
    serde_json::from_str(value.unwrap()).unwrap()
  }

  #[test]
  fn created_entry_embeds_installation_json() {
    let inst = PvInstallation {
      id:         7,
      longitude:  1.5,
      latitude:   -2.5,
      address:    "Somewhere 1".into(),
      owner_name: "Owner".into(),
      is_active:  true,
      comments:   Some("roof".into()),
    };
    let entry = NewInstallationLog::created(&inst);
    assert_eq!(entry.action, ACTION_CREATE);
    assert!(entry.previous_value.is_none());

    let json = parse(entry.new_value.as_deref());
    assert_eq!(json["id"], 7);
    assert_eq!(json["ownerName"], "Owner");
    assert_eq!(json["isActive"], true);
    assert_eq!(json["comments"], "roof");
  }

  #[test]
  fn deactivated_entry_names_the_installation() {
    let entry = NewInstallationLog::deactivated(7, true);
    assert_eq!(entry.action, ACTION_DEACTIVATE);
    assert_eq!(parse(entry.previous_value.as_deref()), json!({ "id": 7, "isActive": true }));
    assert_eq!(parse(entry.new_value.as_deref()), json!({ "id": 7, "isActive": false }));

    let repeat = NewInstallationLog::deactivated(7, false);
    assert_eq!(parse(repeat.previous_value.as_deref())["isActive"], false);
  }
}
