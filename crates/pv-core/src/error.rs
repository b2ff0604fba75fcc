//! Error types for `pv-core`.

use thiserror::Error;

/// A single field that failed its declared constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
  /// JSON name of the offending field.
  pub field:   &'static str,
  pub message: String,
}

impl ValidationError {
  pub fn new(field: &'static str, message: impl Into<String>) -> Self {
    Self { field, message: message.into() }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("installation not found: {0}")]
  InstallationNotFound(i64),

  #[error("invalid input: {0}")]
  Invalid(#[from] ValidationError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
