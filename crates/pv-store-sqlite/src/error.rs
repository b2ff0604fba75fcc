//! Error type for `pv-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// An update targeted an installation row that does not exist.
  #[error("installation not found: {0}")]
  InstallationNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
