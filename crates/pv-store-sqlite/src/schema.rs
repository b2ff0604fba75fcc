//! SQL schema for the SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS pv_installations (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    longitude   REAL    NOT NULL,
    latitude    REAL    NOT NULL,
    address     TEXT    NOT NULL CHECK (length(address) <= 1024),
    owner_name  TEXT    NOT NULL CHECK (length(owner_name) <= 512),
    is_active   INTEGER NOT NULL,
    comments    TEXT             CHECK (length(comments) <= 1024)
);

-- Reports are append-only; the timestamp is fixed at insert.
CREATE TABLE IF NOT EXISTS production_reports (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp           TEXT NOT NULL,   -- RFC 3339 UTC, fixed-width nanos
    produced_wattage    REAL NOT NULL,
    household_wattage   REAL NOT NULL,
    battery_wattage     REAL NOT NULL,
    grid_wattage        REAL NOT NULL,
    pv_installation_id  INTEGER REFERENCES pv_installations(id)
);

-- Audit trail; never updated or deleted.
CREATE TABLE IF NOT EXISTS installation_logs (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp       TEXT NOT NULL,
    action          TEXT NOT NULL,
    previous_value  TEXT,
    new_value       TEXT
);

CREATE INDEX IF NOT EXISTS production_reports_installation_idx
    ON production_reports(pv_installation_id);

PRAGMA user_version = 1;
";
