//! Database connection management
//!
//! Provides utilities for opening and managing SQLite connections

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection with optimal settings
pub fn configure(conn: &Connection) -> Result<()> {
    // Enforce foreign keys; off by default in SQLite
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;

    // WAL mode for better concurrency
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(from_rusqlite)?;

    Ok(())
}

/// Resolve a database URI to a filesystem path
///
/// Accepts `sqlite:///path`, `sqlite://path`, `sqlite:path`, or a bare path,
/// so a `DB_URI` written for other tooling keeps working.
pub fn path_from_uri(uri: &str) -> String {
    let stripped = uri
        .strip_prefix("sqlite:///")
        .or_else(|| uri.strip_prefix("sqlite://"))
        .or_else(|| uri.strip_prefix("sqlite:"))
        .unwrap_or(uri);
    stripped.to_string()
}
