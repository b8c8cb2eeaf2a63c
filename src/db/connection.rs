use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::AgencyError;

use super::migrations;

const DATA_DIR_NAME: &str = ".agencydesk";

/// Resolve the data directory: explicit home first, then `./.agencydesk`.
pub fn data_dir(home: Option<&Path>) -> Result<PathBuf, AgencyError> {
    match home {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(env::current_dir()?.join(DATA_DIR_NAME)),
    }
}

/// Get the path to the agencydesk database.
pub fn db_path(home: Option<&Path>) -> Result<PathBuf, AgencyError> {
    Ok(data_dir(home)?.join("agencydesk.db"))
}

/// Get the config file path.
pub fn config_path(home: Option<&Path>) -> Result<PathBuf, AgencyError> {
    Ok(data_dir(home)?.join("config.json"))
}

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db(home: Option<&Path>) -> Result<Connection, AgencyError> {
    let path = db_path(home)?;
    if !path.exists() {
        return Err(AgencyError::not_initialized());
    }
    tracing::debug!(path = %path.display(), "opening database");
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Initialize the database: create directories, database, and run migrations.
pub fn init_db(home: Option<&Path>) -> Result<PathBuf, AgencyError> {
    let path = db_path(home)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    tracing::info!(path = %path.display(), "database initialized");
    Ok(path)
}

/// Fresh migrated database held in memory.
pub fn open_in_memory() -> Result<Connection, AgencyError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<(), AgencyError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}
