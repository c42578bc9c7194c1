//! SQLite import side of the toolkit.

pub mod routes;
pub mod stops;

use std::path::Path;

use rusqlite::Connection;

use crate::error::Error;

/// Opens the target database with foreign key enforcement on. The final
/// database ships with foreign keys, so imports run under the same rules.
pub fn open(path: &Path) -> Result<Connection, Error> {
    let conn = Connection::open(path)?;
    conn.pragma_update(None, "foreign_keys", true)?;
    Ok(conn)
}
