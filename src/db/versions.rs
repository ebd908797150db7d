//! The version table: one row per applied migration id, nothing else.

use tracing::debug;
use crate::db::backend::Connection;
use crate::db::{Dialect, Direction};
use crate::error::{Error, Result};

pub const TABLE_NAME: &str = "schema_migrations";

pub fn create_statement() -> String {
    format!("CREATE TABLE IF NOT EXISTS {TABLE_NAME} (version VARCHAR(255) NOT NULL PRIMARY KEY)")
}

pub fn list_statement() -> String {
    format!("SELECT version FROM {TABLE_NAME} ORDER BY version DESC")
}

pub fn insert_statement(dialect: Dialect) -> String {
    format!("INSERT INTO {TABLE_NAME} (version) VALUES ({})", dialect.placeholder(1))
}

pub fn delete_statement(dialect: Dialect) -> String {
    format!("DELETE FROM {TABLE_NAME} WHERE version = {}", dialect.placeholder(1))
}

/// Statement recording a migration as applied (up) or reverted (down).
pub fn bookkeeping_statement(dialect: Dialect, direction: Direction) -> String {
    match direction {
        Direction::Up => insert_statement(dialect),
        Direction::Down => delete_statement(dialect),
    }
}

/// Creates the version table if it is missing. Safe to call on every start.
pub fn ensure_schema(conn: &mut dyn Connection) -> Result<()> {
    debug!(table = TABLE_NAME, "ensuring migration versions table");
    conn.execute(&create_statement(), &[])
        .map_err(Error::Schema)?;
    Ok(())
}

/// Applied versions, highest first.
pub fn list_versions(conn: &mut dyn Connection) -> Result<Vec<String>> {
    let rows = conn.query_column(&list_statement())
        .map_err(Error::Query)?;

    let mut versions = Vec::with_capacity(rows.len());
    for row in rows {
        match row {
            Ok(version) => versions.push(version),
            Err(source) => return Err(Error::Scan { partial: versions, source }),
        }
    }
    Ok(versions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookkeeping_uses_the_dialect_placeholder() {
        assert_eq!(
            bookkeeping_statement(Dialect::Postgres, Direction::Up),
            "INSERT INTO schema_migrations (version) VALUES ($1)",
        );
        assert_eq!(
            bookkeeping_statement(Dialect::Postgres, Direction::Down),
            "DELETE FROM schema_migrations WHERE version = $1",
        );
        assert_eq!(
            bookkeeping_statement(Dialect::Generic, Direction::Up),
            "INSERT INTO schema_migrations (version) VALUES (?)",
        );
    }

    #[test]
    fn schema_is_a_single_keyed_column() {
        assert_eq!(
            create_statement(),
            "CREATE TABLE IF NOT EXISTS schema_migrations (version VARCHAR(255) NOT NULL PRIMARY KEY)",
        );
        assert_eq!(list_statement(), "SELECT version FROM schema_migrations ORDER BY version DESC");
    }
}
