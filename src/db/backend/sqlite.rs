use rusqlite::params_from_iter;
use crate::db::backend::{BackendError, Connection, Execute, ScannedRow, Transaction};

/// Opens a database file, `:memory:` gives a private in-memory database.
pub fn connect(dsn: &str) -> Result<rusqlite::Connection, BackendError> {
    Ok(rusqlite::Connection::open(dsn)?)
}

impl Execute for rusqlite::Connection {
    fn execute(&mut self, sql: &str, params: &[&str]) -> Result<u64, BackendError> {
        let changed = rusqlite::Connection::execute(self, sql, params_from_iter(params))?;
        Ok(changed as u64)
    }

    fn batch_execute(&mut self, sql: &str) -> Result<(), BackendError> {
        Ok(rusqlite::Connection::execute_batch(self, sql)?)
    }
}

impl Connection for rusqlite::Connection {
    fn ping(&mut self) -> Result<(), BackendError> {
        rusqlite::Connection::query_row(self, "SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    fn query_column(&mut self, sql: &str) -> Result<Vec<ScannedRow>, BackendError> {
        let mut stmt = rusqlite::Connection::prepare(self, sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?
            .map(|row| row.map_err(BackendError::from))
            .collect::<Vec<_>>();
        Ok(rows)
    }

    fn begin(&mut self) -> Result<Box<dyn Transaction + '_>, BackendError> {
        let tx = rusqlite::Connection::transaction(self)?;
        Ok(Box::new(tx))
    }

    fn close(self: Box<Self>) -> Result<(), BackendError> {
        rusqlite::Connection::close(*self).map_err(|(_, e)| e.into())
    }
}

impl Execute for rusqlite::Transaction<'_> {
    fn execute(&mut self, sql: &str, params: &[&str]) -> Result<u64, BackendError> {
        let changed = rusqlite::Connection::execute(self, sql, params_from_iter(params))?;
        Ok(changed as u64)
    }

    fn batch_execute(&mut self, sql: &str) -> Result<(), BackendError> {
        Ok(rusqlite::Connection::execute_batch(self, sql)?)
    }
}

impl Transaction for rusqlite::Transaction<'_> {
    fn commit(self: Box<Self>) -> Result<(), BackendError> {
        Ok(rusqlite::Transaction::commit(*self)?)
    }

    fn rollback(self: Box<Self>) -> Result<(), BackendError> {
        Ok(rusqlite::Transaction::rollback(*self)?)
    }
}
