use postgres::types::ToSql;
use postgres::{Client, NoTls};
use crate::db::backend::{BackendError, Connection, Execute, ScannedRow, Transaction};

pub fn connect(dsn: &str) -> Result<Client, BackendError> {
    Ok(Client::connect(dsn, NoTls)?)
}

#[inline]
fn bind<'a>(params: &'a [&'a str]) -> Vec<&'a (dyn ToSql + Sync)> {
    params.iter()
        .map(|param| param as &(dyn ToSql + Sync))
        .collect()
}

impl Execute for Client {
    fn execute(&mut self, sql: &str, params: &[&str]) -> Result<u64, BackendError> {
        Ok(Client::execute(self, sql, &bind(params))?)
    }

    fn batch_execute(&mut self, sql: &str) -> Result<(), BackendError> {
        Ok(Client::batch_execute(self, sql)?)
    }
}

impl Connection for Client {
    fn ping(&mut self) -> Result<(), BackendError> {
        Client::simple_query(self, "SELECT 1")?;
        Ok(())
    }

    fn query_column(&mut self, sql: &str) -> Result<Vec<ScannedRow>, BackendError> {
        let rows = Client::query(self, sql, &[])?;
        Ok(rows.iter()
            .map(|row| row.try_get::<_, String>(0).map_err(BackendError::from))
            .collect())
    }

    fn begin(&mut self) -> Result<Box<dyn Transaction + '_>, BackendError> {
        let tx = Client::transaction(self)?;
        Ok(Box::new(tx))
    }

    fn close(self: Box<Self>) -> Result<(), BackendError> {
        Ok(Client::close(*self)?)
    }
}

impl Execute for postgres::Transaction<'_> {
    fn execute(&mut self, sql: &str, params: &[&str]) -> Result<u64, BackendError> {
        Ok(postgres::Transaction::execute(self, sql, &bind(params))?)
    }

    fn batch_execute(&mut self, sql: &str) -> Result<(), BackendError> {
        Ok(postgres::Transaction::batch_execute(self, sql)?)
    }
}

impl Transaction for postgres::Transaction<'_> {
    fn commit(self: Box<Self>) -> Result<(), BackendError> {
        Ok(postgres::Transaction::commit(*self)?)
    }

    fn rollback(self: Box<Self>) -> Result<(), BackendError> {
        Ok(postgres::Transaction::rollback(*self)?)
    }
}
