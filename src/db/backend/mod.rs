mod connection;
pub mod postgres;
pub mod sqlite;

pub use connection::{BackendError, Connection, Execute, ScannedRow, Transaction};

/// Opens a connection through the driver registered under `name`.
pub fn open(name: &str, dsn: &str) -> Result<Box<dyn Connection>, BackendError> {
    match name {
        "postgres" | "postgresql" => Ok(Box::new(postgres::connect(dsn)?)),
        "sqlite" | "sqlite3" => Ok(Box::new(sqlite::connect(dsn)?)),
        _ => Err(BackendError::UnknownDriver { name: name.to_owned() }),
    }
}
