use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("unknown database driver {name:?} (forgotten import?)")]
    UnknownDriver {
        name: String,
    },
    #[error(transparent)]
    Postgres(#[from] postgres::Error),
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("{0}")]
    Custom(String),
}

impl<'a> From<&'a str> for BackendError {
    #[inline]
    fn from(value: &'a str) -> Self {
        Self::Custom(value.to_owned())
    }
}

impl From<String> for BackendError {
    #[inline]
    fn from(value: String) -> Self {
        Self::Custom(value)
    }
}

/// A single-column row as read by [`Connection::query_column`].
pub type ScannedRow = Result<String, BackendError>;

/// Statement execution shared by connections and transactions.
pub trait Execute {
    /// Runs one parameterized statement and returns the number of affected rows.
    fn execute(&mut self, sql: &str, params: &[&str]) -> Result<u64, BackendError>;

    /// Runs a batch of statements separated by `;`. No parameters.
    fn batch_execute(&mut self, sql: &str) -> Result<(), BackendError>;
}

pub trait Transaction: Execute {
    fn commit(self: Box<Self>) -> Result<(), BackendError>;
    fn rollback(self: Box<Self>) -> Result<(), BackendError>;
}

pub trait Connection: Execute {
    fn ping(&mut self) -> Result<(), BackendError>;

    /// Reads the first column of every row as a string.
    ///
    /// The outer error reports a failed query. Each row carries its own
    /// scan result so a caller can keep what was read before a bad row.
    fn query_column(&mut self, sql: &str) -> Result<Vec<ScannedRow>, BackendError>;

    fn begin(&mut self) -> Result<Box<dyn Transaction + '_>, BackendError>;

    fn close(self: Box<Self>) -> Result<(), BackendError>;
}
