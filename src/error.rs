use thiserror::Error;
use crate::db::backend::BackendError;
use crate::db::Direction;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("error opening database: {0}")]
    Open(#[source] BackendError),
    #[error("error pinging database: {0}")]
    Ping(#[source] BackendError),
    #[error("error creating migration versions table: {0}")]
    Schema(#[source] BackendError),
    #[error("error reading migration versions: {0}")]
    Query(#[source] BackendError),
    /// A row could not be read. `partial` holds the versions read before it.
    #[error("error scanning migration version after {} rows: {source}", .partial.len())]
    Scan {
        partial: Vec<String>,
        #[source]
        source: BackendError,
    },
    #[error("error beginning transaction: {0}")]
    Begin(#[source] BackendError),
    #[error("error executing migration: {source}")]
    Effect {
        id: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("error updating migration versions: {0}")]
    Bookkeeping(#[source] BackendError),
    #[error("error committing migration: {0}")]
    Commit(#[source] BackendError),
    /// Rolling back failed after `cause`; both are reported.
    #[error("error rolling back: {rollback}\n{cause}")]
    Rollback {
        rollback: BackendError,
        #[source]
        cause: Box<Error>,
    },
    #[error("error closing database: {0}")]
    Close(#[source] BackendError),
    #[error("duplicate migration {id:?}")]
    DuplicateMigration {
        id: String,
    },
    #[error("applied version {id:?} has no known migration")]
    UnknownVersion {
        id: String,
    },
    #[error("migrating {direction} stopped at {failed:?} after {} completed: {source}", .completed.len())]
    Run {
        direction: Direction,
        completed: Vec<String>,
        failed: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Rows read before a scan failure, if this is one.
    pub fn partial_versions(&self) -> Option<&[String]> {
        match self {
            Self::Scan { partial, .. } => Some(partial),
            _ => None,
        }
    }
}
