use tracing::{debug, info};
use crate::db::backend::{self, Connection};
use crate::db::{migrate, versions, Dialect, Direction, Migration};
use crate::error::{Error, Result};

/// Owns the database connection and applies single migration steps.
///
/// Deciding which migrations run, and in which order, is left to the caller
/// (see [`crate::db::Migrator`]). A driver does no locking of its own; only
/// one migration run may use a database at a time.
pub struct Driver {
    conn: Box<dyn Connection>,
    dialect: Dialect,
}

impl Driver {
    /// Connects with the driver registered as `name`, pings, and makes sure the
    /// version table exists.
    pub fn open(name: &str, dsn: &str) -> Result<Self> {
        let dialect = Dialect::from_name(name);
        debug!(driver = name, %dialect, "opening database");
        let conn = backend::open(name, dsn).map_err(Error::Open)?;
        Self::from_connection(dialect, conn)
    }

    pub fn from_connection(dialect: Dialect, mut conn: Box<dyn Connection>) -> Result<Self> {
        conn.ping().map_err(Error::Ping)?;
        versions::ensure_schema(conn.as_mut())?;
        info!(%dialect, "migration driver ready");
        Ok(Self { conn, dialect })
    }

    #[inline]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Raw access to the underlying connection.
    #[inline]
    pub fn connection(&mut self) -> &mut dyn Connection {
        self.conn.as_mut()
    }

    /// Applied versions, highest first.
    pub fn versions(&mut self) -> Result<Vec<String>> {
        versions::list_versions(self.conn.as_mut())
    }

    pub fn migrate(&mut self, direction: Direction, migration: &Migration) -> Result<()> {
        migrate::migrate(self.conn.as_mut(), self.dialect, direction, migration)
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(Error::Close)
    }
}
