//! A schema-migration engine.
//!
//! [`Driver`] owns one database connection and moves single migrations up or
//! down, keeping a table of applied versions in step with what ran:
//!
//! ```no_run
//! use migrator::{Direction, Driver, Migration, TxEffects};
//!
//! # fn main() -> migrator::Result<()> {
//! let mut driver = Driver::open("sqlite", "app.db")?;
//! let users = Migration::new(
//!     "20240101000000_users",
//!     TxEffects::new()
//!         .up(|tx| Ok(tx.batch_execute("CREATE TABLE users (id INTEGER PRIMARY KEY)")?))
//!         .down(|tx| Ok(tx.batch_execute("DROP TABLE users")?)),
//! );
//! driver.migrate(Direction::Up, &users)?;
//! assert_eq!(driver.versions()?, ["20240101000000_users"]);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod error;

pub use db::{Dialect, DirectEffects, Direction, Driver, Effects, Migration, Migrator, TxEffects};
pub use error::{Error, Result};
