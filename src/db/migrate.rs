use tracing::{debug, info, warn};
use crate::db::backend::{Connection, Transaction};
use crate::db::migration::{DirectEffects, Effects, Migration, TxEffects};
use crate::db::{versions, Dialect, Direction};
use crate::error::{Error, Result};

/// Runs one migration step and updates the version table.
///
/// Transactional migrations run their effect and the bookkeeping write in one
/// transaction, even when no effect exists for `direction`. Direct migrations
/// run on the connection itself, so a failed bookkeeping write leaves the
/// effect applied with no recorded version. Migrations without effects are
/// a no-op and do not touch the version table.
pub fn migrate(
    conn: &mut dyn Connection,
    dialect: Dialect,
    direction: Direction,
    migration: &Migration,
) -> Result<()> {
    let statement = versions::bookkeeping_statement(dialect, direction);
    match migration.effects() {
        Effects::Transactional(effects) => migrate_tx(conn, &statement, direction, migration.id(), effects),
        Effects::Direct(effects) => migrate_direct(conn, &statement, direction, migration.id(), effects),
        Effects::None => {
            debug!(id = migration.id(), %direction, "migration has no effects, skipping");
            Ok(())
        }
    }
}

fn migrate_tx(
    conn: &mut dyn Connection,
    statement: &str,
    direction: Direction,
    id: &str,
    effects: &TxEffects,
) -> Result<()> {
    let mut tx = conn.begin().map_err(Error::Begin)?;

    let applied = apply_tx(tx.as_mut(), statement, direction, id, effects);

    match applied {
        Ok(()) => {
            tx.commit().map_err(Error::Commit)?;
            info!(id, %direction, "migrated");
            Ok(())
        }
        Err(cause) => {
            warn!(id, %direction, error = %cause, "migration failed, rolling back");
            match tx.rollback() {
                Ok(()) => Err(cause),
                Err(rollback) => Err(Error::Rollback { rollback, cause: Box::new(cause) }),
            }
        }
    }
}

fn apply_tx(
    tx: &mut dyn Transaction,
    statement: &str,
    direction: Direction,
    id: &str,
    effects: &TxEffects,
) -> Result<()> {
    if let Some(effect) = effects.get(direction) {
        debug!(id, %direction, "running migration in transaction");
        effect.apply(tx)
            .map_err(|source| Error::Effect { id: id.to_owned(), source })?;
    }
    tx.execute(statement, &[id])
        .map_err(Error::Bookkeeping)?;
    Ok(())
}

fn migrate_direct(
    conn: &mut dyn Connection,
    statement: &str,
    direction: Direction,
    id: &str,
    effects: &DirectEffects,
) -> Result<()> {
    if let Some(effect) = effects.get(direction) {
        debug!(id, %direction, "running migration on connection");
        effect.apply(conn)
            .map_err(|source| Error::Effect { id: id.to_owned(), source })?;
    }

    // no transaction here: the effect stays applied if this write fails
    if let Err(e) = conn.execute(statement, &[id]) {
        warn!(id, %direction, error = %e, "migration applied but its version was not recorded");
        return Err(Error::Bookkeeping(e));
    }
    info!(id, %direction, "migrated");
    Ok(())
}
