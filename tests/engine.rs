use anyhow::bail;
use migrator::db::backend::Connection;
use migrator::{DirectEffects, Direction, Driver, Effects, Error, Migration, TxEffects};

fn memory() -> Driver {
    Driver::open("sqlite", ":memory:").unwrap()
}

fn column(driver: &mut Driver, sql: &str) -> Vec<String> {
    driver.connection()
        .query_column(sql)
        .unwrap()
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn probe(driver: &mut Driver) -> Vec<String> {
    column(driver, "SELECT name FROM probe ORDER BY name")
}

fn create_probe(conn: &mut dyn Connection) {
    conn.batch_execute("CREATE TABLE probe (name TEXT NOT NULL)").unwrap();
}

fn empty(id: &str) -> Migration {
    Migration::new(id, TxEffects::new())
}

#[test]
fn fresh_database_has_no_versions() {
    let mut driver = memory();
    assert_eq!(driver.versions().unwrap(), Vec::<String>::new());
}

#[test]
fn schema_init_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.db");
    let path = path.to_str().unwrap();

    let mut first = Driver::open("sqlite", path).unwrap();
    first.migrate(Direction::Up, &empty("0001")).unwrap();
    first.close().unwrap();

    let mut second = Driver::open("sqlite", path).unwrap();
    let tables = column(
        &mut second,
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'schema_migrations'",
    );
    assert_eq!(tables, ["schema_migrations"]);
    assert_eq!(second.versions().unwrap(), ["0001"]);
}

#[test]
fn versions_are_listed_highest_first() {
    let mut driver = memory();
    for id in ["0001", "0003", "0002"] {
        driver.migrate(Direction::Up, &empty(id)).unwrap();
    }
    assert_eq!(driver.versions().unwrap(), ["0003", "0002", "0001"]);
}

#[test]
fn up_records_once_and_down_removes() {
    let mut driver = memory();
    create_probe(driver.connection());

    let migration = Migration::new(
        "0001",
        TxEffects::new()
            .up(|tx| {
                tx.execute("INSERT INTO probe (name) VALUES (?)", &["up"])?;
                Ok(())
            })
            .down(|tx| {
                tx.execute("DELETE FROM probe WHERE name = ?", &["up"])?;
                Ok(())
            }),
    );

    driver.migrate(Direction::Up, &migration).unwrap();
    assert_eq!(driver.versions().unwrap(), ["0001"]);
    assert_eq!(probe(&mut driver), ["up"]);

    driver.migrate(Direction::Down, &migration).unwrap();
    assert!(driver.versions().unwrap().is_empty());
    assert!(probe(&mut driver).is_empty());
}

#[test]
fn round_trip_restores_previous_versions() {
    let mut driver = memory();
    driver.migrate(Direction::Up, &empty("0001")).unwrap();
    let before = driver.versions().unwrap();

    let migration = Migration::new(
        "0002",
        TxEffects::new()
            .up(|tx| Ok(tx.batch_execute("CREATE TABLE widgets (id INTEGER PRIMARY KEY)")?))
            .down(|tx| Ok(tx.batch_execute("DROP TABLE widgets")?)),
    );
    driver.migrate(Direction::Up, &migration).unwrap();
    assert_eq!(driver.versions().unwrap(), ["0002", "0001"]);

    driver.migrate(Direction::Down, &migration).unwrap();
    assert_eq!(driver.versions().unwrap(), before);
}

#[test]
fn failed_effect_rolls_back_everything() {
    let mut driver = memory();
    create_probe(driver.connection());

    let migration = Migration::new(
        "0001",
        TxEffects::new().up(|tx| {
            tx.execute("INSERT INTO probe (name) VALUES (?)", &["partial"])?;
            bail!("boom")
        }),
    );

    let err = driver.migrate(Direction::Up, &migration).unwrap_err();
    assert!(matches!(err, Error::Effect { ref id, .. } if id == "0001"));
    assert_eq!(err.to_string(), "error executing migration: boom");

    assert!(driver.versions().unwrap().is_empty());
    assert!(probe(&mut driver).is_empty());
}

#[test]
fn failed_bookkeeping_rolls_back_the_effect() {
    let mut driver = memory();
    create_probe(driver.connection());

    let migration = Migration::new(
        "0001",
        TxEffects::new().up(|tx| {
            tx.execute("INSERT INTO probe (name) VALUES (?)", &["applied"])?;
            Ok(())
        }),
    );
    driver.migrate(Direction::Up, &migration).unwrap();

    // the version row already exists, so the second insert violates the key
    let err = driver.migrate(Direction::Up, &migration).unwrap_err();
    assert!(matches!(err, Error::Bookkeeping(_)));
    assert!(err.to_string().starts_with("error updating migration versions: "));

    assert_eq!(driver.versions().unwrap(), ["0001"]);
    assert_eq!(probe(&mut driver), ["applied"]);
}

#[test]
fn transactional_migration_without_a_down_effect_still_forgets_its_version() {
    let mut driver = memory();
    create_probe(driver.connection());

    let migration = Migration::new(
        "0001",
        TxEffects::new().up(|tx| {
            tx.execute("INSERT INTO probe (name) VALUES (?)", &["kept"])?;
            Ok(())
        }),
    );
    driver.migrate(Direction::Up, &migration).unwrap();
    driver.migrate(Direction::Down, &migration).unwrap();

    assert!(driver.versions().unwrap().is_empty());
    assert_eq!(probe(&mut driver), ["kept"]);
}

#[test]
fn migration_without_effects_is_a_noop() {
    let mut driver = memory();
    driver.migrate(Direction::Up, &empty("0001")).unwrap();

    let noop = Migration::new("0002", Effects::None);
    driver.migrate(Direction::Up, &noop).unwrap();
    assert_eq!(driver.versions().unwrap(), ["0001"]);

    let noop = Migration::new("0001", Effects::None);
    driver.migrate(Direction::Down, &noop).unwrap();
    assert_eq!(driver.versions().unwrap(), ["0001"]);
}

#[test]
fn direct_migration_runs_outside_a_transaction() {
    let mut driver = memory();

    let migration = Migration::new(
        "0001",
        DirectEffects::new()
            .up(|conn| Ok(conn.batch_execute("CREATE TABLE gadgets (id INTEGER PRIMARY KEY)")?))
            .down(|conn| Ok(conn.batch_execute("DROP TABLE gadgets")?)),
    );
    driver.migrate(Direction::Up, &migration).unwrap();
    assert_eq!(driver.versions().unwrap(), ["0001"]);
    assert_eq!(
        column(&mut driver, "SELECT name FROM sqlite_master WHERE name = 'gadgets'"),
        ["gadgets"],
    );

    driver.migrate(Direction::Down, &migration).unwrap();
    assert!(driver.versions().unwrap().is_empty());
}

#[test]
fn direct_effect_failure_skips_bookkeeping() {
    let mut driver = memory();
    let migration = Migration::new("0001", DirectEffects::new().up(|_| bail!("refused")));

    let err = driver.migrate(Direction::Up, &migration).unwrap_err();
    assert_eq!(err.to_string(), "error executing migration: refused");
    assert!(driver.versions().unwrap().is_empty());
}

#[test]
fn direct_bookkeeping_failure_leaves_the_effect_applied() {
    let mut driver = memory();
    create_probe(driver.connection());
    driver.connection()
        .batch_execute(
            "CREATE TRIGGER refuse_0002 BEFORE INSERT ON schema_migrations
             WHEN NEW.version = '0002'
             BEGIN SELECT RAISE(ABORT, 'bookkeeping refused'); END;",
        )
        .unwrap();

    let migration = Migration::new(
        "0002",
        DirectEffects::new().up(|conn| {
            conn.execute("INSERT INTO probe (name) VALUES (?)", &["0002"])?;
            Ok(())
        }),
    );

    let err = driver.migrate(Direction::Up, &migration).unwrap_err();
    assert!(matches!(err, Error::Bookkeeping(_)));

    assert_eq!(probe(&mut driver), ["0002"]);
    assert!(!driver.versions().unwrap().contains(&"0002".to_owned()));
}

// SQLite sorts blobs after text, so the bad row comes first and nothing is
// read before it. Rows kept ahead of a bad one are checked in failures.rs.
#[test]
fn unreadable_version_is_a_scan_error() {
    let mut driver = memory();
    driver.connection()
        .batch_execute("INSERT INTO schema_migrations (version) VALUES (X'00FF')")
        .unwrap();

    let err = driver.versions().unwrap_err();
    assert!(matches!(err, Error::Scan { .. }));
    assert_eq!(err.partial_versions(), Some(&[][..]));
}

#[test]
fn unknown_driver_fails_to_open() {
    let err = Driver::open("oracle", "whatever").err().unwrap();
    assert!(matches!(err, Error::Open(_)));
    assert!(err.to_string().contains("oracle"));
}
