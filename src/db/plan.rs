use hashbrown::{HashMap, HashSet};
use tracing::info;
use crate::db::{Direction, Driver, Migration};
use crate::error::{Error, Result};

/// Migrations to run in one direction, in execution order.
#[derive(Debug)]
pub struct Plan<'a> {
    pub direction: Direction,
    pub steps: Vec<&'a Migration>,
}

impl<'a> Plan<'a> {
    /// Every migration not yet applied, lowest id first.
    pub fn up(migrations: &'a [Migration], applied: &[String]) -> Self {
        let applied = applied.iter()
            .map(String::as_str)
            .collect::<HashSet<_>>();

        let mut steps = migrations.iter()
            .filter(|m| !applied.contains(m.id()))
            .collect::<Vec<_>>();
        steps.sort_by(|a, b| a.id().cmp(b.id()));

        Self { direction: Direction::Up, steps }
    }

    /// The `count` most recently applied migrations, highest id first.
    pub fn down(migrations: &'a [Migration], applied: &[String], count: usize) -> Result<Self> {
        let known = migrations.iter()
            .map(|m| (m.id(), m))
            .collect::<HashMap<_, _>>();

        let mut applied = applied.iter().collect::<Vec<_>>();
        applied.sort_by(|a, b| b.cmp(a));

        let steps = applied.into_iter()
            .take(count)
            .map(|id| known.get(id.as_str())
                .copied()
                .ok_or_else(|| Error::UnknownVersion { id: id.clone() }))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { direction: Direction::Down, steps })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Outcome of a successful [`Migrator`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub direction: Direction,
    pub migrated: Vec<String>,
}

/// Runs a known set of migrations through a [`Driver`], one step at a time.
pub struct Migrator {
    driver: Driver,
    migrations: Vec<Migration>,
}

impl Migrator {
    pub fn new(driver: Driver, mut migrations: Vec<Migration>) -> Result<Self> {
        migrations.sort_by(|a, b| a.id().cmp(b.id()));
        if let Some(pair) = migrations.windows(2).find(|pair| pair[0].id() == pair[1].id()) {
            return Err(Error::DuplicateMigration { id: pair[0].id().to_owned() });
        }
        Ok(Self { driver, migrations })
    }

    #[inline]
    pub fn driver(&mut self) -> &mut Driver {
        &mut self.driver
    }

    #[inline]
    pub fn into_driver(self) -> Driver {
        self.driver
    }

    /// Ids of migrations that [`Migrator::up`] would apply.
    pub fn pending(&mut self) -> Result<Vec<String>> {
        let applied = self.driver.versions()?;
        Ok(Plan::up(&self.migrations, &applied).steps
            .into_iter()
            .map(|m| m.id().to_owned())
            .collect())
    }

    /// Applies every pending migration, stopping at the first failure.
    pub fn up(&mut self) -> Result<Report> {
        let applied = self.driver.versions()?;
        let plan = Plan::up(&self.migrations, &applied);
        run(&mut self.driver, plan)
    }

    /// Reverts the `count` most recently applied migrations.
    pub fn down(&mut self, count: usize) -> Result<Report> {
        let applied = self.driver.versions()?;
        let plan = Plan::down(&self.migrations, &applied, count)?;
        run(&mut self.driver, plan)
    }
}

fn run(driver: &mut Driver, plan: Plan) -> Result<Report> {
    let direction = plan.direction;
    let mut migrated = Vec::with_capacity(plan.steps.len());
    for migration in plan.steps {
        if let Err(e) = driver.migrate(direction, migration) {
            return Err(Error::Run {
                direction,
                completed: migrated,
                failed: migration.id().to_owned(),
                source: Box::new(e),
            });
        }
        migrated.push(migration.id().to_owned());
    }
    info!(%direction, count = migrated.len(), "migration run finished");
    Ok(Report { direction, migrated })
}
