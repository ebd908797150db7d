use anyhow::Context;
use tracing_subscriber::EnvFilter;
use migrator::config::{Config, Overrides};
use migrator::{Direction, Driver, Migration, TxEffects};
use crate::cli::{CLI, Command};

mod cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = <CLI as clap::Parser>::parse();

    match &cli.command {
        Command::NewId => {
            println!("{}", new_id());
            Ok(())
        }
        Command::Init => {
            let driver = open(&cli)?;
            driver.close()?;
            Ok(())
        }
        Command::Versions => {
            let mut driver = open(&cli)?;
            for version in driver.versions()? {
                println!("{version}");
            }
            driver.close()?;
            Ok(())
        }
        Command::Record { id } => set_recorded(&cli, Direction::Up, id),
        Command::Forget { id } => set_recorded(&cli, Direction::Down, id),
    }
}

fn open(cli: &CLI) -> anyhow::Result<Driver> {
    let overrides = Overrides {
        dialect: cli.dialect.clone(),
        url: cli.url.clone(),
    };
    let config = Config::load(&cli.config, overrides)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    Driver::open(&config.dialect, &config.url)
        .with_context(|| format!("connecting to {} database", config.dialect))
}

/// Writes or deletes the version row alone; an empty transactional
/// migration still does its bookkeeping.
fn set_recorded(cli: &CLI, direction: Direction, id: &str) -> anyhow::Result<()> {
    let mut driver = open(cli)?;
    let migration = Migration::new(id, TxEffects::new());
    driver.migrate(direction, &migration)
        .with_context(|| format!("updating version {id:?}"))?;
    driver.close()?;
    Ok(())
}

fn new_id() -> String {
    chrono::Utc::now().format("%Y%m%d%H%M%S").to_string()
}
