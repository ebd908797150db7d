use std::path::PathBuf;
use clap::{Parser, Subcommand};

#[derive(Parser, Clone)]
#[command(name = "migrator", version, about = "Inspect and repair the migration versions table")]
pub struct CLI {
    /// Directory holding migrator.ron
    #[arg(long, short, global = true, default_value = ".")]
    pub config: PathBuf,
    /// Database driver, e.g. postgres or sqlite
    #[arg(long, global = true)]
    pub dialect: Option<String>,
    /// Connection string, overrides the config file
    #[arg(long, global = true)]
    pub url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Create the versions table if it is missing
    Init,
    /// List applied versions, most recent first
    Versions,
    /// Mark a version as applied without running anything
    Record {
        id: String,
    },
    /// Remove a version record without running anything
    Forget {
        id: String,
    },
    /// Print a timestamp id for a new migration
    NewId,
}
