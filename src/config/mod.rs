pub mod error;
pub mod eval;

use std::path::Path;
use serde_derive::Deserialize;
use crate::config::error::FromConfigError;

pub const CONFIG_FILE: &str = "migrator.ron";

/// Connection settings, read from `migrator.ron`:
///
/// ```ron
/// (
///     dialect: "postgres",
///     url: "${DATABASE_URL}",
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub dialect: String,
    pub url: String,
}

/// Values given on the command line, preferred over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dialect: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    dialect: String,
    #[serde(default)]
    url: String,
}

impl Config {
    pub fn from_directory(path: impl AsRef<Path>) -> Result<Self, FromConfigError> {
        Self::load(path, Overrides::default())
    }

    /// Reads `migrator.ron` from `path`. The file may be absent when
    /// `overrides` supply every setting.
    pub fn load(path: impl AsRef<Path>, overrides: Overrides) -> Result<Self, FromConfigError> {
        let file = path.as_ref().join(CONFIG_FILE);
        let raw = if file.is_file() {
            ron::from_str::<RawConfig>(&std::fs::read_to_string(&file)?)?
        } else if overrides.dialect.is_some() && overrides.url.is_some() {
            RawConfig::default()
        } else {
            return Err(FromConfigError::MissingFile { path: file });
        };

        Self::resolve(raw, overrides)
    }

    pub fn from_ron(contents: &str) -> Result<Self, FromConfigError> {
        let raw = ron::from_str::<RawConfig>(contents)?;
        Self::resolve(raw, Overrides::default())
    }

    /// File values go through `${VAR}` expansion; overrides are used as given.
    fn resolve(raw: RawConfig, overrides: Overrides) -> Result<Self, FromConfigError> {
        let dialect = match overrides.dialect {
            Some(dialect) => dialect,
            None => Self::setting("dialect", &raw.dialect)?,
        };
        let url = match overrides.url {
            Some(url) => url,
            None => Self::setting("url", &raw.url)?,
        };

        Ok(Config { dialect, url })
    }

    fn setting(key: &str, value: &str) -> Result<String, FromConfigError> {
        if value.is_empty() {
            return Err(FromConfigError::missing_setting(key));
        }
        Ok(eval::expand(value)?)
    }
}
