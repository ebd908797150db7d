use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// SQL dialect of the target database, only used to render bind placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Numbered placeholders: `$1`, `$2`, ...
    Postgres,
    Sqlite,
    /// Any other driver, bound with `?`.
    Generic,
}

impl Dialect {
    pub fn from_name(name: impl AsRef<str>) -> Self {
        match name.as_ref() {
            "postgres" | "postgresql" => Self::Postgres,
            "sqlite" | "sqlite3" => Self::Sqlite,
            _ => Self::Generic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
            Self::Generic => "generic",
        }
    }

    /// Renders the placeholder for the 1-based parameter `index`; 0 is treated as 1.
    pub fn placeholder(self, index: usize) -> Cow<'static, str> {
        match self {
            Self::Postgres => Cow::Owned(format!("${}", index.max(1))),
            Self::Sqlite | Self::Generic => Cow::Borrowed("?"),
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
