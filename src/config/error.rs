use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FromConfigError {
    #[error("missing config file {path:?}")]
    MissingFile {
        path: PathBuf,
    },
    #[error("missing setting {key:?}")]
    MissingSetting {
        key: String,
    },
    #[error("parse error: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    #[error("evaluation error: {0}")]
    EvaluationError(#[from] EvaluationError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("error: {0}")]
    Custom(String),
}

impl FromConfigError {
    #[inline]
    pub fn missing_setting(key: impl Into<String>) -> Self {
        Self::MissingSetting {
            key: key.into(),
        }
    }
}

impl<'a> From<&'a str> for FromConfigError {
    #[inline]
    fn from(value: &'a str) -> Self {
        Self::Custom(value.to_owned())
    }
}

impl From<String> for FromConfigError {
    #[inline]
    fn from(value: String) -> Self {
        Self::Custom(value)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("environment variable {key:?} is not set")]
    MissingVariable {
        key: String,
    },
    #[error("environment variable {key:?} is not valid unicode")]
    InvalidVariable {
        key: String,
    },
    #[error("unterminated ${{...}} in {input:?}")]
    Unterminated {
        input: String,
    },
    #[error("empty variable name in {input:?}")]
    EmptyName {
        input: String,
    },
}
