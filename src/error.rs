//! Error types for the radiation simulation

use std::fmt::Display;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A caller-level parameter (latitude, day of year, tilt, date) is out of range.
    #[error("Invalid input: {name} = {value} ({reason})")]
    InvalidInput {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A sweep or model setting cannot produce a meaningful run.
    #[error("Invalid configuration: {name} = {value} ({reason})")]
    InvalidConfiguration {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Error {
    pub fn invalid_input(name: &'static str, value: impl Display, reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_configuration(
        name: &'static str,
        value: impl Display,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidConfiguration {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
