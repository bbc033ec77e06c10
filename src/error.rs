// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors surfaced by the gallery engine.
///
/// `Network` covers both transport failures and non-success HTTP statuses;
/// the loaders decide per policy whether it degrades to an empty collection
/// (page 1) or is swallowed (pagination). Stale responses are not an error:
/// they are discarded silently by the epoch guard and never reach callers.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A fetch was rejected or returned a non-success status.
    Network(String),
    /// A valid response contained zero items (e.g. a random search by
    /// query matched nothing). User-visible, distinct from `Network`.
    EmptyResult,
    /// Configuration could not be read or written.
    Config(String),
    /// Filesystem error while handling persisted preferences.
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network(msg) => write!(f, "Network Error: {msg}"),
            Error::EmptyResult => write!(f, "No media found matching that query."),
            Error::Config(msg) => write!(f, "Config Error: {msg}"),
            Error::Io(msg) => write!(f, "I/O Error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
