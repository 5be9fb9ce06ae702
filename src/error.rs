//! Error types for tasklist

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unsupported days ahead value {0}; expected 0, 1, 7 or 30")]
    UnsupportedHorizon(i64),
}

pub type Result<T> = std::result::Result<T, Error>;
