//! Error taxonomy for a collation run

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum CollateError {
    /// A configured directory is missing or cannot be listed.
    #[error("Cannot access directory {path:?}: {source}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file could not be opened or is not text.
    #[error("Cannot read file {path:?}: {reason}")]
    FileRead { path: PathBuf, reason: String },

    #[error("Cannot write output {path:?}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config file {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("Malformed dump at byte {offset}: {reason}")]
    MalformedDump { offset: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, CollateError>;
