//! Core types shared across collate modules

use std::path::{Path, PathBuf};

/// Which side of a header/source pair a file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileClass {
    Header,
    Source,
}

impl std::fmt::Display for FileClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileClass::Header => write!(f, "header"),
            FileClass::Source => write!(f, "source"),
        }
    }
}

/// A file name found in one of the two scanned directories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub class: FileClass,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, class: FileClass) -> Self {
        Self {
            name: name.into(),
            class,
        }
    }

    /// File name without its final extension; the pairing key.
    pub fn stem(&self) -> &str {
        stem_of(&self.name)
    }
}

/// Returns `name` with its last extension removed (`a.b.hpp` -> `a.b`).
pub fn stem_of(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
}

/// A header and, if one exists, the source file sharing its stem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingRecord {
    pub header: String,
    pub source: Option<String>,
}

/// Progress notifications emitted while a run executes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollateEvent {
    /// A directory listing finished
    Scanned {
        dir: PathBuf,
        class: FileClass,
        count: usize,
    },
    /// A block was appended to the output
    BlockWritten {
        name: String,
        class: FileClass,
        paired: bool,
    },
    /// A file was left out under the skip policy
    Skipped { name: String, reason: String },
    /// Output persisted at the given path
    Complete(PathBuf),
}

/// Outcome of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    /// Header blocks written
    pub headers: usize,
    /// Source blocks written directly after their header
    pub paired: usize,
    /// Source blocks written in the fallback pass
    pub orphans: usize,
    pub skipped: Vec<String>,
}

impl RunSummary {
    pub fn block_count(&self) -> usize {
        self.headers + self.paired + self.orphans
    }
}
