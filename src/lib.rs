pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod fs;
pub mod runner;
pub mod utils;
pub mod writer;

// Re-export key items for convenience
pub use config::{CollateConfig, MarkerStyle, UnreadablePolicy};
pub use core::{CollateEvent, FileClass, FileEntry, PairingRecord, RunSummary};
pub use error::CollateError;
pub use format::{ParsedBlock, parse_dump};
pub use runner::{run, run_with};
