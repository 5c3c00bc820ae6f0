//! Pairing of header files with their same-stem source files

use super::types::{FileClass, FileEntry, PairingRecord};
use std::path::Path;

/// Resolves each header to the source file sharing its stem.
///
/// Headers are sorted here so the output order never depends on listing
/// order. Existence is checked against the filesystem directly rather than a
/// previous scan. Headers with equal stems are resolved independently.
pub fn resolve_pairs(headers: &[String], source_dir: &Path, source_ext: &str) -> Vec<PairingRecord> {
    let mut sorted: Vec<&String> = headers.iter().collect();
    sorted.sort();

    sorted
        .into_iter()
        .map(|header| {
            let entry = FileEntry::new(header.as_str(), FileClass::Header);
            let expected = format!("{}.{}", entry.stem(), source_ext);
            let source = source_dir.join(&expected).is_file().then_some(expected);
            PairingRecord {
                header: header.clone(),
                source,
            }
        })
        .collect()
}
