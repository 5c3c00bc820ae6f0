use crate::error::{CollateError, Result};
use ignore::WalkBuilder;
use std::io;
use std::path::Path;

/// Lists the names of regular files directly inside `dir` whose extension is `ext`.
///
/// Only the immediate level is scanned and no ignore rules apply, so the
/// result matches a plain directory listing. Names are returned sorted.
pub fn list_with_extension(dir: &Path, ext: &str) -> Result<Vec<String>> {
    let access_error = |source: io::Error| CollateError::DirectoryAccess {
        path: dir.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(dir).map_err(access_error)?;
    if !metadata.is_dir() {
        return Err(access_error(io::Error::other("not a directory")));
    }

    let mut builder = WalkBuilder::new(dir);
    builder
        .standard_filters(false)
        .hidden(false)
        .follow_links(true)
        .max_depth(Some(1));

    let mut names = Vec::new();
    for result in builder.build() {
        let entry = result.map_err(|err| {
            let source = err
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("directory listing failed"));
            access_error(source)
        })?;

        if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(ext) {
            continue;
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CollateError::FileRead {
                path: path.to_path_buf(),
                reason: "file name is not valid UTF-8".to_string(),
            })?;
        names.push(name.to_string());
    }

    names.sort();
    Ok(names)
}
