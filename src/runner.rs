use crate::config::CollateConfig;
use crate::core::{CollateEvent, FileClass, RunSummary, resolve_pairs};
use crate::error::{CollateError, Result};
use crate::fs::list_with_extension;
use crate::writer::AggregateWriter;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Destination for the aggregate: a temp file renamed into place, or the output itself.
enum OutputSink {
    Atomic(NamedTempFile),
    Direct(File),
}

impl OutputSink {
    fn create(path: &Path, atomic: bool) -> io::Result<Self> {
        if atomic {
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            };
            let mut builder = tempfile::Builder::new();
            builder.prefix(".collate-");
            // New outputs get the usual 0o666 minus umask instead of tempfile's 0o600
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                builder.permissions(std::fs::Permissions::from_mode(0o666));
            }
            let temp = builder.tempfile_in(parent)?;
            if let Ok(existing) = std::fs::metadata(path) {
                temp.as_file().set_permissions(existing.permissions())?;
            }
            Ok(Self::Atomic(temp))
        } else {
            Ok(Self::Direct(File::create(path)?))
        }
    }

    fn commit(self, path: &Path) -> io::Result<()> {
        match self {
            Self::Atomic(temp) => temp.persist(path).map(|_| ()).map_err(|e| e.error),
            Self::Direct(file) => file.sync_all(),
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Atomic(temp) => temp.write(buf),
            Self::Direct(file) => file.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Atomic(temp) => temp.flush(),
            Self::Direct(file) => file.flush(),
        }
    }
}

/// Main entry point for a collation run in CLI mode.
///
/// Progress is printed when `verbose` is set; skipped files are always
/// reported on stderr.
pub fn run(config: &CollateConfig) -> Result<RunSummary> {
    let verbose = config.verbose;
    run_with(config, |event| match event {
        CollateEvent::Scanned { dir, class, count } => {
            if verbose {
                println!("Found {} {} files in {:?}", count, class, dir)
            }
        }
        CollateEvent::BlockWritten {
            name,
            class,
            paired,
        } => {
            if verbose {
                let note = match (class, paired) {
                    (FileClass::Header, true) => " (paired)",
                    (FileClass::Source, false) => " (no header)",
                    _ => "",
                };
                println!("Wrote {}{}", name, note)
            }
        }
        CollateEvent::Skipped { name, reason } => eprintln!("Skipped {}: {}", name, reason),
        CollateEvent::Complete(path) => {
            if verbose {
                println!("Persisted {:?}", path)
            }
        }
    })
}

/// Runs the full pipeline, reporting progress to `observer`.
///
/// Both directories are listed before the output is opened, so a missing
/// directory leaves any existing output untouched.
pub fn run_with(
    config: &CollateConfig,
    mut observer: impl FnMut(&CollateEvent),
) -> Result<RunSummary> {
    config.validate()?;
    let header_ext = config.header_ext();
    let source_ext = config.source_ext();

    // 1. Scan
    let headers = list_with_extension(&config.header_dir, &header_ext)?;
    observer(&CollateEvent::Scanned {
        dir: config.header_dir.clone(),
        class: FileClass::Header,
        count: headers.len(),
    });
    let sources = list_with_extension(&config.source_dir, &source_ext)?;
    observer(&CollateEvent::Scanned {
        dir: config.source_dir.clone(),
        class: FileClass::Source,
        count: sources.len(),
    });

    // 2. Pair
    let records = resolve_pairs(&headers, &config.source_dir, &source_ext);

    // 3. Write
    let output_error = |source: io::Error| CollateError::OutputWrite {
        path: config.output.clone(),
        source,
    };
    let sink = OutputSink::create(&config.output, config.atomic).map_err(output_error)?;
    let mut writer = AggregateWriter::new(BufWriter::new(sink), config);

    for record in &records {
        writer.write_pair(record, &mut observer)?;
    }
    let remaining = list_with_extension(&config.source_dir, &source_ext)?;
    writer.write_remaining(&remaining, &mut observer)?;

    // 4. Persist
    let (buffered, mut summary) = writer.finish()?;
    let sink = buffered
        .into_inner()
        .map_err(|e| output_error(e.into_error()))?;
    sink.commit(&config.output).map_err(output_error)?;

    summary.output = config.output.clone();
    observer(&CollateEvent::Complete(config.output.clone()));
    Ok(summary)
}
