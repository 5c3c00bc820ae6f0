//! Aggregate writer: emits header/source blocks and tracks what was written

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{CollateConfig, UnreadablePolicy};
use crate::core::{CollateEvent, FileClass, PairingRecord, RunSummary};
use crate::error::{CollateError, Result};
use crate::format::MarkerFormatter;
use crate::utils::binary::decode_text;

/// Writes one run's blocks into `output`.
///
/// The emitted set lives only as long as the writer, so nothing carries over
/// between runs.
pub struct AggregateWriter<W: Write> {
    output: W,
    output_path: PathBuf,
    formatter: MarkerFormatter,
    policy: UnreadablePolicy,
    header_dir: PathBuf,
    source_dir: PathBuf,
    emitted: HashSet<String>,
    summary: RunSummary,
}

impl<W: Write> AggregateWriter<W> {
    pub fn new(output: W, config: &CollateConfig) -> Self {
        Self {
            output,
            output_path: config.output.clone(),
            formatter: MarkerFormatter::new(config.marker),
            policy: config.on_unreadable,
            header_dir: config.header_dir.clone(),
            source_dir: config.source_dir.clone(),
            emitted: HashSet::new(),
            summary: RunSummary::default(),
        }
    }

    /// Writes the header block, then the paired source block if there is one.
    ///
    /// A source already emitted by an earlier record is not written twice.
    pub fn write_pair(
        &mut self,
        record: &PairingRecord,
        notify: &mut dyn FnMut(&CollateEvent),
    ) -> Result<()> {
        let header_path = self.header_dir.join(&record.header);
        if let Some(content) = self.read_input(&header_path, &record.header, notify)? {
            self.emit(&record.header, &content)?;
            self.summary.headers += 1;
            notify(&CollateEvent::BlockWritten {
                name: record.header.clone(),
                class: FileClass::Header,
                paired: record.source.is_some(),
            });
        }

        if let Some(source) = &record.source {
            if !self.emitted.insert(source.clone()) {
                return Ok(());
            }
            let source_path = self.source_dir.join(source);
            if let Some(content) = self.read_input(&source_path, source, notify)? {
                self.emit(source, &content)?;
                self.summary.paired += 1;
                notify(&CollateEvent::BlockWritten {
                    name: source.clone(),
                    class: FileClass::Source,
                    paired: true,
                });
            }
        }
        Ok(())
    }

    /// Writes every source file not yet emitted, in lexicographic order.
    pub fn write_remaining(
        &mut self,
        sources: &[String],
        notify: &mut dyn FnMut(&CollateEvent),
    ) -> Result<()> {
        let mut sorted: Vec<&String> = sources.iter().collect();
        sorted.sort();

        for source in sorted {
            if !self.emitted.insert(source.clone()) {
                continue;
            }
            let source_path = self.source_dir.join(source);
            if let Some(content) = self.read_input(&source_path, source, notify)? {
                self.emit(source, &content)?;
                self.summary.orphans += 1;
                notify(&CollateEvent::BlockWritten {
                    name: source.clone(),
                    class: FileClass::Source,
                    paired: false,
                });
            }
        }
        Ok(())
    }

    #[cfg(test)]
    fn is_emitted(&self, name: &str) -> bool {
        self.emitted.contains(name)
    }

    /// Flushes the sink and hands it back with the run's counts.
    pub fn finish(mut self) -> Result<(W, RunSummary)> {
        self.output
            .flush()
            .map_err(|source| CollateError::OutputWrite {
                path: self.output_path.clone(),
                source,
            })?;
        Ok((self.output, self.summary))
    }

    fn emit(&mut self, name: &str, content: &str) -> Result<()> {
        self.formatter
            .write_block(&mut self.output, name, content)
            .map_err(|source| CollateError::OutputWrite {
                path: self.output_path.clone(),
                source,
            })
    }

    /// Reads a whole input file as text. Returns `Ok(None)` when the file is skipped.
    ///
    /// Content that would not parse back out of the dump is treated as unreadable.
    fn read_input(
        &mut self,
        path: &Path,
        name: &str,
        notify: &mut dyn FnMut(&CollateEvent),
    ) -> Result<Option<String>> {
        let formatter = self.formatter;
        let decoded = fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(decode_text)
            .and_then(|content| {
                if formatter.embeds_end_marker(name, &content) {
                    Err("content contains its own end marker line".to_string())
                } else {
                    Ok(content)
                }
            });

        match (decoded, self.policy) {
            (Ok(content), _) => Ok(Some(content)),
            (Err(reason), UnreadablePolicy::Fail) => Err(CollateError::FileRead {
                path: path.to_path_buf(),
                reason,
            }),
            (Err(reason), UnreadablePolicy::Skip) => {
                notify(&CollateEvent::Skipped {
                    name: name.to_string(),
                    reason,
                });
                self.summary.skipped.push(name.to_string());
                Ok(None)
            }
        }
    }
}
