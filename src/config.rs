use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CollateError, Result};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "collate.toml";

/// Comment syntax used for the begin/end marker lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// `// ===== Begin name =====`
    #[default]
    Slash,
    /// `# ===== Begin name =====`
    Hash,
    /// `/* ===== Begin name ===== */`
    Block,
    /// `<!-- ===== Begin name ===== -->`
    Xml,
}

impl MarkerStyle {
    /// Returns the (open, close) delimiters wrapping a marker line.
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            MarkerStyle::Slash => ("// =====", "====="),
            MarkerStyle::Hash => ("# =====", "====="),
            MarkerStyle::Block => ("/* =====", "===== */"),
            MarkerStyle::Xml => ("<!-- =====", "===== -->"),
        }
    }
}

/// What to do when an input file cannot be read as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreadablePolicy {
    /// Abort the whole run
    #[default]
    Fail,
    /// Leave the file out of the dump and keep going
    Skip,
}

/// Main configuration for a collation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollateConfig {
    /// Directory holding header-class files
    pub header_dir: PathBuf,
    /// Directory holding source-class files
    pub source_dir: PathBuf,
    /// Path to the aggregate output file
    pub output: PathBuf,
    /// Extension identifying header-class files (without the dot)
    pub header_ext: String,
    /// Extension identifying source-class files (without the dot)
    pub source_ext: String,
    pub marker: MarkerStyle,
    pub on_unreadable: UnreadablePolicy,
    /// Write to a temporary file and rename over the output on success
    pub atomic: bool,
    /// Print progress events to stdout
    pub verbose: bool,
}

impl Default for CollateConfig {
    fn default() -> Self {
        Self {
            header_dir: PathBuf::from("."),
            source_dir: PathBuf::from("../src"),
            output: PathBuf::from("../project_dump.txt"),
            header_ext: "hpp".to_string(),
            source_ext: "cpp".to_string(),
            marker: MarkerStyle::Slash,
            on_unreadable: UnreadablePolicy::Fail,
            atomic: true,
            verbose: false,
        }
    }
}

/// Strips a leading dot so `.hpp` and `hpp` mean the same thing.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_string()
}

impl CollateConfig {
    /// Validates extensions and paths before anything is read or written.
    pub fn validate(&self) -> Result<()> {
        let header_ext = normalize_extension(&self.header_ext);
        let source_ext = normalize_extension(&self.source_ext);

        if header_ext.is_empty() {
            return Err(CollateError::InvalidConfig(
                "header extension is empty".to_string(),
            ));
        }
        if source_ext.is_empty() {
            return Err(CollateError::InvalidConfig(
                "source extension is empty".to_string(),
            ));
        }
        // Classification uses the final extension only, so `inl.hpp` could never match
        for ext in [&header_ext, &source_ext] {
            if ext.contains('.') {
                return Err(CollateError::InvalidConfig(format!(
                    "compound extension {:?} is not supported; use the last component",
                    ext
                )));
            }
        }
        if header_ext.eq_ignore_ascii_case(&source_ext) {
            return Err(CollateError::InvalidConfig(format!(
                "header and source extensions overlap: {:?}",
                header_ext
            )));
        }

        let output_ext = self
            .output
            .extension()
            .map(|e| e.to_string_lossy().to_string());
        let output_parent = match self.output.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        for (dir, ext) in [(&self.header_dir, &header_ext), (&self.source_dir, &source_ext)] {
            if output_ext.as_deref() == Some(ext.as_str()) && same_dir(&output_parent, dir) {
                return Err(CollateError::InvalidConfig(format!(
                    "output {:?} would be collected as input from {:?}",
                    self.output, dir
                )));
            }
        }
        Ok(())
    }

    pub fn header_ext(&self) -> String {
        normalize_extension(&self.header_ext)
    }

    pub fn source_ext(&self) -> String {
        normalize_extension(&self.source_ext)
    }

    /// Loads configuration from a TOML file. Returns `Ok(None)` when the file does not exist.
    pub fn load_from_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|e| CollateError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| CollateError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
