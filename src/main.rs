use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use collate::config::DEFAULT_CONFIG_FILE;
use collate::{CollateConfig, MarkerStyle, UnreadablePolicy, run};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMarker {
    Slash,
    Hash,
    Block,
    Xml,
}

impl From<CliMarker> for MarkerStyle {
    fn from(m: CliMarker) -> Self {
        match m {
            CliMarker::Slash => MarkerStyle::Slash,
            CliMarker::Hash => MarkerStyle::Hash,
            CliMarker::Block => MarkerStyle::Block,
            CliMarker::Xml => MarkerStyle::Xml,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Collate headers and their sources into one ordered dump", long_about = None)]
struct Args {
    /// Directory containing header files
    #[arg(long)]
    header_dir: Option<PathBuf>,

    /// Directory containing source files
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Header file extension
    #[arg(long)]
    header_ext: Option<String>,

    /// Source file extension
    #[arg(long)]
    source_ext: Option<String>,

    /// Marker comment style
    #[arg(short, long, value_enum)]
    marker: Option<CliMarker>,

    /// Leave unreadable or binary files out instead of failing
    #[arg(long)]
    skip_unreadable: bool,

    /// Write the output in place instead of via a temporary file
    #[arg(long)]
    no_atomic: bool,

    /// Read settings from this TOML file instead of ./collate.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

fn load_config(explicit: Option<&Path>) -> Result<CollateConfig> {
    match explicit {
        Some(path) => CollateConfig::load_from_file(path)?
            .with_context(|| format!("Config file not found: {:?}", path)),
        None => Ok(CollateConfig::load_from_file(Path::new(DEFAULT_CONFIG_FILE))?
            .unwrap_or_default()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    // 1. Load from file or default
    let mut config = load_config(args.config.as_deref())?;

    // 2. Override with CLI args
    if let Some(d) = args.header_dir {
        config.header_dir = d;
    }
    if let Some(d) = args.source_dir {
        config.source_dir = d;
    }
    if let Some(o) = args.output {
        config.output = o;
    }
    if let Some(e) = args.header_ext {
        config.header_ext = e;
    }
    if let Some(e) = args.source_ext {
        config.source_ext = e;
    }
    if let Some(m) = args.marker {
        config.marker = m.into();
    }
    if args.skip_unreadable {
        config.on_unreadable = UnreadablePolicy::Skip;
    }
    if args.no_atomic {
        config.atomic = false;
    }
    if args.verbose {
        config.verbose = true;
    }

    let summary = run(&config)?;

    if config.verbose {
        println!(
            "{} blocks: {} headers, {} paired sources, {} unpaired sources",
            summary.block_count(),
            summary.headers,
            summary.paired,
            summary.orphans
        );
    }
    if !summary.skipped.is_empty() {
        eprintln!("Skipped {} unreadable files", summary.skipped.len());
    }
    println!("Combined output written to {}", summary.output.display());

    Ok(())
}
