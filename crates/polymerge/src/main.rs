//! polymerge - merge a Python file and a JavaScript file into one file that
//! runs unchanged under `python3` and `node`.
//!
//! ```text
//! polymerge app.py app.js                 # -> out/result.py.js
//! polymerge app.js app.py dist/app.py.js --compress
//! polymerge app.py app.js --literal --json
//! ```

mod config;

use anyhow::{Context, Result, bail};
use clap::Parser;
use config::PolymergeConfig;
use polymerge_core::{PayloadPair, Strategy, merge};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Merge a Python and a JavaScript file into one polyglot file
#[derive(Parser)]
#[command(name = "polymerge", version, about, long_about = None)]
struct Cli {
    /// First input file (.py, .js, .cjs or .mjs)
    file1: PathBuf,

    /// Second input file, of the other language
    file2: PathBuf,

    /// Output file [default: out/result.py.js, or [output] path from config]
    output: Option<PathBuf>,

    /// Deflate each payload before base64 encoding
    #[arg(short, long)]
    compress: bool,

    /// Embed payloads as escaped literals instead of base64 (ignores --compress)
    #[arg(short, long)]
    literal: bool,

    /// Print a JSON report instead of the confirmation line
    #[arg(long)]
    json: bool,

    /// Log debug output to stderr (POLYMERGE_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    /// Project root searched for .polymerge/config.toml
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("POLYMERGE_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn resolve_strategy(cli: &Cli, config: &PolymergeConfig) -> Strategy {
    if cli.compress && cli.literal {
        tracing::warn!("--literal embeds payloads without transport encoding; ignoring --compress");
    }
    if cli.compress || cli.literal {
        Strategy::select(cli.compress, cli.literal)
    } else {
        config.strategy()
    }
}

fn run(cli: Cli) -> Result<()> {
    if !cli.file1.exists() || !cli.file2.exists() {
        bail!("One or more input files do not exist.");
    }

    let config = PolymergeConfig::load(&cli.root);
    let strategy = resolve_strategy(&cli, &config);
    let output_path = cli.output.clone().unwrap_or_else(|| config.output_path());

    let first = std::fs::read(&cli.file1)
        .with_context(|| format!("Failed to read {}", cli.file1.display()))?;
    let second = std::fs::read(&cli.file2)
        .with_context(|| format!("Failed to read {}", cli.file2.display()))?;

    let pair = PayloadPair::classify(&extension(&cli.file1), first, &extension(&cli.file2), second)?;
    let merged = merge(&pair, strategy)?;

    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    std::fs::write(&output_path, merged.as_str())
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    tracing::info!(output = %output_path.display(), %strategy, "wrote merged file");

    if cli.json {
        let report = serde_json::json!({
            "output": output_path,
            "strategy": strategy,
            "bytes": merged.as_str().len(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Merged files written to {}", output_path.display());
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
