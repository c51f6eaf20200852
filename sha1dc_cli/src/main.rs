use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use sha1dc_core::{Error as EngineError, IngestMode, Sha1Dc};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod config;
mod output;

use crate::config::{AppConfig, IngestChoice, OutputFormat};
use crate::output::{FileReport, render};

/// Read chunk size for file and stdin streaming.
const READ_CHUNK: usize = 64 * 1024;

#[derive(Parser)]
#[command(name = "sha1dcsum")]
#[command(author, version, about = "SHA-1 checksums with collision detection", long_about = None)]
struct Cli {
    /// Files to hash; reads standard input when none are given
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Ingestion strategy for file contents
    #[arg(long, value_enum)]
    ingest: Option<IngestChoice>,

    /// Disable collision detection (plain SHA-1)
    #[arg(long)]
    no_detect: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.debug { "debug" } else { "warn" }),
    )
    .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("sha1dcsum: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every input produced a trustworthy digest.
fn run(cli: Cli) -> Result<bool> {
    let config = AppConfig::load()?;

    let format = cli.format.unwrap_or(config.output.format);
    let ingest: IngestMode = cli.ingest.unwrap_or(config.engine.ingest).into();
    let detect = !cli.no_detect && config.engine.detect_collisions;
    debug!("format={format:?} ingest={ingest:?} detect={detect}");

    let mut reports = Vec::new();
    if cli.paths.is_empty() {
        reports.push(hash_stdin(ingest, detect));
    } else {
        for path in &cli.paths {
            reports.push(hash_file(path, ingest, detect));
        }
    }

    let mut stdout = io::stdout().lock();
    render(&mut stdout, format, &reports).context("Failed to write report")?;

    Ok(reports.iter().all(FileReport::is_clean))
}

fn hash_file(path: &Path, ingest: IngestMode, detect: bool) -> FileReport {
    let name = path.display().to_string();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) => return FileReport::failed(&name, error.to_string()),
    };
    hash_reader(&name, BufReader::new(file), ingest, detect)
}

fn hash_stdin(ingest: IngestMode, detect: bool) -> FileReport {
    hash_reader("-", io::stdin().lock(), ingest, detect)
}

fn hash_reader(name: &str, mut reader: impl Read, ingest: IngestMode, detect: bool) -> FileReport {
    let mut engine = Sha1Dc::builder()
        .ingest_mode(ingest)
        .detect_collisions(detect)
        .build();

    let mut chunk = vec![0u8; READ_CHUNK];
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => engine.update(&chunk[..n]),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return FileReport::failed(name, error.to_string()),
        }
    }

    match engine.finalize() {
        Ok(digest) => FileReport::ok(name, digest.to_hex()),
        Err(EngineError::CollisionDetected) => FileReport::collision(name),
    }
}
