//! CLI entry point. Reads a JSON fixture describing a value graph, its
//! block catalog, and recorded scope-frame data, then runs it through
//! `serialize_value` and prints the resulting source text. Mirrors the
//! teacher's `main.rs`: a `clap`-derived config struct, a `thiserror`
//! error enum wrapping every failure mode, and emoji-prefixed verbose
//! output at each pipeline stage.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use closure_serializer::block::BlockCatalog;
use closure_serializer::config::SerializerConfig;
use closure_serializer::error::SerializeError;
use closure_serializer::extractor::{FrameData, Tracker};
use closure_serializer::serialize_value;
use closure_serializer::value::{Value, ValueId};

#[derive(Parser, Debug)]
#[command(name = "closure-serializer", about = "Serializes live runtime values into re-evaluable source text")]
struct Cli {
    /// Path to a JSON fixture: `{ "root": <id>, "values": {...}, "blocks": {...}, "frames": {...} }`.
    input: PathBuf,

    #[arg(long, default_value = "script")]
    format: String,

    #[arg(long)]
    minify: bool,

    #[arg(long)]
    mangle: bool,

    #[arg(long, default_value_t = true)]
    inline: bool,

    #[arg(long, default_value_t = true)]
    strict_env: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("🚫 could not read input file {path}: {source}")]
    ReadFailed { path: PathBuf, #[source] source: std::io::Error },
    #[error("🚫 input file is not valid fixture JSON: {0}")]
    MalformedFixture(#[from] serde_json::Error),
    #[error("🚫 serialization failed: {0}")]
    Serialize(#[from] SerializeError),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Deserialize)]
struct Fixture {
    root: ValueId,
    values: HashMap<ValueId, Value>,
    blocks: BlockCatalog,
    frames: HashMap<ValueId, Vec<FrameData>>,
}

struct FixtureTracker(HashMap<ValueId, Vec<FrameData>>);

impl Tracker for FixtureTracker {
    fn frames_for(&self, token: ValueId) -> Option<Vec<FrameData>> {
        self.0.get(&token).cloned()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => {
            println!("{code}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CliResult<String> {
    if cli.verbose {
        eprintln!("🦀 closure-serializer starting");
        eprintln!("📋 reading fixture from {}", cli.input.display());
    }

    let raw = fs::read_to_string(&cli.input).map_err(|source| CliError::ReadFailed { path: cli.input.clone(), source })?;
    let fixture: Fixture = serde_json::from_str(&raw)?;

    if cli.verbose {
        eprintln!(
            "🔍 loaded {} values, {} blocks, {} tracked functions",
            fixture.values.len(),
            fixture.blocks.0.len(),
            fixture.frames.len()
        );
    }

    let config = SerializerConfig::from_cli_args(&cli.format, cli.minify, cli.mangle, cli.inline, cli.strict_env);
    let tracker = FixtureTracker(fixture.frames);

    if cli.verbose {
        eprintln!("⚙️  running pipeline: classify → extract → scope graph → plan → emit");
    }

    let output = serialize_value(fixture.root, &fixture.values, &tracker, &fixture.blocks, &config)?;

    if cli.verbose {
        eprintln!(
            "✅ done: {} factories, {} trampolines, {} setters",
            output.diagnostics.factories_emitted, output.diagnostics.trampolines_emitted, output.diagnostics.setters_emitted
        );
    }

    Ok(output.code)
}
