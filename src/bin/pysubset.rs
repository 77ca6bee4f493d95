//! Command-line interface for pysubset
//!
//! Checks that programs belong to a grammar level and, unless disabled, that they run cleanly
//! under the reference interpreter.
//!
//! Usage:
//!   pysubset --subset=L1 --input=prog.py            - Check one file
//!   pysubset --subset=P3 --input=tests/ --no-exec   - Check every *.py file of a directory
//!   pysubset --input=prog.py --emit=dump            - Also print the tree of each file
//!
//! Without `--config`, a `pysubset.toml` in the working directory is layered over the defaults
//! when present.
//!
//! The exit status is 0 only when every file passes.

use clap::{Parser, ValueEnum};
use log::{debug, error, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use pysubset::pysubset::ast::SourceLocation;
use pysubset::pysubset::config::{Loader, PysubsetConfig, LOCAL_CONFIG_FILE};
use pysubset::pysubset::formats::format_by_name;
use pysubset::pysubset::harness::Harness;
use pysubset::pysubset::level::Level;
use pysubset::pysubset::pipeline::{FileReport, Pipeline, PipelineOptions};

#[derive(Parser)]
#[command(name = "pysubset", version)]
#[command(about = "Check programs against the L0-L3 grammar levels")]
struct Args {
    /// Grammar level to check against (L0, L1, L2, L3; P0..P3 also accepted)
    #[arg(long, value_name = "LEVEL")]
    subset: Option<Level>,

    /// Program file, or a directory whose *.py files are all checked
    #[arg(long, value_name = "PATH")]
    input: PathBuf,

    /// Log every stage of the pipeline
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file layered over the built-in defaults (default: ./pysubset.toml if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Skip running programs under the reference interpreter
    #[arg(long)]
    no_exec: bool,

    /// Print an artefact for every file
    #[arg(long, value_enum, value_name = "FORMAT")]
    emit: Option<Emit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    Dump,
    Json,
    Yaml,
    Source,
    Tokens,
}

impl Emit {
    fn format_name(self) -> &'static str {
        match self {
            Emit::Dump => "dump",
            Emit::Json => "json",
            Emit::Yaml => "yaml",
            Emit::Source => "source",
            Emit::Tokens => "tokens",
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            return ExitCode::from(2);
        }
    };

    let filter = if args.verbose {
        "debug"
    } else {
        config.logging.filter.as_str()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let files = match discover(&args.input) {
        Ok(files) => files,
        Err(err) => {
            eprintln!("Cannot read {}: {err}", args.input.display());
            return ExitCode::from(2);
        }
    };
    if files.is_empty() {
        eprintln!("No .py files found under {}", args.input.display());
        return ExitCode::from(2);
    }

    let pipeline = Pipeline::new(
        PipelineOptions::new(config.validation.subset).verbose(args.verbose),
    );
    let level = pipeline.level();
    let harness = config
        .execution
        .enabled
        .then(|| Harness::new(config.execution.clone()));
    info!(
        "checking {} file(s) at {level}, execution {}",
        files.len(),
        if harness.is_some() { "on" } else { "off" }
    );

    let mut failures = 0;
    for path in &files {
        if args.emit == Some(Emit::Tokens) {
            emit_tokens(&pipeline, path);
        }

        match pipeline.check_file(path, harness.as_ref()) {
            Ok(report) => {
                println!("{}: ok", path.display());
                if let Some(emit) = args.emit.filter(|emit| *emit != Emit::Tokens) {
                    emit_module(emit, &report);
                }
            }
            Err(err) => {
                failures += 1;
                error!("{}: {}: {err}", path.display(), err.kind_name());
                println!("{}: {}", path.display(), err.kind_name());
            }
        }
    }

    println!(
        "{} of {} file(s) passed at {level}",
        files.len() - failures,
        files.len()
    );
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_config(args: &Args) -> Result<PysubsetConfig, config::ConfigError> {
    let mut loader = match &args.config {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG_FILE),
    };
    if let Some(level) = args.subset {
        loader = loader.with_subset(level)?;
    }
    if args.no_exec {
        loader = loader.without_execution()?;
    }
    loader.build()
}

/// The file itself, or the sorted `*.py` files directly inside a directory.
fn discover(input: &Path) -> io::Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "py") {
            files.push(path);
        }
    }
    files.sort();
    debug!("found {} program(s) in {}", files.len(), input.display());
    Ok(files)
}

fn emit_tokens(pipeline: &Pipeline, path: &Path) {
    let Ok(source) = fs::read_to_string(path) else {
        return;
    };
    match pipeline.tokens(&source) {
        Ok(tokens) => {
            let location = SourceLocation::new(&source);
            for (token, span) in tokens {
                println!("{}\t{}", location.span_start(&span), token.describe());
            }
        }
        Err(err) => error!("{}: {err}", path.display()),
    }
}

fn emit_module(emit: Emit, report: &FileReport) {
    let rendered =
        format_by_name(emit.format_name()).and_then(|format| format.serialize(&report.module));
    match rendered {
        Ok(text) => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
        Err(err) => error!("cannot render {}: {err}", emit.format_name()),
    }
}
