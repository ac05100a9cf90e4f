use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use lincanon::batch::{BatchConfig, Document, Outcome, OutputMode, process};
use lincanon::data::linear_program::canonical_form::CanonicalizationReport;
use lincanon::data::linear_program::dense::DenseModel;
use lincanon::data::linear_program::model::Model;
use lincanon::io::{import, import_strict};
use lincanon::io::lp::constraint::combine_texts;
use lincanon::io::lp::write::{WriteOptions, write};

/// Environment variable holding the log filter, e.g. `debug` or `lincanon=info`.
const LOG_FILTER_VARIABLE: &str = "LINCANON_LOG";

/// Read, canonicalize and export linear programs in LP format.
#[derive(Parser)]
#[command(version, about)]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a model in canonical form: maximize, only `<=` constraints, dense rows.
    Canonicalize {
        /// File containing the model
        problem_file: PathBuf,
        /// Where to write the result, instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Fail if any line or term can't be read
        #[arg(long)]
        strict: bool,
        /// Don't add a header line saying the file is in LP format
        #[arg(long)]
        no_default_header: bool,
    },
    /// Write a model as a dense JSON record with `c`, `A` and `b`.
    Export {
        /// File containing the model
        problem_file: PathBuf,
        /// Where to write the result, instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Fail if any line or term can't be read
        #[arg(long)]
        strict: bool,
        /// Export the model as read, without canonicalizing it first
        #[arg(long)]
        raw: bool,
        /// Replace positional references `x1`, `x2`, ... in this text by variable names
        #[arg(long)]
        substitute: Option<String>,
    },
    /// Sum constraints of the same sense, e.g. `"x + 2 y <= 5" "3 x <= 2"`.
    Combine {
        /// The constraints to add up
        #[arg(required = true)]
        constraints: Vec<String>,
    },
    /// Canonicalize many models; results are written next to each input file.
    Batch {
        /// Files containing the models
        #[arg(required = true)]
        problem_files: Vec<PathBuf>,
        /// Number of models processed at the same time
        #[arg(short, long)]
        workers: Option<usize>,
        /// Time limit per model, in milliseconds
        #[arg(short, long)]
        timeout: Option<u64>,
        /// Write dense JSON records instead of LP text
        #[arg(long)]
        dense: bool,
        /// Fail a model if any line or term can't be read
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    match Opts::parse().command {
        Command::Canonicalize { problem_file, output, strict, no_default_header } => {
            let mut model = read(&problem_file, strict)?;
            let report = model.canonicalize();
            print_report(&problem_file, &report);

            let options = WriteOptions::new().with_default_header(!no_default_header);
            emit(output.as_deref(), &write(&model, &options))
        },
        Command::Export { problem_file, output, strict, raw, substitute } => {
            let mut model = read(&problem_file, strict)?;
            if !raw {
                let report = model.canonicalize();
                print_report(&problem_file, &report);
            }

            let dense = DenseModel::from(&model);
            if let Some(text) = substitute {
                println!("{}", dense.substitute_indexed(&text));
            }
            emit(output.as_deref(), &dense.to_json()?)
        },
        Command::Combine { constraints } => {
            let lines = constraints.iter().map(String::as_str).collect::<Vec<_>>();
            match combine_texts(&lines) {
                Some(combined) => println!("{}", combined),
                None => {
                    eprintln!("Could not combine: a constraint can't be read or the senses differ.");
                    exit(1);
                },
            }
            Ok(())
        },
        Command::Batch { problem_files, workers, timeout, dense, strict } => {
            let mut config = BatchConfig::new()
                .with_strict(strict)
                .with_mode(if dense { OutputMode::Dense } else { OutputMode::Canonical });
            if let Some(workers) = workers {
                config = config.with_workers(workers);
            }
            if let Some(milliseconds) = timeout {
                config = config.with_timeout(Duration::from_millis(milliseconds));
            }

            let documents = problem_files.iter()
                .map(|path| {
                    let text = fs::read_to_string(path)
                        .with_context(|| format!("Could not read \"{}\"", path.display()))?;
                    Ok(Document::new(path.to_string_lossy(), text))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            let mut failures = 0;
            for (path, result) in problem_files.iter().zip(process(documents, &config)) {
                match result.outcome {
                    Outcome::Done(processed) => {
                        let target = output_path(path, config.mode);
                        fs::write(&target, processed.output)
                            .with_context(|| format!("Could not write \"{}\"", target.display()))?;
                        println!("{} -> {}", result.name, target.display());
                    },
                    Outcome::Failed(message) => {
                        failures += 1;
                        println!("{}: failed\n{}", result.name, message);
                    },
                    Outcome::TimedOut => {
                        failures += 1;
                        println!("{}: timed out", result.name);
                    },
                }
            }

            if failures > 0 {
                bail!("{} of {} models could not be processed", failures, problem_files.len());
            }
            Ok(())
        },
    }
}

fn init_logging() -> anyhow::Result<()> {
    let level = env::var(LOG_FILTER_VARIABLE).unwrap_or_else(|_| "warn".to_string());
    let filter = EnvFilter::try_new(&level)
        .with_context(|| format!("Invalid log filter in {}: \"{}\"", LOG_FILTER_VARIABLE, level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .context("Failed to initialize logging")
}

fn read(path: &Path, strict: bool) -> anyhow::Result<Model> {
    if strict {
        return import_strict(path).with_context(|| format!("Could not import \"{}\"", path.display()));
    }

    let parsed = import(path).with_context(|| format!("Could not import \"{}\"", path.display()))?;
    for diagnostic in &parsed.diagnostics {
        eprintln!("{}: {}", path.display(), diagnostic);
    }
    Ok(parsed.model)
}

fn print_report(path: &Path, report: &CanonicalizationReport) {
    if report.is_lossy() {
        eprintln!(
            "{}: equality constraints relaxed to <=: {}",
            path.display(),
            report.relaxed_equalities.join(", "),
        );
    }
}

fn emit(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => fs::write(path, text).with_context(|| format!("Could not write \"{}\"", path.display())),
        None => {
            print!("{}", text);
            Ok(())
        },
    }
}

/// Results of a batch are written next to the input, e.g. `model_updated.lp` for `model.lp`.
fn output_path(input: &Path, mode: OutputMode) -> PathBuf {
    let stem = input.file_stem().map_or_else(|| "model".into(), |stem| stem.to_string_lossy());
    match mode {
        OutputMode::Canonical => input.with_file_name(format!("{}_updated.lp", stem)),
        OutputMode::Dense => input.with_file_name(format!("{}.json", stem)),
    }
}
