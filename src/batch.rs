//! # Processing many documents
//!
//! Documents are independent of each other, so they are processed on separate threads. Each
//! document is read, canonicalized and written in the configured output form. A document that
//! can't be read (in strict mode) or that takes longer than the timeout doesn't affect the others.
//!
//! ```text
//! Documents [A, B, C, D, E]
//!    │
//!    ├─ Round 0: [A, B, C] ──> one thread each, results collected until the deadline
//!    └─ Round 1: [D, E]    ──> ...
//!         │
//!         ▼
//! Results in input order
//! ```
use std::num::NonZeroUsize;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::data::linear_program::canonical_form::CanonicalizationReport;
use crate::data::linear_program::dense::DenseModel;
use crate::io::error::{Parse, ParseResult};
use crate::io::lp::write::{write, WriteOptions};
use crate::io::lp::{parse, LineDiagnostic};

/// What to produce for each document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// The canonical model as LP text.
    #[default]
    Canonical,
    /// The canonical model as a dense JSON record.
    Dense,
}

/// Configuration of a batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of documents started together in a round. At least one.
    ///
    /// A new round starts when every document of the previous one finished or timed out. Threads
    /// of documents that timed out keep running in the background, so with many documents that
    /// never finish, more than `workers` threads can be busy at the same time.
    pub workers: usize,
    /// Time a single document may take. `None` means no limit.
    pub timeout: Option<Duration>,
    /// Fail a document when any line or term of it had to be skipped.
    pub strict: bool,
    /// What to produce.
    pub mode: OutputMode,
    /// How to write LP text.
    pub write_options: WriteOptions,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            timeout: None,
            strict: false,
            mode: OutputMode::default(),
            write_options: WriteOptions::default(),
        }
    }
}

impl BatchConfig {
    /// Create a new configuration with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of worker threads.
    #[must_use]
    pub fn with_workers(mut self, count: usize) -> Self {
        self.workers = count.max(1);
        self
    }

    /// Set the time limit per document.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable strict reading.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the output mode.
    #[must_use]
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the options for writing LP text.
    #[must_use]
    pub fn with_write_options(mut self, options: WriteOptions) -> Self {
        self.write_options = options;
        self
    }
}

/// A named LP document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Used to identify the document in logs and results, e.g. a file name.
    pub name: String,
    /// Contents in LP format.
    pub text: String,
}

impl Document {
    /// Create a new document.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }
}

/// Everything produced for a single document.
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    /// LP text or JSON, depending on the output mode.
    pub output: String,
    /// What canonicalization changed.
    pub report: CanonicalizationReport,
    /// Lines and terms that were skipped while reading.
    pub diagnostics: Vec<LineDiagnostic>,
}

/// How processing of a document ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Processed successfully.
    Done(Processed),
    /// The document could not be processed. Contains a message for the end user.
    Failed(String),
    /// Processing took longer than the timeout and was abandoned.
    TimedOut,
}

/// Outcome of a document in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentResult {
    /// Name of the document.
    pub name: String,
    /// How processing ended.
    pub outcome: Outcome,
}

/// Read, canonicalize and write a single document.
///
/// # Errors
///
/// In strict mode, when anything had to be skipped while reading. In dense mode, when the record
/// can't be written as JSON.
pub fn process_document(text: &str, config: &BatchConfig) -> ParseResult<Processed> {
    let parsed = parse(text);
    let diagnostics = parsed.diagnostics.clone();
    let mut model = if config.strict { parsed.strict()? } else { parsed.model };

    let report = model.canonicalize();
    let output = match config.mode {
        OutputMode::Canonical => write(&model, &config.write_options),
        OutputMode::Dense => DenseModel::from(&model)
            .to_json()
            .map_err(|error| Parse::new(format!("Could not write dense record: {}", error)))?,
    };

    Ok(Processed { output, report, diagnostics })
}

/// Process documents concurrently.
///
/// # Return value
///
/// One result per document, in the order of the input.
#[must_use]
pub fn process(documents: Vec<Document>, config: &BatchConfig) -> Vec<DocumentResult> {
    let started = Instant::now();
    debug!(
        component = "batch",
        operation = "process",
        status = "start",
        documents = documents.len(),
        workers = config.workers,
        "Starting batch"
    );

    let names = documents.iter().map(|document| document.name.clone()).collect::<Vec<_>>();
    let jobs = documents.into_iter()
        .map(|document| {
            let config = config.clone();
            move || process_document(&document.text, &config).map_err(|error| error.to_string())
        })
        .collect::<Vec<_>>();

    let results = run(jobs, config.workers, config.timeout).into_iter()
        .zip(names)
        .map(|(outcome, name)| {
            let outcome = match outcome {
                Finished::Value(Ok(processed)) => Outcome::Done(processed),
                Finished::Value(Err(message)) | Finished::Lost(message) => {
                    warn!(document = name.as_str(), %message, "document failed");
                    Outcome::Failed(message)
                },
                Finished::TimedOut => {
                    warn!(document = name.as_str(), "document timed out");
                    Outcome::TimedOut
                },
            };
            DocumentResult { name, outcome }
        })
        .collect::<Vec<_>>();

    let done = results.iter().filter(|result| matches!(result.outcome, Outcome::Done(_))).count();
    info!(
        component = "batch",
        operation = "process",
        status = "complete",
        done,
        failed = results.len() - done,
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Completed batch"
    );

    results
}

/// How a job ended.
#[derive(Debug, PartialEq)]
enum Finished<T> {
    Value(T),
    /// The job never reported back, e.g. because it panicked. Contains a message.
    Lost(String),
    TimedOut,
}

/// Run jobs on separate threads, at most `workers` at a time.
///
/// Jobs are started in rounds of `workers` jobs. The timeout of a round starts when the round
/// starts; threads of jobs that time out are left to finish in the background and their results
/// are dropped.
fn run<T, F>(jobs: Vec<F>, workers: usize, timeout: Option<Duration>) -> Vec<Finished<T>>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let mut results = Vec::with_capacity(jobs.len());

    let mut jobs = jobs.into_iter().peekable();
    let mut round_start = 0;
    while jobs.peek().is_some() {
        let (sender, receiver) = mpsc::channel();

        let mut round = Vec::new();
        for (offset, job) in jobs.by_ref().take(workers.max(1)).enumerate() {
            let sender = sender.clone();
            let spawned = thread::Builder::new()
                .name(format!("lincanon-worker-{}", round_start + offset))
                .spawn(move || {
                    // The receiver is gone after a timeout.
                    let _ = sender.send((offset, job()));
                });
            round.push(match spawned {
                Ok(_) => None,
                Err(error) => Some(Finished::Lost(format!("Could not start worker: {}", error))),
            });
        }
        drop(sender);

        let deadline = timeout.map(|timeout| Instant::now() + timeout);
        let mut pending = round.iter().filter(|slot| slot.is_none()).count();
        while pending > 0 {
            let received = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    receiver.recv_timeout(remaining).map_err(|error| error == mpsc::RecvTimeoutError::Timeout)
                },
                None => receiver.recv().map_err(|_| false),
            };

            match received {
                Ok((offset, value)) => {
                    round[offset] = Some(Finished::Value(value));
                    pending -= 1;
                },
                Err(timed_out) => {
                    for slot in round.iter_mut().filter(|slot| slot.is_none()) {
                        *slot = Some(if timed_out {
                            Finished::TimedOut
                        } else {
                            Finished::Lost("Worker stopped without a result".to_string())
                        });
                    }
                    pending = 0;
                },
            }
        }

        round_start += round.len();
        results.extend(round.into_iter().flatten());
    }

    results
}

#[cfg(test)]
mod test {
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::batch::{process, process_document, run, BatchConfig, Document, Finished, Outcome, OutputMode};
    use crate::io::lp::write::WriteOptions;

    const MODEL: &str = "Minimize\n x + y\nSubject To\n c: x + y >= 1\nEnd\n";

    #[test]
    fn config_builder() {
        let config = BatchConfig::new()
            .with_workers(0)
            .with_timeout(Duration::from_secs(2))
            .with_strict(true)
            .with_mode(OutputMode::Dense);

        assert_eq!(config.workers, 1);
        assert_eq!(config.timeout, Some(Duration::from_secs(2)));
        assert!(config.strict);
        assert_eq!(config.mode, OutputMode::Dense);
        assert!(BatchConfig::default().workers >= 1);
    }

    #[test]
    fn single_document() {
        let config = BatchConfig::new().with_write_options(WriteOptions::new().with_default_header(false));
        let processed = process_document(MODEL, &config).unwrap();

        assert_eq!(processed.output, "Maximize\n  - 1 x - 1 y\nSubject To\n c: - 1 x - 1 y <= -1\nEnd\n");
        assert!(processed.report.negated_objective);
        assert_eq!(processed.report.flipped, vec!["c"]);
    }

    #[test]
    fn dense_output() {
        let config = BatchConfig::new().with_mode(OutputMode::Dense);
        let processed = process_document(MODEL, &config).unwrap();

        let value: serde_json::Value = serde_json::from_str(&processed.output).unwrap();
        assert_eq!(value["variables"], serde_json::json!(["x", "y"]));
        assert_eq!(value["b"], serde_json::json!([-1.0]));
    }

    #[test]
    fn strict_mode() {
        let text = "Maximize\n x\nSubject To\n x <= 1\nEnd\n";

        let lenient = process_document(text, &BatchConfig::new()).unwrap();
        assert_eq!(lenient.diagnostics.len(), 1);
        assert!(process_document(text, &BatchConfig::new().with_strict(true)).is_err());
    }

    #[test]
    fn results_in_input_order() {
        let documents = (0..5)
            .map(|index| Document::new(format!("doc{}", index), if index == 3 { "Maximize\n x + 1\nEnd\n" } else { MODEL }))
            .collect();
        let config = BatchConfig::new().with_workers(2).with_strict(true);
        let results = process(documents, &config);

        let names = results.iter().map(|result| result.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["doc0", "doc1", "doc2", "doc3", "doc4"]);
        for (index, result) in results.iter().enumerate() {
            assert_eq!(matches!(result.outcome, Outcome::Failed(_)), index == 3);
        }
    }

    #[test]
    fn slow_jobs_time_out() {
        let jobs: Vec<Box<dyn FnOnce() -> u32 + Send>> = vec![
            Box::new(|| 1),
            Box::new(|| {
                thread::sleep(Duration::from_secs(5));
                2
            }),
            Box::new(|| 3),
        ];
        let results = run(jobs, 3, Some(Duration::from_millis(500)));

        assert_eq!(results, vec![Finished::Value(1), Finished::TimedOut, Finished::Value(3)]);
    }

    #[test]
    fn next_round_does_not_wait_for_timed_out_jobs() {
        let jobs: Vec<Box<dyn FnOnce() -> u32 + Send>> = vec![
            Box::new(|| {
                thread::sleep(Duration::from_secs(10));
                1
            }),
            Box::new(|| 2),
        ];
        let started = Instant::now();
        let results = run(jobs, 1, Some(Duration::from_millis(200)));

        assert_eq!(results, vec![Finished::TimedOut, Finished::Value(2)]);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn panicking_job_is_lost() {
        let jobs: Vec<Box<dyn FnOnce() -> u32 + Send>> = vec![Box::new(|| panic!("broken")), Box::new(|| 2)];
        let results = run(jobs, 1, None);

        assert!(matches!(results[0], Finished::Lost(_)));
        assert_eq!(results[1], Finished::Value(2));
    }
}
