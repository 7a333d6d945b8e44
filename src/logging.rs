//! Structured logging with step recording and a final summary.
//!
//! Console output goes through [`tracing`]; the [`Logger`] additionally
//! records the outcome of each engine step so the entry path can print a
//! summary and derive the process exit code.

use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG` when set; otherwise defaults to `info`, or `debug` when
/// the `--verbose` flag is given. Safe to call more than once — later calls
/// are no-ops.
pub fn init_subscriber(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Outcome of a single recorded step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Step completed successfully.
    Ok,
    /// Step failed.
    Failed,
    /// Step was skipped (environment not present, nothing to do).
    Skipped,
}

/// One recorded step for the summary.
#[derive(Debug, Clone)]
struct StepEntry {
    name: String,
    status: StepStatus,
    message: Option<String>,
}

/// Logger with step collection for the run summary.
#[derive(Debug, Default)]
pub struct Logger {
    steps: Mutex<Vec<StepEntry>>,
}

impl Logger {
    /// Create a new logger with no recorded steps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a debug message (hidden unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Record a step result for the summary.
    pub fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.steps.lock() {
            guard.push(StepEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the recorded steps that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.steps.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|s| s.status == StepStatus::Failed)
                .count()
        })
    }

    /// Print a one-line-per-step summary of everything recorded.
    pub fn print_summary(&self) {
        let steps = match self.steps.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if steps.is_empty() {
            return;
        }
        println!();
        for step in &steps {
            let icon = match step.status {
                StepStatus::Ok => "\x1b[32m✓\x1b[0m",
                StepStatus::Failed => "\x1b[31m✗\x1b[0m",
                StepStatus::Skipped => "\x1b[2m−\x1b[0m",
            };
            match &step.message {
                Some(msg) => println!("  {icon} {} — {msg}", step.name),
                None => println!("  {icon} {}", step.name),
            }
        }
    }
}
