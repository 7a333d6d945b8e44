//! Setup wizard: page state machine and console front-end.
//!
//! [`Wizard`] owns the page state, the license-acceptance flag and the
//! install log; it performs only guarded transitions and knows nothing about
//! rendering. [`run`] is the console driver: it prints each page, reads
//! stdin, spawns the install worker, and marshals worker messages back onto
//! the foreground thread — the single writer of all wizard state.

use std::io::{self, BufRead as _, Write as _};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use anyhow::Result;

use crate::assets::EmbeddedResources;
use crate::engine::{InstallEngine, InstallOutcome, ProgressEvent, ProgressSink};
use crate::error::SetupError;
use crate::logging::Logger;

/// The wizard pages, in forward order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Introductory page.
    Welcome,
    /// License agreement; advancement gated on acceptance.
    License,
    /// Installation in progress; no manual advancement, no cancel.
    Installing,
    /// Terminal success page.
    Complete,
}

/// How an interactive wizard session ended (fatal failures surface as errors
/// instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardExit {
    /// Install finished and the user pressed Finish.
    Completed,
    /// The user cancelled before installation began.
    Cancelled,
}

/// The wizard state machine.
#[derive(Debug)]
pub struct Wizard {
    page: Page,
    license_accepted: bool,
    log: Vec<String>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    /// A wizard on the Welcome page with the license not yet accepted.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: Page::Welcome,
            license_accepted: false,
            log: Vec::new(),
        }
    }

    /// Current page.
    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    /// Set the license-acceptance flag (the License page's checkbox).
    pub const fn set_license_accepted(&mut self, accepted: bool) {
        self.license_accepted = accepted;
    }

    /// Whether the Next affordance is enabled on the current page.
    #[must_use]
    pub const fn can_advance(&self) -> bool {
        match self.page {
            Page::Welcome => true,
            Page::License => self.license_accepted,
            // Installing advances only via the install outcome; Complete
            // terminates via Finish, not via a page transition.
            Page::Installing | Page::Complete => false,
        }
    }

    /// Apply the Next transition if it is enabled. Returns whether the page
    /// changed.
    pub const fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.page = match self.page {
            Page::Welcome => Page::License,
            Page::License => Page::Installing,
            Page::Installing | Page::Complete => return false,
        };
        true
    }

    /// Whether cancellation is still allowed (only before installation
    /// begins).
    #[must_use]
    pub const fn can_cancel(&self) -> bool {
        matches!(self.page, Page::Welcome | Page::License)
    }

    /// Append one line to the install log buffer.
    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    /// The install log collected so far.
    #[must_use]
    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    /// Consume the install outcome. On success the wizard moves to the
    /// Complete page; on failure the reason is handed back for the caller to
    /// surface and terminate with.
    ///
    /// # Errors
    ///
    /// Returns the failure reason, or a note when no installation is in
    /// progress.
    pub fn finish(&mut self, outcome: &InstallOutcome) -> Result<(), String> {
        if self.page != Page::Installing {
            return Err("no installation in progress".to_string());
        }
        match outcome {
            InstallOutcome::Succeeded => {
                self.page = Page::Complete;
                Ok(())
            }
            InstallOutcome::Failed { reason } => Err(reason.clone()),
        }
    }
}

/// Message sent from the install worker to the foreground thread.
#[derive(Debug)]
enum WorkerMessage {
    /// One progress log line.
    Progress(ProgressEvent),
    /// The terminal outcome; always the last message.
    Done(InstallOutcome),
}

/// Progress sink that forwards events over the worker channel.
#[derive(Debug)]
struct ChannelSink(mpsc::Sender<WorkerMessage>);

impl ProgressSink for ChannelSink {
    fn emit(&self, event: ProgressEvent) {
        // The receiver hanging up just means nobody is watching anymore.
        let _ = self.0.send(WorkerMessage::Progress(event));
    }
}

const LICENSE_TEXT: &str = "\
PSLastOutput License Agreement

1. Usage: You are free to use this software for any purpose.
2. Liability: The author is not liable for any damages.
3. Privacy: No data is sent to the cloud. All processing is local.
4. Aesthetics: The user agrees that this installer looks cool.

By agreeing, you accept these terms.";

/// Run the interactive wizard to completion.
///
/// # Errors
///
/// Returns an error when the Documents directory cannot be determined, when
/// the install worker fails fatally, or on console I/O errors.
pub fn run(log: &Logger) -> Result<WizardExit> {
    // Ctrl-C maps to the cancelled exit code, but only while cancellation is
    // still allowed; once installing, the run always completes or aborts on
    // its own terms.
    let installing = Arc::new(AtomicBool::new(false));
    {
        let installing = Arc::clone(&installing);
        let _ = ctrlc::set_handler(move || {
            if !installing.load(Ordering::SeqCst) {
                std::process::exit(2);
            }
        });
    }

    let mut wizard = Wizard::new();
    let stdin = io::stdin();

    loop {
        match wizard.page() {
            Page::Welcome => {
                let version = option_env!("PSSETUP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
                println!("\nWelcome to PSLastOutput Setup ({version})\n");
                println!(
                    "This wizard will guide you through the installation of PSLastOutput.\n\
                     PSLastOutput is a utility to capture and copy your last PowerShell\n\
                     command and output easily.\n"
                );
                match prompt(&stdin, "Press Enter to continue, or q to quit: ")? {
                    Some(input) if input.eq_ignore_ascii_case("q") => {
                        return Ok(WizardExit::Cancelled);
                    }
                    Some(_) => {
                        wizard.advance();
                    }
                    None => return Ok(WizardExit::Cancelled),
                }
            }
            Page::License => {
                println!("\nTerms and Conditions\n\n{LICENSE_TEXT}\n");
                match prompt(&stdin, "Accept the terms and install? [y/q]: ")? {
                    Some(input) if input.eq_ignore_ascii_case("y") => {
                        wizard.set_license_accepted(true);
                        wizard.advance();
                    }
                    Some(input) if input.eq_ignore_ascii_case("q") => {
                        return Ok(WizardExit::Cancelled);
                    }
                    Some(_) => {} // re-show the prompt
                    None => return Ok(WizardExit::Cancelled),
                }
            }
            Page::Installing => {
                installing.store(true, Ordering::SeqCst);
                println!("\nInstalling...\n");
                log.debug("starting install worker");

                let engine = InstallEngine::from_environment()?;
                let (tx, rx) = mpsc::channel();
                let worker = std::thread::spawn(move || {
                    let sink = ChannelSink(tx.clone());
                    let outcome = engine.install(&EmbeddedResources, &sink);
                    let _ = tx.send(WorkerMessage::Done(outcome));
                });

                let mut outcome = None;
                for message in rx {
                    match message {
                        WorkerMessage::Progress(event) => {
                            println!("  {}", event.message);
                            wizard.push_log(event.message);
                        }
                        WorkerMessage::Done(result) => {
                            outcome = Some(result);
                            break;
                        }
                    }
                }
                let _ = worker.join();

                let outcome = outcome.ok_or(SetupError::WorkerDisconnected)?;
                if let Err(reason) = wizard.finish(&outcome) {
                    anyhow::bail!("installation failed: {reason}");
                }
            }
            Page::Complete => {
                println!("\nInstallation Complete\n");
                println!(
                    "PSLastOutput has been successfully installed.\n\
                     Please restart your PowerShell windows to start using the tool.\n\
                     Press Ctrl+Shift+C to use it!\n"
                );
                let _ = prompt(&stdin, "Press Enter to finish: ")?;
                return Ok(WizardExit::Completed);
            }
        }
    }
}

/// Print `text` and read one trimmed line. `None` means stdin reached EOF.
fn prompt(stdin: &io::Stdin, text: &str) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    let read = stdin.lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
