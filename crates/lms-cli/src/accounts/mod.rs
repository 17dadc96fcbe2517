//! Bulk account creation.
//!
//! The workflow runs in fixed stages, each a separate function:
//!
//! ```text
//! collect emails -> validate -> assign roles -> confirm -> persist -> report/export
//! ```
//!
//! Empty or malformed input stops the run before anything is written (exit
//! code 1). Declining the confirmation stops it cleanly (exit code 0). Once
//! persisting starts every account is attempted exactly once; an existing
//! account is skipped and a failed one is logged, and neither stops the batch.
//!
//! [`run_session`] wraps the workflow with interrupt handling and guarantees
//! the store is closed exactly once however the run ends. An interrupt
//! during persisting still shows the credentials of every account created
//! before it.

pub mod input;
pub mod persist;
pub mod report;

use lms_config::AppConfig;
use lms_core::{AppError, exit_codes};
use lms_db::{AccountStore, PgStore};
use std::future::Future;
use std::io;
use std::path::PathBuf;

use crate::terminal::{DialoguerTerminal, Terminal};

pub use input::{InputError, assign_roles, confirm_batch, is_affirmative, parse_email_list};
pub use persist::{BatchReport, persist_batch};
pub use report::{export_accounts, export_file_name, render_account_block, render_accounts};

/// Settings the workflow needs beyond the store and terminal.
#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    pub bcrypt_cost: u32,
    pub export_dir: PathBuf,
}

impl From<&AppConfig> for WorkflowOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            bcrypt_cost: config.bcrypt_cost,
            export_dir: config.export_dir.clone(),
        }
    }
}

/// How a completed workflow ended.
#[derive(Debug)]
pub enum WorkflowOutcome {
    /// Input was empty or malformed; nothing was written.
    Rejected(InputError),
    /// The operator declined the confirmation; nothing was written.
    Cancelled,
    /// The batch was processed.
    Completed {
        report: BatchReport,
        export: Option<PathBuf>,
    },
}

impl WorkflowOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            WorkflowOutcome::Rejected(_) => exit_codes::INVALID_INPUT,
            WorkflowOutcome::Cancelled | WorkflowOutcome::Completed { .. } => exit_codes::SUCCESS,
        }
    }
}

/// How a session ended, including interrupts and unexpected errors.
#[derive(Debug)]
pub enum SessionExit {
    Finished(WorkflowOutcome),
    /// Ctrl-C. Holds whatever was persisted before it arrived.
    Interrupted(BatchReport),
    Failed(AppError),
}

impl SessionExit {
    pub fn exit_code(&self) -> i32 {
        match self {
            SessionExit::Finished(outcome) => outcome.exit_code(),
            SessionExit::Interrupted(_) => exit_codes::SUCCESS,
            SessionExit::Failed(e) => e.exit_code,
        }
    }
}

/// Runs the full workflow once.
pub async fn run_workflow<S, T>(
    store: &S,
    terminal: &mut T,
    options: &WorkflowOptions,
) -> Result<WorkflowOutcome, AppError>
where
    S: AccountStore + ?Sized,
    T: Terminal + ?Sized,
{
    run_stages(store, terminal, options, &mut BatchReport::default()).await
}

/// The workflow stages. Persisting fills `report` in place and the
/// completed outcome takes it.
async fn run_stages<S, T>(
    store: &S,
    terminal: &mut T,
    options: &WorkflowOptions,
    report: &mut BatchReport,
) -> Result<WorkflowOutcome, AppError>
where
    S: AccountStore + ?Sized,
    T: Terminal + ?Sized,
{
    terminal.say("👥 LMS bulk account creation");

    let raw = terminal
        .ask("Email addresses (comma-separated)")
        .await
        .map_err(AppError::internal)?;

    let emails = match parse_email_list(&raw) {
        Ok(emails) => emails,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected input");
            terminal.say(&format!("❌ {}", e));
            return Ok(WorkflowOutcome::Rejected(e));
        }
    };

    let requests = assign_roles(terminal, emails)
        .await
        .map_err(AppError::internal)?;

    if !confirm_batch(terminal, &requests)
        .await
        .map_err(AppError::internal)?
    {
        terminal.say("Cancelled. No accounts were created.");
        return Ok(WorkflowOutcome::Cancelled);
    }

    tracing::info!(count = requests.len(), "Creating accounts");
    terminal.say("🔐 Creating accounts...");
    persist_batch(store, terminal, requests, options.bcrypt_cost, report).await;
    let report = std::mem::take(report);

    if !report.created.is_empty() {
        terminal.say("");
        terminal.say(&render_accounts(&report.created));
    }
    terminal.say("");
    terminal.say(&format!(
        "✅ Done: {} created, {} skipped, {} failed",
        report.created.len(),
        report.skipped.len(),
        report.failed.len()
    ));

    let export = if report.created.is_empty() {
        None
    } else {
        offer_export(terminal, options, &report).await?
    };

    Ok(WorkflowOutcome::Completed { report, export })
}

async fn offer_export<T>(
    terminal: &mut T,
    options: &WorkflowOptions,
    report: &BatchReport,
) -> Result<Option<PathBuf>, AppError>
where
    T: Terminal + ?Sized,
{
    let answer = terminal
        .ask("Export these accounts and passwords to a text file? (y/N)")
        .await
        .map_err(AppError::internal)?;

    if !is_affirmative(&answer) {
        return Ok(None);
    }

    let today = chrono::Local::now().date_naive();
    let path = export_accounts(&options.export_dir, today, &report.created)
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to write export file: {}", e)))?;

    tracing::info!(path = %path.display(), count = report.created.len(), "Exported accounts");
    terminal.say(&format!("📝 Exported to {}", path.display()));
    terminal.say("⚠️  The file contains plaintext passwords. Store it securely and delete it once shared.");

    Ok(Some(path))
}

/// Runs the workflow until it finishes or `interrupt` resolves, then closes
/// the store. The store is closed exactly once on every path.
pub async fn run_session<S, T, F>(
    store: &S,
    terminal: &mut T,
    options: &WorkflowOptions,
    interrupt: F,
) -> SessionExit
where
    S: AccountStore + ?Sized,
    T: Terminal + ?Sized,
    F: Future<Output = ()>,
{
    let mut report = BatchReport::default();

    let ended = tokio::select! {
        result = run_stages(store, terminal, options, &mut report) => Some(result),
        _ = interrupt => None,
    };

    let exit = match ended {
        Some(Ok(outcome)) => SessionExit::Finished(outcome),
        Some(Err(e)) if !is_interrupted(&e) => {
            tracing::error!(error = %e, "Account creation failed");
            SessionExit::Failed(e)
        }
        _ => {
            tracing::warn!(created = report.created.len(), "Interrupted, shutting down");
            show_interrupted(terminal, &report);
            SessionExit::Interrupted(report)
        }
    };

    store.close().await;
    exit
}

/// A prompt cut short by Ctrl-C before the signal handler saw it.
fn is_interrupted(err: &AppError) -> bool {
    err.error
        .downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::Interrupted)
}

fn show_interrupted<T>(terminal: &mut T, report: &BatchReport)
where
    T: Terminal + ?Sized,
{
    terminal.say("");
    terminal.say("Interrupted. Closing connection.");

    if !report.created.is_empty() {
        terminal.say(&format!(
            "⚠️  {} account(s) were created before the interrupt. Their passwords are shown once:",
            report.created.len()
        ));
        terminal.say("");
        terminal.say(&render_accounts(&report.created));
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed it never resolves.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Connects to the database and runs an interactive session.
///
/// Returns the process exit code.
pub async fn run_interactive(config: &AppConfig) -> i32 {
    let store = match PgStore::connect(&config.database).await {
        Ok(store) => store,
        Err(e) => {
            let err = AppError::database(e);
            tracing::error!(error = %err, "Failed to connect to database");
            eprintln!("❌ Failed to connect to database: {}", err);
            return err.exit_code;
        }
    };

    let mut terminal = DialoguerTerminal::new();
    let exit = run_session(&store, &mut terminal, &WorkflowOptions::from(config), ctrl_c()).await;

    if let SessionExit::Failed(e) = &exit {
        eprintln!("\n❌ Error creating accounts: {}", e);
    }

    exit.exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::ScriptedTerminal;
    use lms_db::MemoryStore;

    fn options(dir: &std::path::Path) -> WorkflowOptions {
        WorkflowOptions {
            bcrypt_cost: 4,
            export_dir: dir.to_path_buf(),
        }
    }

    #[tokio::test]
    async fn test_invalid_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        let mut terminal = ScriptedTerminal::new(["ok@x.com, nope"]);

        let outcome = run_workflow(&store, &mut terminal, &options(dir.path()))
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            WorkflowOutcome::Rejected(InputError::InvalidEmails(ref bad)) if bad == &vec!["nope".to_string()]
        ));
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(store.lookup_count(), 0);
        assert_eq!(store.create_count(), 0);
    }

    #[tokio::test]
    async fn test_declined_confirmation_exits_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        let mut terminal = ScriptedTerminal::new(["a@x.com", "teacher", "no"]);

        let outcome = run_workflow(&store, &mut terminal, &options(dir.path()))
            .await
            .unwrap();

        assert!(matches!(outcome, WorkflowOutcome::Cancelled));
        assert_eq!(outcome.exit_code(), 0);
        assert!(store.accounts().is_empty());
    }

    #[tokio::test]
    async fn test_completed_without_export() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        let mut terminal = ScriptedTerminal::new(["a@x.com", "admin", "y", "n"]);

        let outcome = run_workflow(&store, &mut terminal, &options(dir.path()))
            .await
            .unwrap();

        match outcome {
            WorkflowOutcome::Completed { report, export } => {
                assert_eq!(report.created.len(), 1);
                assert!(export.is_none());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_no_export_prompt_when_nothing_created() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        store.insert_account("a@x.com", "A", lms_models::Role::Student);
        let mut terminal = ScriptedTerminal::new(["a@x.com", "", "yes"]);

        let outcome = run_workflow(&store, &mut terminal, &options(dir.path()))
            .await
            .unwrap();

        assert!(matches!(outcome, WorkflowOutcome::Completed { export: None, .. }));
        assert_eq!(terminal.remaining_answers(), 0);
        assert!(!terminal.prompts.iter().any(|p| p.contains("Export")));
    }

    #[tokio::test]
    async fn test_terminal_failure_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        let mut terminal = ScriptedTerminal::new(["a@x.com"]);

        let exit = run_session(&store, &mut terminal, &options(dir.path()), std::future::pending()).await;

        assert!(matches!(exit, SessionExit::Failed(_)));
        assert_eq!(exit.exit_code(), 2);
        assert_eq!(store.close_count(), 1);
    }

    /// Terminal whose prompts fail the way dialoguer reports Ctrl-C.
    struct CtrlCTerminal {
        output: Vec<String>,
    }

    #[async_trait::async_trait]
    impl Terminal for CtrlCTerminal {
        async fn ask(&mut self, _prompt: &str) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::Interrupted, "read interrupted"))
        }

        fn say(&mut self, text: &str) {
            self.output.push(text.to_string());
        }
    }

    #[tokio::test]
    async fn test_interrupted_prompt_is_an_interrupt_not_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        let mut terminal = CtrlCTerminal { output: Vec::new() };
        let interrupt = async {
            tokio::task::yield_now().await;
        };

        let exit = run_session(&store, &mut terminal, &options(dir.path()), interrupt).await;

        assert!(matches!(exit, SessionExit::Interrupted(ref report) if report.attempted() == 0));
        assert_eq!(exit.exit_code(), 0);
        assert_eq!(store.close_count(), 1);
        assert!(!terminal.output.iter().any(|line| line.contains("Error")));
    }

    #[tokio::test]
    async fn test_interrupted_prompt_without_signal() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new();
        let mut terminal = CtrlCTerminal { output: Vec::new() };

        let exit = run_session(&store, &mut terminal, &options(dir.path()), std::future::pending()).await;

        assert_eq!(exit.exit_code(), 0);
        assert_eq!(store.close_count(), 1);
    }

    #[test]
    fn test_only_interrupted_io_errors_count_as_interrupts() {
        let interrupted = AppError::internal(io::Error::new(io::ErrorKind::Interrupted, "ctrl-c"));
        let eof = AppError::internal(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        let other = AppError::internal(anyhow::anyhow!("interrupted"));

        assert!(is_interrupted(&interrupted));
        assert!(!is_interrupted(&eof));
        assert!(!is_interrupted(&other));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(SessionExit::Interrupted(BatchReport::default()).exit_code(), 0);
        assert_eq!(
            SessionExit::Finished(WorkflowOutcome::Rejected(InputError::NoInput)).exit_code(),
            1
        );
        assert_eq!(SessionExit::Finished(WorkflowOutcome::Cancelled).exit_code(), 0);
    }
}
