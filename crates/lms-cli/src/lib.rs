//! # LMS CLI
//!
//! Administrative workflows for the LMS, shared by the `lms-admin` and
//! `lms-cli` binaries.
//!
//! - [`accounts`]: interactive bulk account creation
//! - [`seeder`]: demo users and courses for development databases
//! - [`activity`]: recording entries in the activity log
//! - [`terminal`]: the operator prompt abstraction
//!
//! ## Usage
//!
//! ```ignore
//! use lms_cli::accounts::{WorkflowOptions, run_session};
//! use lms_cli::terminal::DialoguerTerminal;
//!
//! let store = PgStore::connect(&config.database).await?;
//! let mut terminal = DialoguerTerminal::new();
//! let exit = run_session(&store, &mut terminal, &WorkflowOptions::from(&config), ctrl_c()).await;
//! std::process::exit(exit.exit_code());
//! ```

pub mod accounts;
pub mod activity;
pub mod seeder;
pub mod terminal;
