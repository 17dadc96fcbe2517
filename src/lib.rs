//! # LMS Admin
//!
//! Operator tooling for a learning-management system's user store.
//!
//! The `lms-admin` binary reads a comma-separated list of email addresses,
//! asks for a role per address, confirms the batch, then creates each
//! account with a generated password and bcrypt hash. Created credentials are
//! printed once and can be exported to a dated text file.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── lms-core/           # Exit codes, AppError, password generation and hashing, name derivation
//! ├── lms-config/         # Environment configuration
//! ├── lms-models/         # Email, Role, account/course/activity models, typed IDs
//! ├── lms-db/             # Store traits, PgStore, in-memory store (test-utils)
//! ├── lms-observability/  # tracing subscriber setup
//! └── lms-cli/            # Workflows: accounts, seeder, activity; the lms-cli binary
//! ```
//!
//! This crate re-exports the workspace crates under short names.

pub use lms_cli as cli;
pub use lms_config as config;
pub use lms_core as core;
pub use lms_db as db;
pub use lms_models as models;
pub use lms_observability as observability;
