//! # LMS Models
//!
//! Domain models for the LMS admin tools.
//!
//! # Modules
//!
//! - [`accounts`]: Account requests, inserts, summaries and created-account results
//! - [`activity`]: Activity log entries and the action lookup table
//! - [`courses`]: Course models
//! - [`ids`]: Strongly-typed entity IDs
//! - [`roles`]: The five account roles
//! - [`value_types`]: Validated primitives such as [`Email`]

pub mod accounts;
pub mod activity;
pub mod courses;
pub mod ids;
pub mod roles;
pub mod value_types;

// Re-export commonly used types at crate root for convenience
pub use accounts::{AccountRequest, AccountSummary, CreatedAccount, NewAccount};
pub use activity::{ActivityAction, ActivityLog, NewActivityLog};
pub use courses::{Course, NewCourse};
pub use ids::{AccountId, ActivityLogId, CourseId};
pub use roles::Role;
pub use value_types::Email;
