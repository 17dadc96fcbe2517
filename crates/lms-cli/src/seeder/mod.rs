//! Demo data for development databases.
//!
//! `seed_users` inserts the fixed demo accounts (and optionally fake
//! students), then `seed_courses` builds a small catalogue owned by the
//! seeded teachers. Both skip records that already exist, so re-running them
//! is harmless.

pub mod courses;
pub mod models;
pub mod users;

pub use courses::{demo_courses, seed_courses};
pub use models::{CourseSeed, SeedSummary, UserSeed};
pub use users::{DEMO_PASSWORD, demo_users, generate_students, seed_users};
