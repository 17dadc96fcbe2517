//! Seed data definitions.

use lms_models::Role;

/// Seed data for creating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSeed {
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl UserSeed {
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role,
        }
    }
}

/// Seed data for creating a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSeed {
    pub code: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Counts reported by a seeding run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub created: usize,
    pub skipped: usize,
}

impl SeedSummary {
    pub fn total(&self) -> usize {
        self.created + self.skipped
    }
}
