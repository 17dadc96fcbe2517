//! Course models.

use crate::ids::{AccountId, CourseId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A course, owned by one teacher account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: CourseId,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: AccountId,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Fields written when creating a course.
#[derive(Debug, Clone, Validate)]
pub struct NewCourse {
    #[validate(length(min = 1, max = 32, message = "course code must be 1-32 characters"))]
    pub code: String,
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: AccountId,
}
