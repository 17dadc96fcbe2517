//! Activity log models and the lookup table of action names.

use crate::ids::{AccountId, ActivityLogId};
use serde::{Deserialize, Serialize};
use sqlx::{Database, Decode, Encode, FromRow, Type, postgres::PgTypeInfo};
use std::fmt;
use std::str::FromStr;

/// Actions that can be recorded in the activity log.
///
/// Each action is stored in the `action` column under its snake_case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Login,
    Logout,
    AccountCreated,
    PasswordChanged,
    CourseCreated,
    CourseUpdated,
    CourseEnrolled,
    AssignmentSubmitted,
    GradePosted,
}

/// Stored name and human-readable label for every action.
static ACTIONS: [(ActivityAction, &str, &str); 9] = [
    (ActivityAction::Login, "login", "User logged in"),
    (ActivityAction::Logout, "logout", "User logged out"),
    (ActivityAction::AccountCreated, "account_created", "Account created"),
    (ActivityAction::PasswordChanged, "password_changed", "Password changed"),
    (ActivityAction::CourseCreated, "course_created", "Course created"),
    (ActivityAction::CourseUpdated, "course_updated", "Course updated"),
    (ActivityAction::CourseEnrolled, "course_enrolled", "Enrolled in course"),
    (
        ActivityAction::AssignmentSubmitted,
        "assignment_submitted",
        "Assignment submitted",
    ),
    (ActivityAction::GradePosted, "grade_posted", "Grade posted"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown activity action '{}'", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl ActivityAction {
    pub fn all() -> impl Iterator<Item = ActivityAction> {
        ACTIONS.iter().map(|(action, _, _)| *action)
    }

    fn entry(&self) -> &'static (ActivityAction, &'static str, &'static str) {
        ACTIONS
            .iter()
            .find(|(action, _, _)| action == self)
            .unwrap_or(&ACTIONS[0])
    }

    /// The name written to the database.
    pub fn as_str(&self) -> &'static str {
        self.entry().1
    }

    pub fn label(&self) -> &'static str {
        self.entry().2
    }
}

impl FromStr for ActivityAction {
    type Err = UnknownAction;

    /// Accepts `course_created` as well as `COURSE_CREATED`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ACTIONS
            .iter()
            .find(|(_, name, _)| *name == normalized)
            .map(|(action, _, _)| *action)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Type<sqlx::Postgres> for ActivityAction {
    fn type_info() -> PgTypeInfo {
        <String as Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, sqlx::Postgres> for ActivityAction {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> Decode<'r, sqlx::Postgres> for ActivityAction {
    fn decode(
        value: <sqlx::Postgres as Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let name = <&str as Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(name.parse::<ActivityAction>()?)
    }
}

/// A recorded activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ActivityLog {
    pub id: ActivityLogId,
    pub user_id: AccountId,
    pub action: ActivityAction,
    pub details: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Fields written when recording an activity.
#[derive(Debug, Clone)]
pub struct NewActivityLog {
    pub user_id: AccountId,
    pub action: ActivityAction,
    pub details: Option<serde_json::Value>,
}
