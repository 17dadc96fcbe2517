//! Store contracts used by the admin workflows.
//!
//! The workflows only ever see these traits, so a Postgres-backed store and
//! an in-memory double are interchangeable.

use async_trait::async_trait;
use lms_models::{
    AccountSummary, ActivityLog, Course, Email, NewAccount, NewActivityLog, NewCourse, Role,
};
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("{0} already exists")]
    Conflict(String),

    /// The record was malformed, either before the write or by a constraint.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    /// Maps a failed insert, naming the record in constraint errors.
    pub fn from_insert(err: sqlx::Error, record: impl Into<String>) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation => return StoreError::Conflict(record.into()),
                ErrorKind::CheckViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::ForeignKeyViolation => {
                    return StoreError::Validation(db_err.message().to_string());
                }
                _ => {}
            }
        }
        StoreError::Database(err)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

impl From<validator::ValidationErrors> for StoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        StoreError::Validation(errors.to_string())
    }
}

/// Account persistence.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Looks up an account by its unique email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<AccountSummary>, StoreError>;

    /// Creates an account.
    ///
    /// Fails with [`StoreError::Conflict`] if the email is taken and
    /// [`StoreError::Validation`] if the fields are malformed.
    async fn create_account(&self, account: NewAccount) -> Result<AccountSummary, StoreError>;

    /// Lists accounts holding `role`, oldest first.
    async fn list_by_role(&self, role: Role) -> Result<Vec<AccountSummary>, StoreError>;

    /// Releases the underlying connection. Safe to call more than once.
    async fn close(&self);
}

/// Course persistence.
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn find_course_by_code(&self, code: &str) -> Result<Option<Course>, StoreError>;

    /// Fails with [`StoreError::Conflict`] if the code is taken.
    async fn create_course(&self, course: NewCourse) -> Result<Course, StoreError>;
}

/// Activity log persistence.
#[async_trait]
pub trait ActivityLogStore: Send + Sync {
    async fn create_activity_log(&self, entry: NewActivityLog) -> Result<ActivityLog, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::DatabaseError;
    use std::error::Error as StdError;

    /// A Postgres-style constraint error of a chosen kind.
    #[derive(Debug, Error)]
    #[error("{message}")]
    struct ConstraintError {
        kind: ErrorKind,
        message: String,
    }

    impl DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            &self.message
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.kind {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                ErrorKind::NotNullViolation => ErrorKind::NotNullViolation,
                ErrorKind::CheckViolation => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(kind: ErrorKind, message: &str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintError {
            kind,
            message: message.to_string(),
        }))
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let err = StoreError::from_insert(
            db_error(ErrorKind::UniqueViolation, "duplicate key value violates unique constraint"),
            "account a@b.co",
        );
        assert!(matches!(err, StoreError::Conflict(ref record) if record == "account a@b.co"));
        assert_eq!(err.to_string(), "account a@b.co already exists");
    }

    #[test]
    fn test_constraint_violations_are_validation() {
        for kind in [
            ErrorKind::CheckViolation,
            ErrorKind::NotNullViolation,
            ErrorKind::ForeignKeyViolation,
        ] {
            let err = StoreError::from_insert(db_error(kind, "violates constraint users_name_check"), "x");
            assert!(
                matches!(err, StoreError::Validation(ref msg) if msg == "violates constraint users_name_check"),
                "unexpected mapping: {:?}",
                err
            );
        }
    }

    #[test]
    fn test_other_database_errors_stay_database() {
        let err = StoreError::from_insert(db_error(ErrorKind::Other, "deadlock detected"), "x");
        assert!(matches!(err, StoreError::Database(sqlx::Error::Database(_))));
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = StoreError::from_insert(sqlx::Error::RowNotFound, "account a@b.co");
        assert!(matches!(err, StoreError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            StoreError::Conflict("account a@b.co".into()).to_string(),
            "account a@b.co already exists"
        );
        assert_eq!(
            StoreError::Validation("name cannot be empty".into()).to_string(),
            "validation failed: name cannot be empty"
        );
    }
}
