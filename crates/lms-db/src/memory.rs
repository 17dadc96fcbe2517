//! In-memory store for tests and dry runs.
//!
//! Behaves like the Postgres store (unique emails and course codes, field
//! validation, server-assigned ids and timestamps) and adds hooks for
//! injecting failures and observing how it was used.

use async_trait::async_trait;
use lms_models::{
    AccountId, AccountSummary, ActivityLog, ActivityLogId, Course, CourseId, Email, NewAccount,
    NewActivityLog, NewCourse, Role,
};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use validator::Validate;

use crate::store::{AccountStore, ActivityLogStore, CourseStore, StoreError};

#[derive(Debug, Clone)]
struct StoredAccount {
    summary: AccountSummary,
    password_hash: String,
}

#[derive(Debug, Default)]
struct State {
    accounts: Vec<StoredAccount>,
    courses: Vec<Course>,
    activity: Vec<ActivityLog>,
    failing_emails: HashSet<String>,
    hidden_emails: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    lookups: AtomicUsize,
    creates: AtomicUsize,
    closes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Makes every create for `email` fail with a database error.
    pub fn fail_creates_for(&self, email: &str) {
        self.state().failing_emails.insert(email.to_string());
    }

    /// Makes lookups for `email` miss even when the account exists, so the
    /// create races into a uniqueness conflict.
    pub fn hide_from_lookups(&self, email: &str) {
        self.state().hidden_emails.insert(email.to_string());
    }

    /// Inserts an account directly, bypassing the counters.
    pub fn insert_account(&self, email: &str, name: &str, role: Role) -> AccountSummary {
        let summary = AccountSummary {
            id: AccountId::new(),
            email: Email::new_unchecked(email),
            name: name.to_string(),
            role,
            created_at: chrono::Utc::now(),
        };
        self.state().accounts.push(StoredAccount {
            summary: summary.clone(),
            password_hash: "seeded".to_string(),
        });
        summary
    }

    pub fn accounts(&self) -> Vec<AccountSummary> {
        self.state()
            .accounts
            .iter()
            .map(|a| a.summary.clone())
            .collect()
    }

    pub fn password_hash_for(&self, email: &str) -> Option<String> {
        self.state()
            .accounts
            .iter()
            .find(|a| a.summary.email == email)
            .map(|a| a.password_hash.clone())
    }

    pub fn courses(&self) -> Vec<Course> {
        self.state().courses.clone()
    }

    pub fn activity(&self) -> Vec<ActivityLog> {
        self.state().activity.clone()
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<AccountSummary>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let state = self.state();
        if state.hidden_emails.contains(email.as_str()) {
            return Ok(None);
        }
        Ok(state
            .accounts
            .iter()
            .find(|a| &a.summary.email == email)
            .map(|a| a.summary.clone()))
    }

    async fn create_account(&self, account: NewAccount) -> Result<AccountSummary, StoreError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        account.validate()?;

        let mut state = self.state();
        if state.failing_emails.contains(account.email.as_str()) {
            return Err(StoreError::Database(sqlx::Error::Protocol(format!(
                "injected failure for {}",
                account.email
            ))));
        }
        if state.accounts.iter().any(|a| a.summary.email == account.email) {
            return Err(StoreError::Conflict(format!("account {}", account.email)));
        }

        let summary = AccountSummary {
            id: AccountId::new(),
            email: account.email,
            name: account.name,
            role: account.role,
            created_at: chrono::Utc::now(),
        };
        state.accounts.push(StoredAccount {
            summary: summary.clone(),
            password_hash: account.password_hash,
        });
        Ok(summary)
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<AccountSummary>, StoreError> {
        Ok(self
            .state()
            .accounts
            .iter()
            .filter(|a| a.summary.role == role)
            .map(|a| a.summary.clone())
            .collect())
    }

    async fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn find_course_by_code(&self, code: &str) -> Result<Option<Course>, StoreError> {
        Ok(self.state().courses.iter().find(|c| c.code == code).cloned())
    }

    async fn create_course(&self, course: NewCourse) -> Result<Course, StoreError> {
        course.validate()?;

        let mut state = self.state();
        if state.courses.iter().any(|c| c.code == course.code) {
            return Err(StoreError::Conflict(format!("course {}", course.code)));
        }
        if !state.accounts.iter().any(|a| a.summary.id == course.teacher_id) {
            return Err(StoreError::Validation(format!(
                "teacher {} does not exist",
                course.teacher_id
            )));
        }

        let created = Course {
            id: CourseId::new(),
            code: course.code,
            title: course.title,
            description: course.description,
            teacher_id: course.teacher_id,
            created_at: chrono::Utc::now(),
        };
        state.courses.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl ActivityLogStore for MemoryStore {
    async fn create_activity_log(&self, entry: NewActivityLog) -> Result<ActivityLog, StoreError> {
        let mut state = self.state();
        if !state.accounts.iter().any(|a| a.summary.id == entry.user_id) {
            return Err(StoreError::Validation(format!(
                "user {} does not exist",
                entry.user_id
            )));
        }

        let created = ActivityLog {
            id: ActivityLogId::new(),
            user_id: entry.user_id,
            action: entry.action,
            details: entry.details,
            created_at: chrono::Utc::now(),
        };
        state.activity.push(created.clone());
        Ok(created)
    }
}
