use async_trait::async_trait;
use lms_config::DatabaseConfig;
use lms_models::{
    AccountSummary, ActivityLog, Course, Email, NewAccount, NewActivityLog, NewCourse, Role,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use validator::Validate;

use crate::store::{AccountStore, ActivityLogStore, CourseStore, StoreError};

/// Initializes a PostgreSQL connection pool from configuration.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

/// Postgres-backed implementation of every store trait.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = init_db_pool(config).await?;
        tracing::debug!(max_connections = config.max_connections, "Connected to database");
        Ok(Self::new(pool))
    }

    /// Applies the bundled schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))
    }
}

#[async_trait]
impl AccountStore for PgStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<AccountSummary>, StoreError> {
        let account = sqlx::query_as::<_, AccountSummary>(
            "SELECT id, email, name, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn create_account(&self, account: NewAccount) -> Result<AccountSummary, StoreError> {
        account.validate()?;

        sqlx::query_as::<_, AccountSummary>(
            "INSERT INTO users (email, name, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, email, name, role, created_at",
        )
        .bind(&account.email)
        .bind(&account.name)
        .bind(&account.password_hash)
        .bind(account.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_insert(e, format!("account {}", account.email)))
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<AccountSummary>, StoreError> {
        let accounts = sqlx::query_as::<_, AccountSummary>(
            "SELECT id, email, name, role, created_at FROM users
             WHERE role = $1
             ORDER BY created_at, email",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn close(&self) {
        if !self.pool.is_closed() {
            self.pool.close().await;
            tracing::debug!("Database pool closed");
        }
    }
}

#[async_trait]
impl CourseStore for PgStore {
    async fn find_course_by_code(&self, code: &str) -> Result<Option<Course>, StoreError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, code, title, description, teacher_id, created_at
             FROM courses WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    async fn create_course(&self, course: NewCourse) -> Result<Course, StoreError> {
        course.validate()?;

        sqlx::query_as::<_, Course>(
            "INSERT INTO courses (code, title, description, teacher_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id, code, title, description, teacher_id, created_at",
        )
        .bind(&course.code)
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.teacher_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_insert(e, format!("course {}", course.code)))
    }
}

#[async_trait]
impl ActivityLogStore for PgStore {
    async fn create_activity_log(&self, entry: NewActivityLog) -> Result<ActivityLog, StoreError> {
        sqlx::query_as::<_, ActivityLog>(
            "INSERT INTO activity_logs (user_id, action, details)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, action, details, created_at",
        )
        .bind(entry.user_id)
        .bind(entry.action)
        .bind(&entry.details)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_insert(e, format!("activity for user {}", entry.user_id)))
    }
}
