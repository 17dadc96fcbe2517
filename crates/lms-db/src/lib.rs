//! # LMS DB
//!
//! Database access for the LMS admin tools.
//!
//! - [`store`]: The [`AccountStore`], [`CourseStore`] and [`ActivityLogStore`]
//!   contracts and their shared [`StoreError`]
//! - [`postgres`]: [`PgStore`], the SQLx/PostgreSQL implementation
//! - `memory`: `MemoryStore`, an in-process double (feature `test-utils`)
//!
//! The store is an explicitly constructed handle: create it once, pass it to
//! every operation, and call [`AccountStore::close`] when finished.
//!
//! # Example
//!
//! ```ignore
//! use lms_config::AppConfig;
//! use lms_db::{AccountStore, PgStore};
//!
//! let config = AppConfig::from_env()?;
//! let store = PgStore::connect(&config.database).await?;
//! let existing = store.find_by_email(&email).await?;
//! store.close().await;
//! ```

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use postgres::{PgStore, init_db_pool};
pub use store::{AccountStore, ActivityLogStore, CourseStore, StoreError};

// Re-export PgPool for convenience
pub use sqlx::PgPool;
