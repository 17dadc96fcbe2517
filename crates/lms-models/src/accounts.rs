//! Account models.
//!
//! An [`AccountRequest`] is what the operator asked for, a [`NewAccount`] is
//! what gets written, an [`AccountSummary`] is what the store hands back
//! (never the password hash), and a [`CreatedAccount`] pairs that summary with
//! the one-time plaintext password generated for it.

use crate::ids::AccountId;
use crate::roles::Role;
use crate::value_types::Email;
use lms_core::derive_name;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A pending account creation, built from one operator-supplied email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRequest {
    pub email: Email,
    pub name: String,
    pub role: Role,
}

impl AccountRequest {
    /// Builds a request, deriving the display name from the email.
    ///
    /// When the local part contains no letters or digits the derived name
    /// would be empty, so the raw local part is used instead.
    pub fn new(email: Email, role: Role) -> Self {
        let derived = derive_name(email.as_str());
        let name = if derived.is_empty() {
            email.local_part().to_string()
        } else {
            derived
        };

        Self { email, name, role }
    }
}

/// Fields written when creating an account.
#[derive(Debug, Clone, Validate)]
pub struct NewAccount {
    pub email: Email,
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "password hash cannot be empty"))]
    pub password_hash: String,
    pub role: Role,
}

/// The non-sensitive projection of a stored account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AccountSummary {
    pub id: AccountId,
    pub email: Email,
    pub name: String,
    pub role: Role,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// An account created in this run, with its plaintext password.
///
/// The plaintext exists only here: the store keeps the hash, and once this
/// value is dropped (and not exported) the password cannot be recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAccount {
    pub account: AccountSummary,
    pub password: String,
}
