//! Writing the batch, one account at a time.

use lms_core::{AppError, generate_password, hash_password};
use lms_db::{AccountStore, StoreError};
use lms_models::{AccountRequest, CreatedAccount, Email, NewAccount};

use crate::terminal::Terminal;

/// What happened to each account in a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub created: Vec<CreatedAccount>,
    pub skipped: Vec<Email>,
    pub failed: Vec<(Email, String)>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.created.len() + self.skipped.len() + self.failed.len()
    }
}

enum Attempt {
    Created(CreatedAccount),
    Exists,
}

#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Hash(String),
}

impl From<AppError> for AttemptError {
    fn from(err: AppError) -> Self {
        AttemptError::Hash(err.to_string())
    }
}

/// Creates every requested account, strictly in order, recording each
/// result in `report` as soon as it is known.
///
/// Existing accounts are skipped and failures are recorded; neither stops
/// the batch, and nothing is retried. If the returned future is dropped
/// mid-batch, `report` still holds every account created so far.
pub async fn persist_batch<S, T>(
    store: &S,
    terminal: &mut T,
    requests: Vec<AccountRequest>,
    bcrypt_cost: u32,
    report: &mut BatchReport,
) where
    S: AccountStore + ?Sized,
    T: Terminal + ?Sized,
{
    for request in requests {
        let email = request.email.clone();

        match create_one(store, request, bcrypt_cost).await {
            Ok(Attempt::Created(created)) => {
                tracing::info!(email = %email, role = %created.account.role, "Account created");
                terminal.say(&format!("   ✓ Created {}", email));
                report.created.push(created);
            }
            Ok(Attempt::Exists) => {
                tracing::warn!(email = %email, "Account already exists, skipping");
                terminal.say(&format!("   ⚠️  {} already exists, skipped", email));
                report.skipped.push(email);
            }
            Err(e) => {
                tracing::error!(email = %email, error = %e, "Failed to create account");
                terminal.say(&format!("   ❌ Failed to create {}: {}", email, e));
                report.failed.push((email, e.to_string()));
            }
        }
    }
}

async fn create_one<S>(
    store: &S,
    request: AccountRequest,
    bcrypt_cost: u32,
) -> Result<Attempt, AttemptError>
where
    S: AccountStore + ?Sized,
{
    if store.find_by_email(&request.email).await?.is_some() {
        return Ok(Attempt::Exists);
    }

    let password = generate_password();
    let plaintext = password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&plaintext, bcrypt_cost))
        .await
        .map_err(|e| AttemptError::Hash(e.to_string()))??;

    let account = store
        .create_account(NewAccount {
            email: request.email,
            name: request.name,
            password_hash,
            role: request.role,
        })
        .await?;

    Ok(Attempt::Created(CreatedAccount { account, password }))
}
