//! User seeding functionality.
//!
//! Inserts a fixed set of demo accounts, one or two per role, plus an
//! optional batch of students with fake names.

use anyhow::Context;
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use lms_core::hash_password;
use lms_db::{AccountStore, StoreError};
use lms_models::{Email, NewAccount, Role};
use std::time::Instant;

use super::models::{SeedSummary, UserSeed};

/// Development password shared by every seeded account.
pub const DEMO_PASSWORD: &str = "password123";

/// Domain used for every seeded email.
pub const DEMO_DOMAIN: &str = "lms.local";

/// The fixed demo accounts.
pub fn demo_users() -> Vec<UserSeed> {
    vec![
        UserSeed::new("admin@lms.local", "Ada Admin", Role::Admin),
        UserSeed::new("head@lms.local", "Hana Head", Role::Head),
        UserSeed::new("management@lms.local", "Milo Management", Role::Management),
        UserSeed::new("teacher1@lms.local", "Tara Teacher", Role::Teacher),
        UserSeed::new("teacher2@lms.local", "Theo Teacher", Role::Teacher),
        UserSeed::new("student1@lms.local", "Sam Student", Role::Student),
        UserSeed::new("student2@lms.local", "Sofia Student", Role::Student),
        UserSeed::new("student3@lms.local", "Sid Student", Role::Student),
    ]
}

/// Generates `count` students with fake names.
///
/// Emails carry the index so they are unique within one call.
pub fn generate_students(count: usize) -> Vec<UserSeed> {
    (0..count)
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            let email = format!(
                "{}.{}+student{}@{}",
                email_safe(&first_name),
                email_safe(&last_name),
                idx,
                DEMO_DOMAIN
            );

            UserSeed::new(email, format!("{} {}", first_name, last_name), Role::Student)
        })
        .collect()
}

fn email_safe(part: &str) -> String {
    part.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Inserts `seeds`, skipping emails that already exist.
///
/// Every account gets [`DEMO_PASSWORD`], hashed once at `bcrypt_cost`.
pub async fn seed_users<S>(
    store: &S,
    seeds: &[UserSeed],
    bcrypt_cost: u32,
) -> anyhow::Result<SeedSummary>
where
    S: AccountStore + ?Sized,
{
    let start_time = Instant::now();
    println!("👥 Seeding {} users...", seeds.len());

    let password_hash = tokio::task::spawn_blocking(move || hash_password(DEMO_PASSWORD, bcrypt_cost))
        .await?
        .map_err(|e| e.error)
        .context("Failed to hash demo password")?;

    let mut summary = SeedSummary::default();

    for seed in seeds {
        let email = Email::new(&seed.email)
            .with_context(|| format!("Invalid seed email '{}'", seed.email))?;

        if store.find_by_email(&email).await?.is_some() {
            tracing::debug!(email = %email, "Seed user exists, skipping");
            summary.skipped += 1;
            continue;
        }

        let result = store
            .create_account(NewAccount {
                email: email.clone(),
                name: seed.name.clone(),
                password_hash: password_hash.clone(),
                role: seed.role,
            })
            .await;

        match result {
            Ok(account) => {
                tracing::info!(email = %account.email, role = %account.role, "Seeded user");
                summary.created += 1;
            }
            Err(StoreError::Conflict(_)) => summary.skipped += 1,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to seed user {}", email));
            }
        }
    }

    println!(
        "✅ Seeded users: {} created, {} skipped in {:?}",
        summary.created,
        summary.skipped,
        start_time.elapsed()
    );

    Ok(summary)
}
