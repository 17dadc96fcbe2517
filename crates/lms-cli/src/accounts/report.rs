//! Showing and exporting created accounts.
//!
//! The console summary and the export file use the same block format, so
//! everything the operator saw on screen is in the file verbatim.
//!
//! The export contains plaintext passwords and is written with no encryption
//! and default file permissions. Treat the file as a secret.

use chrono::NaiveDate;
use lms_models::CreatedAccount;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One account as a block of `Label: value` lines.
pub fn render_account_block(created: &CreatedAccount) -> String {
    let account = &created.account;
    format!(
        "Name: {}\nEmail: {}\nRole: {}\nPassword: {}\nCreated At: {}",
        account.name,
        account.email,
        account.role,
        created.password,
        account.created_at.to_rfc3339()
    )
}

/// All accounts, blocks separated by a blank line.
pub fn render_accounts(accounts: &[CreatedAccount]) -> String {
    accounts
        .iter()
        .map(render_account_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `lms_accounts_<YYYY-MM-DD>.txt`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("lms_accounts_{}.txt", date.format("%Y-%m-%d"))
}

/// Writes the accounts to the dated export file in `directory`, replacing
/// any export already written there today.
pub fn export_accounts(
    directory: &Path,
    date: NaiveDate,
    accounts: &[CreatedAccount],
) -> io::Result<PathBuf> {
    let path = directory.join(export_file_name(date));
    let mut contents = render_accounts(accounts);
    contents.push('\n');
    fs::write(&path, contents)?;
    Ok(path)
}
