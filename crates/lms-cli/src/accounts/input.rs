//! Collecting the batch: email list parsing, role assignment, confirmation.

use lms_models::{AccountRequest, Email, Role};
use thiserror::Error;

use crate::terminal::Terminal;

/// Input problems that abort the run before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("No email addresses provided")]
    NoInput,

    #[error("Invalid email address(es): {}", .0.join(", "))]
    InvalidEmails(Vec<String>),
}

/// Splits a comma-separated list into validated emails.
///
/// Tokens are trimmed and empty tokens dropped. If any token is malformed,
/// every malformed token is reported and no email is returned.
pub fn parse_email_list(input: &str) -> Result<Vec<Email>, InputError> {
    let tokens: Vec<&str> = input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(InputError::NoInput);
    }

    let invalid: Vec<String> = tokens
        .iter()
        .filter(|token| !Email::is_valid(token))
        .map(|token| token.to_string())
        .collect();

    if !invalid.is_empty() {
        return Err(InputError::InvalidEmails(invalid));
    }

    Ok(tokens.into_iter().map(Email::new_unchecked).collect())
}

/// Asks for a role for every email and builds the batch.
///
/// Unrecognized answers fall back to STUDENT and never abort the run.
pub async fn assign_roles<T>(
    terminal: &mut T,
    emails: Vec<Email>,
) -> std::io::Result<Vec<AccountRequest>>
where
    T: Terminal + ?Sized,
{
    let mut requests = Vec::with_capacity(emails.len());

    for email in emails {
        let answer = terminal
            .ask(&format!("Role for {} [{}]", email, Role::choices()))
            .await?;

        let (role, defaulted) = Role::from_input(&answer);
        if defaulted {
            terminal.say(&format!(
                "   ⚠️  Unrecognized role '{}', using {}",
                answer.trim(),
                role
            ));
            tracing::debug!(email = %email, input = %answer.trim(), "Defaulted role to STUDENT");
        }

        requests.push(AccountRequest::new(email, role));
    }

    Ok(requests)
}

/// `y` or `yes`, in any case.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Shows the batch and asks the operator to go ahead.
pub async fn confirm_batch<T>(terminal: &mut T, requests: &[AccountRequest]) -> std::io::Result<bool>
where
    T: Terminal + ?Sized,
{
    terminal.say("");
    terminal.say("📋 Accounts to create:");
    for request in requests {
        terminal.say(&format!(
            "   • {} <{}> as {}",
            request.name, request.email, request.role
        ));
    }
    terminal.say("");

    let answer = terminal
        .ask(&format!("Create {} account(s)? (y/N)", requests.len()))
        .await?;

    Ok(is_affirmative(&answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::ScriptedTerminal;
    use rstest::rstest;

    #[test]
    fn test_parse_trims_and_drops_empty_tokens() {
        let emails = parse_email_list(" a@b.co , ,c@d.org,, ").unwrap();
        assert_eq!(emails, vec![Email::new("a@b.co").unwrap(), Email::new("c@d.org").unwrap()]);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(",,, ,")]
    fn test_parse_empty_input(#[case] input: &str) {
        assert_eq!(parse_email_list(input), Err(InputError::NoInput));
    }

    #[test]
    fn test_parse_reports_every_invalid_token() {
        let err = parse_email_list("good@x.com, bad, also@bad, fine@y.org, no space@z.io").unwrap_err();
        assert_eq!(
            err,
            InputError::InvalidEmails(vec![
                "bad".to_string(),
                "also@bad".to_string(),
                "no space@z.io".to_string()
            ])
        );
        assert_eq!(
            err.to_string(),
            "Invalid email address(es): bad, also@bad, no space@z.io"
        );
    }

    #[rstest]
    #[case("y", true)]
    #[case("YES", true)]
    #[case(" Yes ", true)]
    #[case("", false)]
    #[case("n", false)]
    #[case("yep", false)]
    fn test_is_affirmative(#[case] answer: &str, #[case] expected: bool) {
        assert_eq!(is_affirmative(answer), expected);
    }

    #[tokio::test]
    async fn test_assign_roles_defaults_unknown_to_student() {
        let emails = parse_email_list("a.b@x.com, c@x.com, d@x.com").unwrap();
        let mut terminal = ScriptedTerminal::new(["admin", "wizard", ""]);

        let requests = assign_roles(&mut terminal, emails).await.unwrap();

        let roles: Vec<Role> = requests.iter().map(|r| r.role).collect();
        assert_eq!(roles, vec![Role::Admin, Role::Student, Role::Student]);
        assert_eq!(requests[0].name, "A B");
        assert!(terminal.transcript().contains("Unrecognized role 'wizard'"));
    }

    #[tokio::test]
    async fn test_confirm_batch() {
        let requests = vec![AccountRequest::new(Email::new("a@x.com").unwrap(), Role::Head)];

        let mut yes = ScriptedTerminal::new(["y"]);
        assert!(confirm_batch(&mut yes, &requests).await.unwrap());
        assert!(yes.transcript().contains("A <a@x.com> as HEAD"));

        let mut no = ScriptedTerminal::new([""]);
        assert!(!confirm_batch(&mut no, &requests).await.unwrap());
    }
}
