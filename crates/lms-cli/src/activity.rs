//! Recording user activity.

use lms_db::{AccountStore, ActivityLogStore, StoreError};
use lms_models::{AccountId, ActivityAction, ActivityLog, Email, NewActivityLog};

/// Inserts one activity row for `user_id`.
pub async fn log_activity<S>(
    store: &S,
    user_id: AccountId,
    action: ActivityAction,
    details: Option<serde_json::Value>,
) -> Result<ActivityLog, StoreError>
where
    S: ActivityLogStore + ?Sized,
{
    let entry = store
        .create_activity_log(NewActivityLog {
            user_id,
            action,
            details,
        })
        .await?;

    tracing::info!(user_id = %user_id, action = %action, "Activity logged");
    Ok(entry)
}

/// Like [`log_activity`], resolving the user by email first.
pub async fn log_activity_for_email<S>(
    store: &S,
    email: &Email,
    action: ActivityAction,
    details: Option<serde_json::Value>,
) -> Result<ActivityLog, StoreError>
where
    S: AccountStore + ActivityLogStore + ?Sized,
{
    let account = store
        .find_by_email(email)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("user {}", email)))?;

    log_activity(store, account.id, action, details).await
}

/// One `name  label` line per known action.
pub fn action_listing() -> String {
    ActivityAction::all()
        .map(|action| format!("{:<22}{}", action.as_str(), action.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lms_db::MemoryStore;
    use lms_models::Role;
    use serde_json::json;

    #[tokio::test]
    async fn test_logs_for_known_user() {
        let store = MemoryStore::new();
        let user = store.insert_account("t@lms.local", "T", Role::Teacher);
        let email = Email::new("t@lms.local").unwrap();

        let entry = log_activity_for_email(
            &store,
            &email,
            ActivityAction::CourseCreated,
            Some(json!({ "code": "CS101" })),
        )
        .await
        .unwrap();

        assert_eq!(entry.user_id, user.id);
        assert_eq!(entry.action, ActivityAction::CourseCreated);
        assert_eq!(store.activity().len(), 1);
        assert_eq!(store.activity()[0].details, Some(json!({ "code": "CS101" })));
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let store = MemoryStore::new();
        let email = Email::new("ghost@lms.local").unwrap();

        let err = log_activity_for_email(&store, &email, ActivityAction::Login, None)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(store.activity().is_empty());
    }

    #[test]
    fn test_listing_has_every_action() {
        let listing = action_listing();
        assert_eq!(listing.lines().count(), ActivityAction::all().count());
        assert!(listing.contains("grade_posted"));
        assert!(listing.contains("Grade posted"));
    }
}
