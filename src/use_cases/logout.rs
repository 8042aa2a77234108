use crate::domain::errors::AuthError;
use crate::domain::ports::SessionStore;
use crate::domain::token::extract_token;

// Response returned by the logout use case.
pub struct LogoutResponse {
    pub revoked: bool,
}

// Logout use case with injected dependencies.
pub struct LogoutUseCase<S> {
    pub store: S,
}

impl<S> LogoutUseCase<S>
where
    S: SessionStore,
{
    // Removes the session named by the cookie; a missing token is not an error.
    pub async fn execute(&self, cookie_header: Option<&str>) -> Result<LogoutResponse, AuthError> {
        let Some(token) = extract_token(cookie_header) else {
            return Ok(LogoutResponse { revoked: false });
        };

        let revoked = self
            .store
            .delete(&token)
            .await
            .map_err(|_| AuthError::StorageFailure)?;

        Ok(LogoutResponse { revoked })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Session;
    use crate::use_cases::test_support::{manager, FailureFlags, RecordingStore};

    fn session() -> Session {
        Session {
            manager: manager(1),
            expires_at: u64::MAX,
        }
    }

    #[tokio::test]
    async fn when_cookie_names_live_session_then_it_is_revoked() {
        let store = RecordingStore::new();
        store.insert_test_session("tok", session());
        let use_case = LogoutUseCase {
            store: store.clone(),
        };

        let result = use_case
            .execute(Some("manager_session=tok"))
            .await
            .expect("expected logout to succeed");

        assert!(result.revoked);
        assert!(store.get_test_session("tok").is_none());
    }

    #[tokio::test]
    async fn when_logout_is_repeated_then_second_call_reports_not_revoked() {
        let store = RecordingStore::new();
        store.insert_test_session("tok", session());
        let use_case = LogoutUseCase { store };

        let first = use_case
            .execute(Some("manager_session=tok"))
            .await
            .expect("expected logout to succeed");
        let second = use_case
            .execute(Some("manager_session=tok"))
            .await
            .expect("expected repeated logout to succeed");

        assert!(first.revoked);
        assert!(!second.revoked);
    }

    #[tokio::test]
    async fn when_no_cookie_is_sent_then_nothing_is_revoked() {
        let store = RecordingStore::new().with_failures(FailureFlags {
            delete: true,
            ..Default::default()
        });
        let use_case = LogoutUseCase { store };

        let result = use_case
            .execute(None)
            .await
            .expect("expected logout without cookie to succeed");

        assert!(!result.revoked);
    }

    #[tokio::test]
    async fn when_store_delete_fails_then_returns_storage_failure() {
        let store = RecordingStore::new().with_failures(FailureFlags {
            delete: true,
            ..Default::default()
        });
        let use_case = LogoutUseCase { store };

        let result = use_case.execute(Some("manager_session=tok")).await;

        assert!(matches!(result, Err(AuthError::StorageFailure)));
    }

    #[tokio::test]
    async fn when_other_sessions_exist_then_only_named_one_is_revoked() {
        let store = RecordingStore::new();
        store.insert_test_session("mine", session());
        store.insert_test_session("theirs", session());
        let use_case = LogoutUseCase {
            store: store.clone(),
        };

        use_case
            .execute(Some("manager_session=mine"))
            .await
            .expect("expected logout to succeed");

        assert!(store.get_test_session("mine").is_none());
        assert!(store.get_test_session("theirs").is_some());
    }
}
