use crate::domain::entities::ManagerIdentity;
use crate::domain::ports::SessionStore;
use crate::domain::token::extract_token;

pub const REASON_NO_TOKEN: &str = "no token";
pub const REASON_NO_SESSION: &str = "no valid session";
pub const REASON_INTERNAL: &str = "authentication error";

// Outcome of the authentication gate. Never an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthVerdict {
    pub authenticated: bool,
    pub session: Option<ManagerIdentity>,
    pub reason: Option<&'static str>,
}

impl AuthVerdict {
    fn granted(manager: ManagerIdentity) -> Self {
        Self {
            authenticated: true,
            session: Some(manager),
            reason: None,
        }
    }

    fn denied(reason: &'static str) -> Self {
        Self {
            authenticated: false,
            session: None,
            reason: Some(reason),
        }
    }
}

// Gate for manager-only operations: resolves the cookie to a session and
// slides its expiry.
pub struct AuthenticateUseCase<S> {
    pub store: S,
}

impl<S> AuthenticateUseCase<S>
where
    S: SessionStore,
{
    pub async fn execute(&self, cookie_header: Option<&[u8]>) -> AuthVerdict {
        let header = match cookie_header.map(std::str::from_utf8).transpose() {
            Ok(header) => header,
            Err(error) => {
                tracing::error!(%error, "cookie header is not valid utf-8");
                return AuthVerdict::denied(REASON_INTERNAL);
            }
        };

        let Some(token) = extract_token(header) else {
            return AuthVerdict::denied(REASON_NO_TOKEN);
        };

        let session = match self.store.get(&token).await {
            Ok(Some(session)) => session,
            Ok(None) => return AuthVerdict::denied(REASON_NO_SESSION),
            Err(error) => {
                tracing::error!(%error, "session lookup failed");
                return AuthVerdict::denied(REASON_INTERNAL);
            }
        };

        // Best-effort; the lookup above already decided the verdict.
        match self.store.renew(&token).await {
            Ok(true) => {}
            Ok(false) => tracing::debug!("session vanished before renewal"),
            Err(error) => tracing::warn!(%error, "session renewal failed"),
        }

        AuthVerdict::granted(session.manager)
    }
}
