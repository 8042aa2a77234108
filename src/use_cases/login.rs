use crate::domain::entities::Session;
use crate::domain::errors::AuthError;
use crate::domain::ports::{ManagerDirectory, SessionStore};
use crate::domain::token::issue_token;
use crate::interface_adapters::protocol::LoginRequest;

// Response returned by the login use case.
pub struct LoginResponse {
    pub token: String,
    pub session: Session,
}

// Manager login use case with injected dependencies.
pub struct LoginUseCase<D, S> {
    pub directory: D,
    pub store: S,
}

impl<D, S> LoginUseCase<D, S>
where
    D: ManagerDirectory,
    S: SessionStore,
{
    pub async fn execute(&self, payload: LoginRequest) -> Result<LoginResponse, AuthError> {
        let email = validate_email(&payload.email)?;
        if payload.password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let manager = self
            .directory
            .verify_credentials(email, &payload.password)
            .await
            .map_err(|_| AuthError::StorageFailure)?
            .ok_or(AuthError::InvalidCredentials)?;

        let token = issue_token();
        let session = self
            .store
            .create(token.clone(), manager)
            .await
            .map_err(|_| AuthError::StorageFailure)?;

        Ok(LoginResponse { token, session })
    }
}

fn validate_email(value: &str) -> Result<&str, AuthError> {
    let email = value.trim();
    if email.is_empty() {
        return Err(AuthError::MissingEmail);
    }

    // local@domain.tld, no whitespace.
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AuthError::InvalidEmail);
    };
    let domain_ok = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
    if local.is_empty() || !domain_ok || email.chars().any(char::is_whitespace) {
        return Err(AuthError::InvalidEmail);
    }

    Ok(email)
}
