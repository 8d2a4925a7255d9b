//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::auth::{AuthError, Credentials, Session, SignupForm};

/// Identifier accepted by [`FixedCredentialAuth::demo`].
pub const DEMO_IDENTIFIER: &str = "user@example.com";

/// Password accepted by [`FixedCredentialAuth::demo`].
pub const DEMO_PASSWORD: &str = "password123";

/// Email [`FixedCredentialAuth::demo`] reports as already registered.
pub const TAKEN_EMAIL: &str = "test@example.com";

/// Accepts exactly one identifier and password pair. Sign-ups are accepted without
/// being stored, except for emails already taken.
#[derive(Clone)]
pub struct FixedCredentialAuth {
    identifier: String,
    password: String,
    taken_emails: Vec<String>,
}

impl std::fmt::Debug for FixedCredentialAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedCredentialAuth")
            .field("identifier", &self.identifier)
            .field("taken_emails", &self.taken_emails)
            .finish_non_exhaustive()
    }
}

impl FixedCredentialAuth {
    #[must_use]
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        let identifier = identifier.into();

        Self {
            taken_emails: vec![identifier.clone()],
            identifier,
            password: password.into(),
        }
    }

    /// The storefront's demo account.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(DEMO_IDENTIFIER, DEMO_PASSWORD).with_taken_email(TAKEN_EMAIL)
    }

    /// Treat `email` as already registered.
    #[must_use]
    pub fn with_taken_email(mut self, email: impl Into<String>) -> Self {
        self.taken_emails.push(email.into());
        self
    }
}

#[async_trait]
impl AuthProvider for FixedCredentialAuth {
    async fn login(&self, credentials: Credentials) -> Result<Session, AuthError> {
        credentials.validate()?;

        if credentials.identifier.trim() != self.identifier || credentials.password != self.password
        {
            warn!(identifier = credentials.identifier.trim(), "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        info!(identifier = %self.identifier, "login succeeded");

        Ok(Session {
            identifier: self.identifier.clone(),
            signed_in_at: Timestamp::now(),
        })
    }

    async fn signup(&self, form: SignupForm) -> Result<Session, AuthError> {
        form.validate()?;

        let email = form.email.trim();

        if self
            .taken_emails
            .iter()
            .any(|taken| taken.eq_ignore_ascii_case(email))
        {
            warn!(email, "signup rejected, email in use");
            return Err(AuthError::EmailInUse);
        }

        info!(email, "signup succeeded");

        Ok(Session {
            identifier: email.to_string(),
            signed_in_at: Timestamp::now(),
        })
    }
}

#[automock]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Sign a shopper in.
    async fn login(&self, credentials: Credentials) -> Result<Session, AuthError>;

    /// Register a shopper and sign them in.
    async fn signup(&self, form: SignupForm) -> Result<Session, AuthError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn demo_credentials_sign_in() -> TestResult {
        let auth = FixedCredentialAuth::demo();

        let session = auth
            .login(Credentials::new(" user@example.com ", "password123"))
            .await?;

        assert_eq!(session.identifier, DEMO_IDENTIFIER);

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let auth = FixedCredentialAuth::demo();

        let result = auth
            .login(Credentials::new("user@example.com", "password"))
            .await;

        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn validation_runs_before_matching() {
        let auth = FixedCredentialAuth::demo();

        let result = auth.login(Credentials::new("user@", "password123")).await;

        assert_eq!(result, Err(AuthError::InvalidEmail));
    }

    fn signup_form(email: &str) -> SignupForm {
        SignupForm {
            full_name: "Asha Rao".to_string(),
            email: email.to_string(),
            mobile: "9876543210".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
            agree_terms: true,
        }
    }

    #[tokio::test]
    async fn signup_signs_in_new_email() -> TestResult {
        let auth = FixedCredentialAuth::demo();

        let session = auth.signup(signup_form(" asha@example.com ")).await?;

        assert_eq!(session.identifier, "asha@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn signup_rejects_taken_email() {
        let auth = FixedCredentialAuth::demo();

        assert_eq!(
            auth.signup(signup_form(TAKEN_EMAIL)).await,
            Err(AuthError::EmailInUse)
        );
        assert_eq!(
            auth.signup(signup_form("USER@example.com")).await,
            Err(AuthError::EmailInUse)
        );
    }

    #[tokio::test]
    async fn signup_validates_before_lookup() {
        let auth = FixedCredentialAuth::demo();

        let form = SignupForm {
            agree_terms: false,
            ..signup_form(TAKEN_EMAIL)
        };

        assert_eq!(auth.signup(form).await, Err(AuthError::TermsNotAccepted));
    }

    #[tokio::test]
    async fn provider_is_swappable() -> TestResult {
        let mut auth = MockAuthProvider::new();

        auth.expect_login()
            .once()
            .withf(|credentials| credentials.identifier == "9876543210")
            .return_once(|credentials| {
                Ok(Session {
                    identifier: credentials.identifier,
                    signed_in_at: Timestamp::UNIX_EPOCH,
                })
            });

        let provider: &dyn AuthProvider = &auth;
        let session = provider
            .login(Credentials::new("9876543210", "otp"))
            .await?;

        assert_eq!(session.signed_in_at, Timestamp::UNIX_EPOCH);

        Ok(())
    }
}
