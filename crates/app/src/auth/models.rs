//! Auth data models.

use jiff::Timestamp;
use larder::storage::{KeyValueStore, StorageError};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::AuthError;

/// Sign-in form input.
#[derive(Clone)]
pub struct Credentials {
    /// Email address or mobile number.
    pub identifier: String,

    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    #[must_use]
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }

    /// Check the form is filled in. Identifiers containing `@` must look like an email
    /// address; anything else is taken as a mobile number.
    ///
    /// # Errors
    ///
    /// Returns the first problem found with the input.
    pub fn validate(&self) -> Result<(), AuthError> {
        let identifier = self.identifier.trim();

        if identifier.is_empty() {
            return Err(AuthError::MissingIdentifier);
        }

        if identifier.contains('@') && !looks_like_email(identifier) {
            return Err(AuthError::InvalidEmail);
        }

        if self.password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        Ok(())
    }
}

/// Sign-up form input.
#[derive(Clone, Default)]
pub struct SignupForm {
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_terms: bool,
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("mobile", &self.mobile)
            .field("password", &"<redacted>")
            .field("agree_terms", &self.agree_terms)
            .finish_non_exhaustive()
    }
}

impl SignupForm {
    /// Check the form, field by field in display order.
    ///
    /// # Errors
    ///
    /// Returns the first problem found with the input.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.full_name.trim().is_empty() {
            return Err(AuthError::MissingFullName);
        }

        let email = self.email.trim();

        if email.is_empty() {
            return Err(AuthError::MissingEmail);
        }

        if !looks_like_email(email) {
            return Err(AuthError::InvalidEmail);
        }

        if self.mobile.trim().is_empty() {
            return Err(AuthError::MissingMobile);
        }

        if self.password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        if !self.agree_terms {
            return Err(AuthError::TermsNotAccepted);
        }

        Ok(())
    }
}

/// `local@domain.tld` with no whitespace and every part non-empty.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !local.is_empty() && !host.is_empty() && !tld.is_empty()
}

/// A signed-in shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub identifier: String,
    pub signed_in_at: Timestamp,
}

/// Store key for the signed-in session.
pub const SESSION_KEY: &str = "auth.session";

impl Session {
    /// Persist the session.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if encoding or writing fails.
    pub fn save_to(&self, store: &impl KeyValueStore) -> Result<(), StorageError> {
        store.set(SESSION_KEY, &serde_json::to_string(self)?)
    }

    /// Load a previously saved session. Undecodable data counts as signed out.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read.
    pub fn restore_from(store: &impl KeyValueStore) -> Result<Option<Self>, StorageError> {
        let Some(raw) = store.get(SESSION_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(error) => {
                warn!(%error, "discarding undecodable session");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use larder::storage::MemoryStore;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn session_round_trips_through_store() -> TestResult {
        let store = MemoryStore::new();
        let session = Session {
            identifier: "user@example.com".to_string(),
            signed_in_at: Timestamp::UNIX_EPOCH,
        };

        session.save_to(&store)?;

        assert_eq!(Session::restore_from(&store)?, Some(session));

        Ok(())
    }

    #[test]
    fn garbage_session_counts_as_signed_out() -> TestResult {
        let store = MemoryStore::new();
        store.set(SESSION_KEY, "not json")?;

        assert_eq!(Session::restore_from(&store)?, None);

        Ok(())
    }

    #[test]
    fn validate_requires_identifier_and_password() {
        assert_eq!(
            Credentials::new("  ", "secret").validate(),
            Err(AuthError::MissingIdentifier)
        );
        assert_eq!(
            Credentials::new("9876543210", "").validate(),
            Err(AuthError::MissingPassword)
        );
    }

    #[test]
    fn validate_checks_email_shape() {
        assert_eq!(
            Credentials::new("user@example", "secret").validate(),
            Err(AuthError::InvalidEmail)
        );
        assert_eq!(
            Credentials::new("@example.com", "secret").validate(),
            Err(AuthError::InvalidEmail)
        );
        assert_eq!(Credentials::new("user@example.com", "secret").validate(), Ok(()));
    }

    #[test]
    fn mobile_numbers_skip_email_check() {
        assert_eq!(Credentials::new("9876543210", "secret").validate(), Ok(()));
    }

    fn signup() -> SignupForm {
        SignupForm {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            mobile: "9876543210".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
            agree_terms: true,
        }
    }

    #[test]
    fn complete_signup_form_is_valid() {
        assert_eq!(signup().validate(), Ok(()));
    }

    #[test]
    fn signup_requires_every_field() {
        let cases = [
            (
                SignupForm {
                    full_name: "  ".to_string(),
                    ..signup()
                },
                AuthError::MissingFullName,
            ),
            (
                SignupForm {
                    email: String::new(),
                    ..signup()
                },
                AuthError::MissingEmail,
            ),
            (
                SignupForm {
                    mobile: String::new(),
                    ..signup()
                },
                AuthError::MissingMobile,
            ),
            (
                SignupForm {
                    password: String::new(),
                    confirm_password: String::new(),
                    ..signup()
                },
                AuthError::MissingPassword,
            ),
        ];

        for (form, expected) in cases {
            assert_eq!(form.validate(), Err(expected), "{form:?}");
        }
    }

    #[test]
    fn signup_checks_email_shape() {
        let form = SignupForm {
            email: "asha@example".to_string(),
            ..signup()
        };

        assert_eq!(form.validate(), Err(AuthError::InvalidEmail));
    }

    #[test]
    fn signup_passwords_must_match() {
        let form = SignupForm {
            confirm_password: "secrte".to_string(),
            ..signup()
        };

        assert_eq!(form.validate(), Err(AuthError::PasswordMismatch));
    }

    #[test]
    fn signup_requires_terms() {
        let form = SignupForm {
            agree_terms: false,
            ..signup()
        };

        assert_eq!(form.validate(), Err(AuthError::TermsNotAccepted));
    }

    #[test]
    fn signup_debug_redacts_passwords() {
        let debug = format!("{:?}", signup());

        assert!(!debug.contains("secret"));
    }

    #[test]
    fn debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("user@example.com", "hunter2"));

        assert!(!debug.contains("hunter2"));
    }
}
