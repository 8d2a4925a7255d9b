//! Auth errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("email or mobile number is required")]
    MissingIdentifier,

    #[error("email is invalid")]
    InvalidEmail,

    #[error("password is required")]
    MissingPassword,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("full name is required")]
    MissingFullName,

    #[error("email is required")]
    MissingEmail,

    #[error("mobile number is required")]
    MissingMobile,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("you must agree to the terms and conditions")]
    TermsNotAccepted,

    #[error("email already in use")]
    EmailInUse,
}
