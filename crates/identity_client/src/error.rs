//! Identity collaborator error taxonomy.
//!
//! Every variant is recoverable; the flow controllers surface these as
//! inline messages and never let them cross the controller boundary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Incorrect email or password")]
    CredentialsRejected,

    #[error("Account not confirmed yet")]
    AccountUnconfirmed,

    #[error("Invalid confirmation code")]
    InvalidCode,

    #[error("No account found for that email")]
    UserNotFound,

    #[error("An account already exists for that email")]
    UserExists,

    #[error("Not signed in")]
    NotSignedIn,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, IdentityError>;

impl IdentityError {
    /// Map a provider error code (as carried on the wire) onto the taxonomy.
    pub fn from_code(code: &str, message: String) -> Self {
        match code {
            "credentials_rejected" => IdentityError::CredentialsRejected,
            "account_unconfirmed" => IdentityError::AccountUnconfirmed,
            "invalid_code" => IdentityError::InvalidCode,
            "user_not_found" => IdentityError::UserNotFound,
            "user_exists" => IdentityError::UserExists,
            "not_signed_in" => IdentityError::NotSignedIn,
            _ => IdentityError::Provider(message),
        }
    }
}
