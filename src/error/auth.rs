//! Authentication errors

use super::ClerkError;

/// Creates a login failed error
pub fn login_failed(clerk: u32) -> ClerkError {
    ClerkError::LoginFailed { clerk }
}

/// Creates a missing credentials error
pub fn missing_credentials(what: impl Into<String>) -> ClerkError {
    ClerkError::MissingCredentials { what: what.into() }
}
