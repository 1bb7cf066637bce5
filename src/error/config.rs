//! Configuration errors

use super::ClerkError;

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> ClerkError {
    ClerkError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> ClerkError {
    ClerkError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
