//! File system errors

use super::ClerkError;

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> ClerkError {
    ClerkError::IoError {
        message: message.into(),
    }
}
