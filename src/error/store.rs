//! Database errors

use super::ClerkError;

/// Creates a database open failed error
pub fn open_failed(path: impl Into<String>, reason: impl Into<String>) -> ClerkError {
    ClerkError::DatabaseOpenFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a query failed error
pub fn query_failed(message: impl Into<String>) -> ClerkError {
    ClerkError::QueryFailed {
        message: message.into(),
    }
}

/// Creates a book not found error
pub fn book_not_found(isbn: impl Into<String>) -> ClerkError {
    ClerkError::BookNotFound { isbn: isbn.into() }
}

/// Creates a persist failed error for a rolled back write
pub fn persist_failed(what: impl Into<String>, reason: impl ToString) -> ClerkError {
    ClerkError::PersistFailed {
        what: what.into(),
        reason: reason.to_string(),
    }
}
