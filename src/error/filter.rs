//! Search filter and row selection errors

use super::ClerkError;

pub fn no_row_selected() -> ClerkError {
    ClerkError::NoRowSelected
}

/// Creates an invalid date error
pub fn invalid_date(value: impl Into<String>) -> ClerkError {
    ClerkError::InvalidDate {
        value: value.into(),
    }
}
