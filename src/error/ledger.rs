//! Bundle ledger errors

use super::ClerkError;

/// Creates a duplicate bundle item error
pub fn duplicate_item(isbn: impl Into<String>) -> ClerkError {
    ClerkError::DuplicateItem { isbn: isbn.into() }
}

/// Creates an index out of range error for a ledger of `len` items
pub fn index_out_of_range(index: usize, len: usize) -> ClerkError {
    ClerkError::IndexOutOfRange { index, len }
}

/// Creates an invalid discount error
pub fn invalid_discount(value: impl ToString) -> ClerkError {
    ClerkError::InvalidDiscount {
        value: value.to_string(),
    }
}

pub fn not_building_bundle() -> ClerkError {
    ClerkError::NotBuildingBundle
}
