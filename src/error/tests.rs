//! Error type tests
//!
//! Tests for ClerkError enum and its conversions.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use miette::Diagnostic;

macro_rules! test_error_contains {
    ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
        #[test]
        fn $test_name() {
            let err = $err;
            let error_string = err.to_string();
            $(
                assert!(error_string.contains($contains),
                    "Error message should contain '{}', got: {}",
                    $contains,
                    error_string
                );
            )+
        }
    };
}

#[test]
fn test_error_display() {
    let err = duplicate_item("978-0-13-468599-1");
    assert_eq!(
        err.to_string(),
        "Book '978-0-13-468599-1' is already part of this bundle"
    );
}

#[test]
fn test_error_code() {
    let err = duplicate_item("x");
    assert_eq!(
        err.code().map(|c| c.to_string()),
        Some("clerk::ledger::duplicate_item".to_string())
    );
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let clerk_err: ClerkError = io_err.into();
    assert!(matches!(clerk_err, ClerkError::IoError { .. }));
}

#[test]
fn test_rusqlite_error_conversion() {
    let clerk_err: ClerkError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(clerk_err, ClerkError::QueryFailed { .. }));
}

#[test]
fn test_yaml_error_conversion() {
    let parse_result: std::result::Result<serde_yaml::Value, _> =
        serde_yaml::from_str("invalid: yaml: content: [unclosed");
    let clerk_err: ClerkError = parse_result.unwrap_err().into();
    assert!(matches!(clerk_err, ClerkError::ConfigParseFailed { .. }));
}

test_error_contains!(
    test_index_out_of_range,
    index_out_of_range(3, 2),
    "index 3",
    "2 item(s)"
);

test_error_contains!(test_invalid_discount, invalid_discount("1.5"), "1.5");

test_error_contains!(
    test_not_building_bundle,
    not_building_bundle(),
    "No bundle is being built"
);

test_error_contains!(test_no_row_selected, no_row_selected(), "No row selected");

test_error_contains!(test_invalid_date, invalid_date("2024-13-01"), "2024-13-01");

test_error_contains!(
    test_database_open_failed,
    database_open_failed("/nope/db.sqlite", "unable to open"),
    "/nope/db.sqlite",
    "unable to open"
);

test_error_contains!(test_book_not_found, book_not_found("123"), "'123' not found");

test_error_contains!(
    test_persist_failed,
    persist_failed("bundle 'Summer'", "UNIQUE constraint failed"),
    "bundle 'Summer'",
    "UNIQUE constraint failed"
);

test_error_contains!(
    test_login_failed,
    login_failed(7),
    "Clerk 7",
    "does not exist"
);

test_error_contains!(
    test_missing_credentials,
    missing_credentials("clerk id"),
    "clerk id"
);

test_error_contains!(
    test_config_read_failed,
    config_read_failed("/etc/clerk.yaml", "denied"),
    "Failed to read configuration file"
);

test_error_contains!(
    test_config_parse_failed,
    config_parse_failed("/etc/clerk.yaml", "bad"),
    "Failed to parse configuration file"
);

test_error_contains!(test_io_error, io_error("disk full"), "IO error: disk full");

#[test]
fn test_persist_failed_has_rollback_help() {
    let err = persist_failed("request", "locked");
    let help = err.help().map(|h| h.to_string()).unwrap_or_default();
    assert!(help.contains("rolled back"));
}
