//! Error types and handling for the clerk console
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`ledger`]: Bundle ledger errors
//! - [`filter`]: Search filter and selection errors
//! - [`store`]: Database errors
//! - [`auth`]: Login errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors

pub mod auth;
pub mod config;
pub mod filter;
pub mod fs;
pub mod ledger;
pub mod store;

pub use auth::{login_failed, missing_credentials};
pub use config::{parse_failed as config_parse_failed, read_failed as config_read_failed};
pub use filter::{invalid_date, no_row_selected};
pub use fs::io_error;
pub use ledger::{duplicate_item, index_out_of_range, invalid_discount, not_building_bundle};
pub use store::{book_not_found, open_failed as database_open_failed, persist_failed, query_failed};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for clerk operations
#[derive(Error, Diagnostic, Debug)]
pub enum ClerkError {
    // Ledger errors
    #[error("Book '{isbn}' is already part of this bundle")]
    #[diagnostic(
        code(clerk::ledger::duplicate_item),
        help("Each book can appear only once in a bundle")
    )]
    DuplicateItem { isbn: String },

    #[error("Bundle item index {index} is out of range (bundle has {len} item(s))")]
    #[diagnostic(code(clerk::ledger::index_out_of_range))]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid discount: {value}")]
    #[diagnostic(
        code(clerk::ledger::invalid_discount),
        help("Discounts are fractions between 0 and 1 (e.g. 0.25) or percentages (e.g. 25%)")
    )]
    InvalidDiscount { value: String },

    #[error("No bundle is being built")]
    #[diagnostic(
        code(clerk::ledger::not_building),
        help("Start a new bundle before adding books to it")
    )]
    NotBuildingBundle,

    // Filter and selection errors
    #[error("No row selected")]
    #[diagnostic(
        code(clerk::filter::no_row_selected),
        help("Run a search and pick one of the listed rows")
    )]
    NoRowSelected,

    #[error("Invalid date: {value}")]
    #[diagnostic(
        code(clerk::filter::invalid_date),
        help("Dates use the YYYY-MM-DD format")
    )]
    InvalidDate { value: String },

    // Store errors
    #[error("Cannot open database at {path}: {reason}")]
    #[diagnostic(
        code(clerk::store::open_failed),
        help("Check the --database flag, BOOKSTORE_DB or the `database` key in config.yaml")
    )]
    DatabaseOpenFailed { path: String, reason: String },

    #[error("Database query failed: {message}")]
    #[diagnostic(code(clerk::store::query_failed))]
    QueryFailed { message: String },

    #[error("Book '{isbn}' not found")]
    #[diagnostic(code(clerk::store::book_not_found))]
    BookNotFound { isbn: String },

    #[error("Failed to save {what}: {reason}")]
    #[diagnostic(
        code(clerk::store::persist_failed),
        help("Nothing was written; the operation was rolled back")
    )]
    PersistFailed { what: String, reason: String },

    // Authentication errors
    #[error("Clerk {clerk} with provided credentials does not exist")]
    #[diagnostic(code(clerk::auth::login_failed))]
    LoginFailed { clerk: u32 },

    #[error("Missing credentials: {what}")]
    #[diagnostic(
        code(clerk::auth::missing_credentials),
        help("Pass --clerk (or BOOKSTORE_CLERK) and set BOOKSTORE_PASSWORD, or run interactively")
    )]
    MissingCredentials { what: String },

    // Configuration errors
    #[error("Failed to read configuration file {path}: {reason}")]
    #[diagnostic(code(clerk::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file {path}: {reason}")]
    #[diagnostic(code(clerk::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // Terminal and file system errors
    #[error("Prompt failed: {message}")]
    #[diagnostic(code(clerk::ui::prompt_failed))]
    PromptFailed { message: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(clerk::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for ClerkError {
    fn from(err: std::io::Error) -> Self {
        ClerkError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<rusqlite::Error> for ClerkError {
    fn from(err: rusqlite::Error) -> Self {
        ClerkError::QueryFailed {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ClerkError {
    fn from(err: serde_yaml::Error) -> Self {
        ClerkError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClerkError {
    fn from(err: serde_json::Error) -> Self {
        ClerkError::IoError {
            message: format!("JSON output failed: {err}"),
        }
    }
}

impl From<inquire::InquireError> for ClerkError {
    fn from(err: inquire::InquireError) -> Self {
        ClerkError::PromptFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ClerkError>;

#[cfg(test)]
mod tests;
