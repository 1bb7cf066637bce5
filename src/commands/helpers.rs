//! Command helper utilities
//!
//! Shared by every command that touches the database: resolving where it
//! lives, opening it, and logging a clerk in.

use std::path::PathBuf;

use inquire::{CustomType, Password, PasswordDisplayMode};

use crate::auth::{ClerkId, Credentials};
use crate::config::ClerkConfig;
use crate::error::{Result, database_open_failed, missing_credentials};
use crate::session::ClerkSession;
use crate::store::SqliteStore;

/// Environment variable holding the clerk password for non-interactive use
pub const PASSWORD_ENV: &str = "BOOKSTORE_PASSWORD";

/// Settings resolved from global flags, environment and config.yaml
#[derive(Debug, Clone)]
pub struct Context {
    pub database: PathBuf,
    pub clerk: Option<ClerkId>,
    pub config: ClerkConfig,
}

impl Context {
    pub fn new(
        database_flag: Option<PathBuf>,
        clerk: Option<ClerkId>,
        config: ClerkConfig,
    ) -> Result<Self> {
        let database = config.database_path(database_flag)?;
        Ok(Self {
            database,
            clerk,
            config,
        })
    }

    /// Open an initialized database; `clerk db init` must have run first
    pub fn open_store(&self) -> Result<SqliteStore> {
        let store = SqliteStore::open(&self.database)?;
        if store.schema_version()? == 0 {
            return Err(database_open_failed(
                self.database.display().to_string(),
                "the database is not initialized yet, run `clerk db init` first",
            ));
        }
        Ok(store)
    }

    /// Open or create the database without checking its schema
    pub fn open_raw_store(&self) -> Result<SqliteStore> {
        SqliteStore::open(&self.database)
    }

    /// Clerk number from `--clerk` / `BOOKSTORE_CLERK`
    pub fn clerk_id(&self) -> Result<ClerkId> {
        self.clerk
            .ok_or_else(|| missing_credentials("clerk number (--clerk or BOOKSTORE_CLERK)"))
    }

    /// Credentials for a non-interactive command; the password may still be prompted
    pub fn credentials(&self) -> Result<Credentials> {
        let clerk = self.clerk_id()?;
        let password = read_password("Password:")?;
        Ok(Credentials::new(clerk, &password))
    }

    /// Log in once, failing with `LoginFailed` on bad credentials
    pub fn login<'a>(&self, store: &'a SqliteStore) -> Result<ClerkSession<'a, SqliteStore>> {
        ClerkSession::login(store, &self.credentials()?)
    }
}

/// Password from `BOOKSTORE_PASSWORD`, or a masked prompt
pub fn read_password(prompt: &str) -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }
    Ok(Password::new(prompt)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?)
}

/// New password, typed twice unless it comes from `BOOKSTORE_PASSWORD`
pub fn read_new_password(prompt: &str) -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }
    Ok(Password::new(prompt)
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_custom_confirmation_message("Repeat password:")
        .with_custom_confirmation_error_message("The passwords don't match.")
        .prompt()?)
}

/// Clerk number from the flag, or a prompt
pub fn prompt_clerk_id(preset: Option<ClerkId>) -> Result<ClerkId> {
    if let Some(clerk) = preset {
        return Ok(clerk);
    }
    Ok(CustomType::<ClerkId>::new("Clerk number:")
        .with_error_message("Please type a valid clerk number")
        .prompt()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::PasswordDigest;
    use crate::error::ClerkError;
    use serial_test::serial;
    use tempfile::TempDir;

    fn context(dir: &TempDir, clerk: Option<ClerkId>) -> Context {
        Context::new(
            Some(dir.path().join("books.db")),
            clerk,
            ClerkConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_context_prefers_flag_database() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, None);
        assert_eq!(ctx.database, temp.path().join("books.db"));
    }

    #[test]
    fn test_clerk_id_missing() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, None);
        assert!(matches!(
            ctx.clerk_id(),
            Err(ClerkError::MissingCredentials { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_login_with_env_password() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, Some(4));
        let store = ctx.open_raw_store().unwrap();
        store.init_schema().unwrap();
        store
            .upsert_clerk(4, &PasswordDigest::from_password("s3cret"))
            .unwrap();

        unsafe {
            std::env::set_var(PASSWORD_ENV, "s3cret");
        }
        let session = ctx.login(&store);
        unsafe {
            std::env::set_var(PASSWORD_ENV, "wrong");
        }
        let rejected = ctx.login(&store);
        unsafe {
            std::env::remove_var(PASSWORD_ENV);
        }

        assert_eq!(session.unwrap().clerk(), 4);
        assert!(matches!(rejected, Err(ClerkError::LoginFailed { clerk: 4 })));
    }

    #[test]
    fn test_open_store_refuses_uninitialized_database() {
        let temp = TempDir::new().unwrap();
        let ctx = context(&temp, Some(4));

        let err = ctx.open_store().err().unwrap();
        assert!(matches!(err, ClerkError::DatabaseOpenFailed { .. }));
        assert!(err.to_string().contains("clerk db init"));

        ctx.open_raw_store().unwrap().init_schema().unwrap();
        assert!(ctx.open_store().is_ok());
    }

    #[test]
    fn test_prompt_clerk_id_uses_flag() {
        assert_eq!(prompt_clerk_id(Some(7)).unwrap(), 7);
    }
}
