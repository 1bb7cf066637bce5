//! Common test utilities for clerk integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Clerk registered by [`TestShop::with_sample`]
#[allow(dead_code)]
pub const CLERK: &str = "4";

/// Password of [`CLERK`]
#[allow(dead_code)]
pub const PASSWORD: &str = "s3cret";

#[allow(dead_code)]
pub const C_BOOK: &str = "978-0-13-110362-7";
#[allow(dead_code)]
pub const RUST_BOOK: &str = "978-1-59327-828-1";
#[allow(dead_code)]
pub const ALGO_BOOK: &str = "978-0-262-03384-8";
#[allow(dead_code)]
pub const JS_BOOK: &str = "978-0-596-51774-8";

/// A throwaway shop: its own database file and an empty config directory
pub struct TestShop {
    /// Temporary directory holding the database and config home
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the database file
    pub db: PathBuf,
}

impl TestShop {
    /// Shop without a database file yet
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let db = temp.path().join("shop").join("bookstore.db");
        Self { temp, db }
    }

    /// Shop with the sample catalogue and clerk 4 registered
    #[allow(dead_code)]
    pub fn with_sample() -> Self {
        let shop = Self::new();
        shop.cmd()
            .args(["db", "init", "--sample"])
            .assert()
            .success();
        shop.cmd()
            .env("BOOKSTORE_PASSWORD", PASSWORD)
            .args(["db", "add-clerk", CLERK])
            .assert()
            .success();
        shop
    }

    /// `clerk` isolated from the developer's environment and settings
    #[allow(deprecated)]
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("clerk").expect("clerk binary should be built");
        cmd.env("BOOKSTORE_DB", &self.db)
            .env("HOME", self.temp.path())
            .env("XDG_CONFIG_HOME", self.temp.path().join("config"))
            .env("XDG_DATA_HOME", self.temp.path().join("data"))
            .env_remove("BOOKSTORE_CLERK")
            .env_remove("BOOKSTORE_PASSWORD")
            .env_remove("BOOKSTORE_CONFIG")
            .env_remove("BOOKSTORE_LOG");
        cmd
    }

    /// `clerk` logged in as the sample clerk
    #[allow(dead_code)]
    pub fn clerk_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.env("BOOKSTORE_CLERK", CLERK)
            .env("BOOKSTORE_PASSWORD", PASSWORD);
        cmd
    }

    /// Write a file under the temp directory, returning its path
    #[allow(dead_code)]
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.temp.path().join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }
}
