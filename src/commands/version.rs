//! Version command implementation

use crate::error::Result;
use crate::store::schema::SCHEMA_VERSION;

/// Run version command
pub fn run() -> Result<()> {
    println!("clerk {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());
    println!("  Database schema: v{SCHEMA_VERSION}");
    println!("  SQLite: {}", rusqlite::version());

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
