//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - search: Search command arguments
//! - show: Show command arguments
//! - request: Restock request subcommands
//! - bundle: Bundle subcommands
//! - db: Database setup subcommands
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::auth::ClerkId;

pub mod bundle;
pub mod completions;
pub mod db;
pub mod request;
pub mod search;
pub mod show;

pub use bundle::{BundleArgs, BundleSubcommand, ItemSpec};
pub use completions::CompletionsArgs;
pub use db::{DbArgs, DbSubcommand};
pub use request::{RequestArgs, RequestSubcommand};
pub use search::SearchArgs;
pub use show::ShowArgs;

/// Bookstore clerk console
///
/// Search stock against purchase history, file restock requests and build discounted bundles.
#[derive(Parser, Debug)]
#[command(
    name = "clerk",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bookstore clerk console",
    long_about = "Clerk searches the book stock against purchase history, files restock \
                  requests and builds discounted bundles. Without a command it starts an \
                  interactive session.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  clerk db init --sample                  \x1b[90m# Create a database with sample books\x1b[0m\n   \
                  clerk db add-clerk 4                    \x1b[90m# Register clerk 4\x1b[0m\n   \
                  clerk -c 4                              \x1b[90m# Start an interactive session\x1b[0m\n   \
                  clerk -c 4 search --preset trending     \x1b[90m# Books selling well and running low\x1b[0m\n   \
                  clerk -c 4 request set 978-0-13-110362-7 12 \x1b[90m# Ask for 12 copies\x1b[0m\n   \
                  clerk -c 4 bundle list                  \x1b[90m# Show saved bundles\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Database file (defaults to the config file setting, then the data directory)
    #[arg(long, short = 'd', global = true, env = "BOOKSTORE_DB")]
    pub database: Option<PathBuf>,

    /// Clerk number to log in as
    #[arg(long, short = 'c', global = true, env = "BOOKSTORE_CLERK")]
    pub clerk: Option<ClerkId>,

    /// Settings file (defaults to config.yaml in the platform config directory)
    #[arg(long, global = true, env = "BOOKSTORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive session (default)
    Session,

    /// Search books by purchases and stock
    Search(SearchArgs),

    /// Show book details
    Show(ShowArgs),

    /// Manage restock requests
    Request(RequestArgs),

    /// Manage discounted bundles
    Bundle(BundleArgs),

    /// Set up the database
    Db(DbArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
