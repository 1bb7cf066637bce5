//! Clerk - bookstore clerk console
//!
//! Searches the book stock against purchase history, files restock requests
//! and builds discounted bundles, on top of an embedded SQLite database.

use clap::Parser;

mod auth;
mod cli;
mod commands;
mod config;
mod error;
mod filter;
mod ledger;
mod logging;
mod session;
mod store;
mod ui;

use cli::{Cli, Commands};
use commands::Context;
use config::ClerkConfig;
use error::Result;

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        // Neither touches the database or the settings file
        Some(Commands::Version) => commands::version::run(),
        Some(Commands::Completions(args)) => commands::completions::run(args),
        command => {
            let config = ClerkConfig::load(cli.config.as_deref())?;
            let ctx = Context::new(cli.database, cli.clerk, config)?;
            tracing::debug!(database = %ctx.database.display(), "resolved database");
            dispatch(&ctx, command.unwrap_or(Commands::Session))
        }
    }
}

fn dispatch(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Session => commands::session::run(ctx),
        Commands::Search(args) => commands::search::run(ctx, args),
        Commands::Show(args) => commands::show::run(ctx, args),
        Commands::Request(args) => commands::request::run(ctx, args),
        Commands::Bundle(args) => commands::bundle::run(ctx, args),
        Commands::Db(args) => commands::db::run(ctx, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
