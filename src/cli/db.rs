use clap::{Parser, Subcommand};

use crate::auth::ClerkId;

/// Arguments for the db command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Create an empty database:\n    clerk db init\n\n\
                  Create a database with a few sample books:\n    clerk db init --sample\n\n\
                  Register clerk 4 (password is prompted):\n    clerk db add-clerk 4\n\n\
                  Register clerk 4 non-interactively:\n    BOOKSTORE_PASSWORD=s3cret clerk db add-clerk 4")]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DbSubcommand {
    /// Create the tables if they do not exist
    Init {
        /// Also load sample books and purchase history
        #[arg(long)]
        sample: bool,
    },

    /// Register a clerk or change their password
    AddClerk {
        /// Clerk number
        id: ClerkId,
    },
}
