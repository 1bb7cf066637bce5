use clap::{Parser, Subcommand};

/// Arguments for the request command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Ask for 12 more copies:\n    clerk request set 978-0-13-110362-7 12\n\n\
                  Withdraw a request:\n    clerk request remove 978-0-13-110362-7\n\n\
                  List your pending requests:\n    clerk request list")]
pub struct RequestArgs {
    #[command(subcommand)]
    pub command: RequestSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RequestSubcommand {
    /// File or change a restock request (0 withdraws it)
    Set {
        /// ISBN of the book
        isbn: String,

        /// Number of copies wanted
        quantity: u32,
    },

    /// Withdraw a restock request
    Remove {
        /// ISBN of the book
        isbn: String,
    },

    /// List this clerk's pending requests
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
