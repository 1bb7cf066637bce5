use clap::Parser;

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show a book:\n    clerk show 978-0-13-110362-7\n\n\
                  Show a book as JSON:\n    clerk show 978-0-13-110362-7 --json")]
pub struct ShowArgs {
    /// ISBN of the book
    pub isbn: String,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}
