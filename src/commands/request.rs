//! Restock request commands

use console::Style;

use crate::cli::{RequestArgs, RequestSubcommand};
use crate::error::Result;
use crate::store::RequestOutcome;
use crate::ui::formatter_for;

use super::Context;

pub(crate) fn describe(outcome: RequestOutcome, isbn: &str, quantity: u32) -> String {
    match outcome {
        RequestOutcome::Inserted => format!("Requested {quantity} copies of {isbn}"),
        RequestOutcome::Updated => format!("Changed request for {isbn} to {quantity} copies"),
        RequestOutcome::Removed => format!("Withdrew request for {isbn}"),
        RequestOutcome::Unchanged => format!("No request for {isbn} to withdraw"),
    }
}

pub fn run(ctx: &Context, args: RequestArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let session = ctx.login(&store)?;

    match args.command {
        RequestSubcommand::Set { isbn, quantity } => {
            let outcome = session.fill_request(&isbn, quantity)?;
            println!(
                "{}",
                Style::new().green().apply_to(describe(outcome, &isbn, quantity))
            );
        }
        RequestSubcommand::Remove { isbn } => {
            let outcome = session.fill_request(&isbn, 0)?;
            println!("{}", describe(outcome, &isbn, 0));
        }
        RequestSubcommand::List { json } => {
            print!("{}", formatter_for(json).requests(&session.requests()?)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_outcomes() {
        assert_eq!(
            describe(RequestOutcome::Inserted, "978", 3),
            "Requested 3 copies of 978"
        );
        assert_eq!(
            describe(RequestOutcome::Updated, "978", 5),
            "Changed request for 978 to 5 copies"
        );
        assert_eq!(
            describe(RequestOutcome::Removed, "978", 0),
            "Withdrew request for 978"
        );
        assert_eq!(
            describe(RequestOutcome::Unchanged, "978", 0),
            "No request for 978 to withdraw"
        );
    }
}
