//! Show command

use crate::cli::ShowArgs;
use crate::error::Result;
use crate::ui::formatter_for;

use super::Context;

/// Print one book, including this clerk's pending request for it
pub fn run(ctx: &Context, args: ShowArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let session = ctx.login(&store)?;

    let details = session.details(&args.isbn)?;
    let requested = session.requested_quantity(&details.isbn)?;
    print!("{}", formatter_for(args.json).details(&details, requested)?);
    Ok(())
}
