//! Search command

use crate::cli::SearchArgs;
use crate::error::Result;
use crate::filter::DateRange;
use crate::ui::{filter_summary, formatter_for};

use super::Context;

/// Log in, apply the requested filters and print the matching rows
pub fn run(ctx: &Context, args: SearchArgs) -> Result<()> {
    let dates = DateRange::new(args.from_date.as_deref(), args.to_date.as_deref())?;
    let store = ctx.open_store()?;
    let mut session = ctx.login(&store)?;

    if args.preset.is_none() {
        session.apply_preset(ctx.config.default_preset);
    }
    for action in args.filter_actions() {
        session.apply_filter(action);
    }
    session.set_dates(dates);
    tracing::debug!(filters = %filter_summary(session.filters()), "searching");

    let rows = session.search()?;
    print!("{}", formatter_for(args.json).rows(rows)?);
    Ok(())
}
