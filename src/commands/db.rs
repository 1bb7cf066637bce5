//! Database setup commands

use console::Style;

use crate::auth::PasswordDigest;
use crate::cli::{DbArgs, DbSubcommand};
use crate::error::Result;

use super::Context;
use super::helpers::read_new_password;

pub fn run(ctx: &Context, args: DbArgs) -> Result<()> {
    let store = ctx.open_raw_store()?;
    store.init_schema()?;

    match args.command {
        DbSubcommand::Init { sample } => {
            println!(
                "{} database at {}",
                Style::new().green().bold().apply_to("Initialized"),
                ctx.database.display()
            );
            if sample {
                let books = store.load_sample()?;
                println!("Loaded {books} sample books");
            }
        }
        DbSubcommand::AddClerk { id } => {
            let password = read_new_password(&format!("Password for clerk {id}:"))?;
            store.upsert_clerk(id, &PasswordDigest::from_password(&password))?;
            tracing::info!(clerk = id, "clerk registered");
            println!(
                "{} clerk {id}",
                Style::new().green().bold().apply_to("Registered")
            );
        }
    }
    Ok(())
}
