//! Bundle commands
//!
//! `bundle create` drives the same ledger the interactive session uses: every
//! `--item` is added at its catalogue price and discounted, and the bundle is
//! only saved if all of that succeeded.

use console::Style;

use crate::cli::{BundleArgs, BundleSubcommand, ItemSpec};
use crate::error::Result;
use crate::session::ClerkSession;
use crate::store::Store;
use crate::ui::formatter_for;

use super::Context;

pub fn run(ctx: &Context, args: BundleArgs) -> Result<()> {
    let store = ctx.open_store()?;
    let mut session = ctx.login(&store)?;

    match args.command {
        BundleSubcommand::Create {
            name,
            comment,
            items,
            json,
        } => {
            build(&mut session, &items)?;
            // Render before saving; a successful save clears the ledger
            let rendered = match session.bundle() {
                Some(ledger) => formatter_for(json).ledger(ledger)?,
                None => String::new(),
            };
            let id = session.save_bundle(&name, &comment)?;
            print!("{rendered}");
            if !json {
                println!(
                    "{} bundle '{}' (#{id})",
                    Style::new().green().bold().apply_to("Saved"),
                    name
                );
            }
        }
        BundleSubcommand::List { json } => {
            print!("{}", formatter_for(json).bundles(&session.bundles()?)?);
        }
    }
    Ok(())
}

/// Fill a fresh ledger from `--item` values
fn build<S: Store + ?Sized>(session: &mut ClerkSession<'_, S>, items: &[ItemSpec]) -> Result<()> {
    session.start_bundle();
    for (index, item) in items.iter().enumerate() {
        session.bundle_add(&item.isbn)?;
        session.bundle_discount(index, item.discount)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, PasswordDigest};
    use crate::error::ClerkError;
    use crate::store::{BundleStore, SqliteStore};
    use rust_decimal::Decimal;

    fn store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.init_schema().unwrap();
        store.load_sample().unwrap();
        store
            .upsert_clerk(1, &PasswordDigest::from_password("pw"))
            .unwrap();
        store
    }

    fn item(isbn: &str, discount: Decimal) -> ItemSpec {
        ItemSpec {
            isbn: isbn.to_string(),
            discount,
        }
    }

    #[test]
    fn test_build_applies_discounts() {
        let store = store();
        let mut session = ClerkSession::login(&store, &Credentials::new(1, "pw")).unwrap();
        build(
            &mut session,
            &[
                item("978-0-262-03384-8", Decimal::new(5, 1)),
                item("978-0-13-110362-7", Decimal::ZERO),
            ],
        )
        .unwrap();

        let ledger = session.bundle().unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.total_savings(), Decimal::new(4450, 2));
        assert_eq!(ledger.total_after_discount(), Decimal::new(9949, 2));
    }

    #[test]
    fn test_build_rejects_duplicate_items() {
        let store = store();
        let mut session = ClerkSession::login(&store, &Credentials::new(1, "pw")).unwrap();
        let result = build(
            &mut session,
            &[
                item("978-0-13-110362-7", Decimal::ZERO),
                item("978-0-13-110362-7", Decimal::new(1, 1)),
            ],
        );
        assert!(matches!(result, Err(ClerkError::DuplicateItem { .. })));
        assert!(store.bundles().unwrap().is_empty());
    }
}
