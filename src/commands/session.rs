//! Interactive clerk session
//!
//! Login-gated menu loop over a [`ClerkSession`]. Every menu entry becomes a
//! session call; failures of a single action are reported and the menu is
//! shown again. Only an interrupted prompt (Ctrl-C) ends the loop early.

use std::fmt;

use console::Style;
use inquire::{Confirm, CustomType, Select, Text};

use crate::auth::{ClerkId, Credentials};
use crate::error::{ClerkError, Result, no_row_selected};
use crate::filter::{DateRange, FilterAction, Metric, Preset};
use crate::ledger::parse_discount;
use crate::session::ClerkSession;
use crate::store::{SqliteStore, Store};
use crate::ui::{DisplayFormatter, TextFormatter, filter_summary, format_money};

use super::Context;
use super::helpers::{PASSWORD_ENV, prompt_clerk_id, read_password};
use super::request::describe;

const HELP: &str = "↑↓ to move, ENTER to select, ESC to go back";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Search,
    EditFilters,
    ApplyPreset,
    SetDates,
    ShowDetails,
    FillRequest,
    ListRequests,
    StartBundle,
    BundleAdd,
    BundleRemove,
    BundleDiscount,
    ShowBundle,
    SaveBundle,
    CancelBundle,
    ListBundles,
    Logout,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuItem::Search => "Search",
            MenuItem::EditFilters => "Edit filters",
            MenuItem::ApplyPreset => "Apply a preset",
            MenuItem::SetDates => "Set purchase dates",
            MenuItem::ShowDetails => "Show book details",
            MenuItem::FillRequest => "Request copies",
            MenuItem::ListRequests => "My requests",
            MenuItem::StartBundle => "Start a bundle",
            MenuItem::BundleAdd => "Add book to bundle",
            MenuItem::BundleRemove => "Remove book from bundle",
            MenuItem::BundleDiscount => "Set discount",
            MenuItem::ShowBundle => "Show bundle",
            MenuItem::SaveBundle => "Save bundle",
            MenuItem::CancelBundle => "Cancel bundle",
            MenuItem::ListBundles => "Saved bundles",
            MenuItem::Logout => "Log out",
        };
        f.write_str(label)
    }
}

/// Menu entries offered in the current state
fn menu_items(building_bundle: bool, has_rows: bool) -> Vec<MenuItem> {
    let mut items = vec![
        MenuItem::Search,
        MenuItem::EditFilters,
        MenuItem::ApplyPreset,
        MenuItem::SetDates,
    ];
    if has_rows {
        items.extend([MenuItem::ShowDetails, MenuItem::FillRequest]);
    }
    items.push(MenuItem::ListRequests);
    if building_bundle {
        if has_rows {
            items.push(MenuItem::BundleAdd);
        }
        items.extend([
            MenuItem::BundleRemove,
            MenuItem::BundleDiscount,
            MenuItem::ShowBundle,
            MenuItem::SaveBundle,
            MenuItem::CancelBundle,
        ]);
    } else {
        items.push(MenuItem::StartBundle);
    }
    items.extend([MenuItem::ListBundles, MenuItem::Logout]);
    items
}

/// Select entry wrapping a list index
struct Choice {
    index: usize,
    label: String,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn pick(prompt: &str, labels: Vec<String>, page_size: usize) -> Result<Option<usize>> {
    let choices: Vec<Choice> = labels
        .into_iter()
        .enumerate()
        .map(|(index, label)| Choice { index, label })
        .collect();
    let picked = Select::new(prompt, choices)
        .with_page_size(page_size.max(1))
        .with_help_message(HELP)
        .prompt_skippable()?;
    Ok(picked.map(|c| c.index))
}

/// Start the menu loop
pub fn run(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let Some(mut session) = login(ctx, &store)? else {
        println!("Bye.");
        return Ok(());
    };
    session.apply_preset(ctx.config.default_preset);
    println!(
        "{} as clerk {}",
        Style::new().green().bold().apply_to("Logged in"),
        session.clerk()
    );

    loop {
        println!(
            "\n{}",
            Style::new().dim().apply_to(filter_summary(session.filters()))
        );
        if let Some(ledger) = session.bundle() {
            println!(
                "{}",
                Style::new().dim().apply_to(format!(
                    "bundle: {} books, {}",
                    ledger.len(),
                    format_money(ledger.total_after_discount())
                ))
            );
        }

        let items = menu_items(session.bundle().is_some(), !session.rows().is_empty());
        let Some(item) = Select::new("What next?", items)
            .with_page_size(ctx.config.page_size.max(items_page_floor()))
            .with_help_message("↑↓ to move, ENTER to select, ESC to log out")
            .prompt_skippable()?
        else {
            break;
        };
        if item == MenuItem::Logout {
            break;
        }

        match handle(&mut session, item, ctx.config.page_size) {
            Ok(()) => {}
            Err(e @ ClerkError::PromptFailed { .. }) => return Err(e),
            Err(e) => eprintln!("{} {e}", Style::new().red().bold().apply_to("Error:")),
        }
    }

    if session.bundle().is_some_and(|b| !b.is_empty())
        && Confirm::new("Save the bundle before logging out?")
            .with_default(true)
            .prompt()?
    {
        save_bundle(&mut session)?;
    }
    session.logout();
    println!("Bye.");
    Ok(())
}

/// Smallest page that still shows the whole bundle menu
fn items_page_floor() -> usize {
    menu_items(true, true).len()
}

/// Credentials for one login attempt
///
/// The clerk number is asked for on every attempt unless `--clerk` fixed it.
fn attempt_credentials(
    fixed_clerk: Option<ClerkId>,
    ask_clerk: impl FnOnce() -> Result<ClerkId>,
    ask_password: impl FnOnce() -> Result<String>,
) -> Result<Credentials> {
    let clerk = match fixed_clerk {
        Some(clerk) => clerk,
        None => ask_clerk()?,
    };
    Ok(Credentials::new(clerk, &ask_password()?))
}

/// Ask for credentials until they are accepted or the clerk gives up
fn login<'a>(ctx: &Context, store: &'a SqliteStore) -> Result<Option<ClerkSession<'a, SqliteStore>>> {
    loop {
        let credentials = attempt_credentials(
            ctx.clerk,
            || prompt_clerk_id(None),
            || read_password("Password:"),
        )?;
        match ClerkSession::login(store, &credentials) {
            Ok(session) => return Ok(Some(session)),
            Err(e @ ClerkError::LoginFailed { .. }) => {
                eprintln!("{} {e}", Style::new().red().bold().apply_to("Error:"));
                // A password from the environment would fail the same way again
                if std::env::var(PASSWORD_ENV).is_ok() {
                    return Err(e);
                }
                if !Confirm::new("Retry?").with_default(true).prompt()? {
                    return Ok(None);
                }
            }
            Err(e) => return Err(e),
        }
    }
}

fn handle<S: Store + ?Sized>(
    session: &mut ClerkSession<'_, S>,
    item: MenuItem,
    page_size: usize,
) -> Result<()> {
    match item {
        MenuItem::Search => {
            let rows = session.search()?;
            print!("{}", TextFormatter.rows(rows)?);
        }
        MenuItem::EditFilters => edit_filters(session)?,
        MenuItem::ApplyPreset => {
            let presets = vec![Preset::Trending, Preset::Overstocked];
            if let Some(preset) = Select::new("Preset:", presets)
                .with_help_message(HELP)
                .prompt_skippable()?
            {
                session.apply_preset(preset);
            }
        }
        MenuItem::SetDates => {
            let current = *session.dates();
            let from = Text::new("Purchases from (YYYY-MM-DD):")
                .with_default(&current.from().to_string())
                .prompt()?;
            let to = Text::new("Purchases to (YYYY-MM-DD):")
                .with_default(&current.to().to_string())
                .prompt()?;
            session.set_dates(DateRange::new(Some(&from), Some(&to))?);
        }
        MenuItem::ShowDetails => {
            if let Some(isbn) = pick_row(session, page_size)? {
                let details = session.details(&isbn)?;
                let requested = session.requested_quantity(&isbn)?;
                print!("{}", TextFormatter.details(&details, requested)?);
            }
        }
        MenuItem::FillRequest => {
            if let Some(isbn) = pick_row(session, page_size)? {
                let current = session.requested_quantity(&isbn)?;
                let quantity = CustomType::<u32>::new(&format!("Copies of {isbn} to request:"))
                    .with_default(current.unwrap_or(1))
                    .with_help_message("0 withdraws the request")
                    .with_error_message("Please type a whole number")
                    .prompt()?;
                let outcome = session.fill_request(&isbn, quantity)?;
                println!("{}", describe(outcome, &isbn, quantity));
            }
        }
        MenuItem::ListRequests => print!("{}", TextFormatter.requests(&session.requests()?)?),
        MenuItem::StartBundle => {
            session.start_bundle();
        }
        MenuItem::BundleAdd => {
            if let Some(isbn) = pick_row(session, page_size)? {
                let price = session.bundle_add(&isbn)?;
                println!("Added {isbn} at {}", format_money(price));
            }
        }
        MenuItem::BundleRemove => {
            if let Some(index) = pick_bundle_item(session, page_size)? {
                let item = session.bundle_remove(index)?;
                println!("Removed {}", item.isbn());
            }
        }
        MenuItem::BundleDiscount => {
            if let Some(index) = pick_bundle_item(session, page_size)? {
                let input = Text::new("Discount (e.g. 0.25 or 25%):").prompt()?;
                session.bundle_discount(index, parse_discount(&input)?)?;
            }
        }
        MenuItem::ShowBundle => {
            if let Some(ledger) = session.bundle() {
                print!("{}", TextFormatter.ledger(ledger)?);
            }
        }
        MenuItem::SaveBundle => save_bundle(session)?,
        MenuItem::CancelBundle => {
            if Confirm::new("Discard this bundle?")
                .with_default(false)
                .prompt()?
            {
                session.cancel_bundle();
            }
        }
        MenuItem::ListBundles => print!("{}", TextFormatter.bundles(&session.bundles()?)?),
        MenuItem::Logout => {}
    }
    Ok(())
}

fn edit_filters<S: Store + ?Sized>(session: &mut ClerkSession<'_, S>) -> Result<()> {
    let Some(metric) = Select::new("Which range?", vec![Metric::Bought, Metric::Stock])
        .with_help_message(HELP)
        .prompt_skippable()?
    else {
        return Ok(());
    };
    let pair = *session.filters().pair(metric);

    let lower = CustomType::<u32>::new(&format!("{metric} more than:"))
        .with_default(pair.lower())
        .prompt()?;
    session.apply_filter(FilterAction::SetLower(metric, lower));
    let lower_active = Confirm::new("Use this bound?")
        .with_default(pair.lower_active())
        .prompt()?;
    session.apply_filter(FilterAction::SetLowerActive(metric, lower_active));

    let upper = CustomType::<u32>::new(&format!("{metric} less than:"))
        .with_default(session.filters().pair(metric).upper())
        .prompt()?;
    session.apply_filter(FilterAction::SetUpper(metric, upper));
    let upper_active = Confirm::new("Use this bound?")
        .with_default(pair.upper_active())
        .prompt()?;
    session.apply_filter(FilterAction::SetUpperActive(metric, upper_active));
    Ok(())
}

/// Pick a row from the last search, returning its ISBN
fn pick_row<S: Store + ?Sized>(
    session: &ClerkSession<'_, S>,
    page_size: usize,
) -> Result<Option<String>> {
    if session.rows().is_empty() {
        return Err(no_row_selected());
    }
    let labels = session
        .rows()
        .iter()
        .map(|row| {
            format!(
                "{}  (bought {}, in stock {})",
                row.isbn, row.sold_count, row.quantity
            )
        })
        .collect();
    match pick("Book:", labels, page_size)? {
        Some(index) => Ok(Some(session.select(index)?.isbn.clone())),
        None => Ok(None),
    }
}

fn pick_bundle_item<S: Store + ?Sized>(
    session: &ClerkSession<'_, S>,
    page_size: usize,
) -> Result<Option<usize>> {
    let Some(ledger) = session.bundle().filter(|l| !l.is_empty()) else {
        println!("The bundle is empty.");
        return Ok(None);
    };
    let labels = ledger
        .items()
        .iter()
        .map(|item| format!("{}  {}", item.isbn(), format_money(item.discounted_price())))
        .collect();
    pick("Bundle item:", labels, page_size)
}

fn save_bundle<S: Store + ?Sized>(session: &mut ClerkSession<'_, S>) -> Result<()> {
    let name = Text::new("Bundle name:").prompt()?;
    let comment = Text::new("Comment:").with_default("").prompt()?;
    let id = session.save_bundle(&name, &comment)?;
    println!(
        "{} bundle '{name}' (#{id})",
        Style::new().green().bold().apply_to("Saved")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_menu_without_rows_or_bundle() {
        let items = menu_items(false, false);
        assert!(items.contains(&MenuItem::Search));
        assert!(items.contains(&MenuItem::StartBundle));
        assert!(!items.contains(&MenuItem::ShowDetails));
        assert!(!items.contains(&MenuItem::SaveBundle));
        assert_eq!(items.last(), Some(&MenuItem::Logout));
    }

    #[test]
    fn test_menu_while_building_bundle() {
        let items = menu_items(true, true);
        assert!(items.contains(&MenuItem::BundleAdd));
        assert!(items.contains(&MenuItem::SaveBundle));
        assert!(items.contains(&MenuItem::CancelBundle));
        assert!(!items.contains(&MenuItem::StartBundle));
    }

    #[test]
    fn test_menu_bundle_add_needs_rows() {
        let items = menu_items(true, false);
        assert!(!items.contains(&MenuItem::BundleAdd));
        assert!(items.contains(&MenuItem::BundleRemove));
    }

    #[test]
    fn test_retry_asks_for_clerk_number_again() {
        let password = || Ok("s3cret".to_string());
        let mistyped = attempt_credentials(None, || Ok(5), password).unwrap();
        let corrected = attempt_credentials(None, || Ok(4), password).unwrap();
        assert_eq!(mistyped.clerk, 5);
        assert_eq!(corrected.clerk, 4);
    }

    #[test]
    fn test_retry_keeps_clerk_from_flag() {
        let credentials = attempt_credentials(
            Some(7),
            || panic!("clerk number must not be prompted"),
            || Ok("s3cret".to_string()),
        )
        .unwrap();
        assert_eq!(credentials.clerk, 7);
        assert_eq!(credentials.digest, Credentials::new(7, "s3cret").digest);
    }

    #[test]
    fn test_attempt_stops_on_cancelled_prompt() {
        let result = attempt_credentials(
            None,
            || Err(ClerkError::from(inquire::InquireError::OperationCanceled)),
            || panic!("password must not be prompted"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_menu_labels() {
        assert_eq!(MenuItem::FillRequest.to_string(), "Request copies");
        assert_eq!(MenuItem::Logout.to_string(), "Log out");
    }
}
