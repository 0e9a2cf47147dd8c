//! Discovery commands: feed and search.

use super::parse_user_id;
use crate::cli::{FeedArgs, SearchArgs};
use crate::error::Result;
use crate::output::Formatter;
use tandem_engine::Engine;
use tandem_store::SqliteStore;

/// Execute the feed command.
pub fn execute_feed(
    args: FeedArgs,
    store: &SqliteStore,
    engine: &Engine,
    formatter: &Formatter,
) -> Result<()> {
    let actor = parse_user_id(&args.actor)?;
    let page = engine.feed(store, actor, args.page, args.limit)?;

    println!("{}", formatter.format_profiles(&page)?);
    Ok(())
}

/// Execute the search command.
pub fn execute_search(
    args: SearchArgs,
    store: &SqliteStore,
    engine: &Engine,
    formatter: &Formatter,
) -> Result<()> {
    let actor = parse_user_id(&args.actor)?;
    let matches = engine.search(store, actor, &args.query)?;

    println!("{}", formatter.format_profiles(&matches)?);
    Ok(())
}
