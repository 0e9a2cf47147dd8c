//! Connection listing and removal commands.

use super::parse_user_id;
use crate::cli::{ConnectionsArgs, DisconnectArgs};
use crate::error::Result;
use crate::output::Formatter;
use tandem_engine::Engine;
use tandem_store::SqliteStore;

/// Execute the connections command.
pub fn execute_connections(
    args: ConnectionsArgs,
    store: &SqliteStore,
    engine: &Engine,
    formatter: &Formatter,
) -> Result<()> {
    let actor = parse_user_id(&args.actor)?;
    let connections = engine.list_connections(store, actor)?;

    println!("{}", formatter.format_profiles(&connections)?);
    Ok(())
}

/// Execute the disconnect command.
pub fn execute_disconnect(
    args: DisconnectArgs,
    store: &mut SqliteStore,
    engine: &Engine,
    formatter: &Formatter,
) -> Result<()> {
    let actor = parse_user_id(&args.actor)?;
    let other = parse_user_id(&args.other)?;

    engine.remove_connection(store, actor, other)?;

    println!(
        "{}",
        formatter.success(&format!("Connection with {} removed", other))
    );
    Ok(())
}
