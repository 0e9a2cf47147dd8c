//! Request lifecycle commands: send, review, and pending-request listings.

use super::{parse_relationship_id, parse_status, parse_user_id};
use crate::cli::{RequestDirection, RequestsArgs, ReviewArgs, SendArgs};
use crate::error::Result;
use crate::output::Formatter;
use tandem_engine::Engine;
use tandem_store::SqliteStore;

/// Execute the send command.
pub fn execute_send(
    args: SendArgs,
    store: &mut SqliteStore,
    engine: &Engine,
    formatter: &Formatter,
) -> Result<()> {
    let actor = parse_user_id(&args.actor)?;
    let target = parse_user_id(&args.target)?;
    let status = parse_status(&args.status)?;

    let record = engine.send_request(store, actor, target, status)?;

    println!(
        "{}",
        formatter.success(&format!("Request {} recorded: {}", record.status, record.id))
    );
    Ok(())
}

/// Execute the review command.
pub fn execute_review(
    args: ReviewArgs,
    store: &mut SqliteStore,
    engine: &Engine,
    formatter: &Formatter,
) -> Result<()> {
    let actor = parse_user_id(&args.actor)?;
    let request_id = parse_relationship_id(&args.request_id)?;
    let decision = parse_status(&args.decision)?;

    let record = engine.review_request(store, actor, request_id, decision)?;

    println!(
        "{}",
        formatter.success(&format!("Request {}: {}", record.id, record.status))
    );
    Ok(())
}

/// Execute the requests command.
pub fn execute_requests(
    args: RequestsArgs,
    store: &SqliteStore,
    engine: &Engine,
    formatter: &Formatter,
) -> Result<()> {
    let actor = parse_user_id(&args.actor)?;

    let requests = match args.direction {
        RequestDirection::Received => engine.list_received_requests(store, actor)?,
        RequestDirection::Sent => engine.list_sent_requests(store, actor)?,
    };

    println!("{}", formatter.format_requests(&requests)?);
    Ok(())
}
