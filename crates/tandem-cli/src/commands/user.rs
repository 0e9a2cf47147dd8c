//! User management commands (identity rows only; credentials are out of
//! scope for this tool).

use super::parse_user_id;
use crate::cli::{UserAction, UserAddArgs, UserRemoveArgs};
use crate::error::Result;
use crate::output::Formatter;
use tandem_domain::traits::IdentityDirectory;
use tandem_domain::{SafeProfile, UserId};
use tandem_engine::Engine;
use tandem_store::SqliteStore;

/// Execute a user subcommand.
pub fn execute_user(
    action: UserAction,
    store: &mut SqliteStore,
    engine: &Engine,
    formatter: &Formatter,
) -> Result<()> {
    match action {
        UserAction::Add(args) => add_user(args, store, formatter),
        UserAction::List => list_users(store, formatter),
        UserAction::Remove(args) => remove_user(args, store, engine, formatter),
    }
}

fn add_user(args: UserAddArgs, store: &mut SqliteStore, formatter: &Formatter) -> Result<()> {
    let profile = SafeProfile {
        id: UserId::new(),
        first_name: args.first_name,
        last_name: args.last_name,
        photo_url: args.photo_url,
        age: args.age,
        gender: args.gender,
        about: args.about,
        skills: args.skills,
    };

    store.create_user(&profile)?;
    println!(
        "{}",
        formatter.success(&format!("User added: {}", profile.id))
    );

    Ok(())
}

fn list_users(store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    let ids = store.list_user_ids()?;
    let mut profiles = store.safe_profiles(&ids)?;
    let ordered: Vec<_> = ids.iter().filter_map(|id| profiles.remove(id)).collect();

    println!("{}", formatter.format_profiles(&ordered)?);
    Ok(())
}

fn remove_user(
    args: UserRemoveArgs,
    store: &mut SqliteStore,
    _engine: &Engine,
    formatter: &Formatter,
) -> Result<()> {
    let user = parse_user_id(&args.user)?;

    // Relationships and the identity row go in one transaction,
    // relationships first.
    let removed = store.delete_account(user)?;

    println!(
        "{}",
        formatter.success(&format!(
            "User {} removed ({} relationship(s) purged)",
            user, removed
        ))
    );

    Ok(())
}
