//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tandem CLI - Manage the Tandem connection graph.
#[derive(Debug, Parser)]
#[command(name = "tandem")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Database path (overrides the configured path)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(value: CliFormat) -> Self {
        match value {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage identity rows (profiles only, no credentials)
    #[command(subcommand)]
    User(UserAction),

    /// Send a connection request (interested) or pass on a user (ignored)
    Send(SendArgs),

    /// Review a received request (accept or reject)
    Review(ReviewArgs),

    /// List pending requests, received or sent
    Requests(RequestsArgs),

    /// List active connections
    Connections(ConnectionsArgs),

    /// Remove an accepted connection
    Disconnect(DisconnectArgs),

    /// Show the discovery feed
    Feed(FeedArgs),

    /// Search discoverable users
    Search(SearchArgs),
}

/// User management subcommands.
#[derive(Debug, Subcommand)]
pub enum UserAction {
    /// Add a user profile
    Add(UserAddArgs),

    /// List all user profiles
    List,

    /// Delete a user and cascade-delete their relationships
    Remove(UserRemoveArgs),
}

/// Arguments for adding a user.
#[derive(Debug, Parser)]
pub struct UserAddArgs {
    /// Given name
    pub first_name: String,

    /// Family name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Age
    #[arg(long)]
    pub age: Option<u8>,

    /// Gender
    #[arg(long)]
    pub gender: Option<String>,

    /// Short bio
    #[arg(long)]
    pub about: Option<String>,

    /// Avatar URL
    #[arg(long)]
    pub photo_url: Option<String>,

    /// Comma-separated skill tags
    #[arg(long, value_delimiter = ',')]
    pub skills: Vec<String>,
}

/// Arguments for removing a user.
#[derive(Debug, Parser)]
pub struct UserRemoveArgs {
    /// Id of the user to remove
    pub user: String,
}

/// Arguments for the send command.
#[derive(Debug, Parser)]
pub struct SendArgs {
    /// Acting user's id
    pub actor: String,

    /// Initial status: interested or ignored
    pub status: String,

    /// Target user's id
    pub target: String,
}

/// Arguments for the review command.
#[derive(Debug, Parser)]
pub struct ReviewArgs {
    /// Acting user's id (must be the request's recipient)
    pub actor: String,

    /// Decision: accepted or rejected
    pub decision: String,

    /// Id of the request to review
    pub request_id: String,
}

/// Direction of the pending requests to list.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum RequestDirection {
    /// Requests sent to the actor
    Received,
    /// Requests sent by the actor
    Sent,
}

/// Arguments for the requests command.
#[derive(Debug, Parser)]
pub struct RequestsArgs {
    /// Which direction to list
    #[arg(value_enum)]
    pub direction: RequestDirection,

    /// Acting user's id
    pub actor: String,
}

/// Arguments for the connections command.
#[derive(Debug, Parser)]
pub struct ConnectionsArgs {
    /// Acting user's id
    pub actor: String,
}

/// Arguments for the disconnect command.
#[derive(Debug, Parser)]
pub struct DisconnectArgs {
    /// Acting user's id
    pub actor: String,

    /// The other party's id
    pub other: String,
}

/// Arguments for the feed command.
#[derive(Debug, Parser)]
pub struct FeedArgs {
    /// Acting user's id
    pub actor: String,

    /// 1-indexed page
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Page size (clamped to the engine's maximum)
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Acting user's id
    pub actor: String,

    /// Query text (case-insensitive substring)
    pub query: String,
}
