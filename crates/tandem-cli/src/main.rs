//! Tandem CLI - command-line interface for the Tandem connection graph.

use clap::Parser;
use tandem_cli::{commands, Cli, Command, Config, Formatter};
use tandem_engine::{Engine, EngineConfig};
use tandem_store::SqliteStore;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> tandem_cli::Result<()> {
    let cli = Cli::parse();

    // Load or create config
    let config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });

    // Determine output format and color setting
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    // Open the database
    let db_path = cli.db.unwrap_or_else(|| config.db_path.clone());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut store = SqliteStore::new(&db_path)?;

    let engine = Engine::new(EngineConfig::default());

    match cli.command {
        Command::User(action) => {
            commands::execute_user(action, &mut store, &engine, &formatter)?;
        }
        Command::Send(args) => {
            commands::execute_send(args, &mut store, &engine, &formatter)?;
        }
        Command::Review(args) => {
            commands::execute_review(args, &mut store, &engine, &formatter)?;
        }
        Command::Requests(args) => {
            commands::execute_requests(args, &store, &engine, &formatter)?;
        }
        Command::Connections(args) => {
            commands::execute_connections(args, &store, &engine, &formatter)?;
        }
        Command::Disconnect(args) => {
            commands::execute_disconnect(args, &mut store, &engine, &formatter)?;
        }
        Command::Feed(args) => {
            commands::execute_feed(args, &store, &engine, &formatter)?;
        }
        Command::Search(args) => {
            commands::execute_search(args, &store, &engine, &formatter)?;
        }
    }

    Ok(())
}
