//! interp - a terminal client for the interpretation platform.
//!
//! Logs in, inspects active calls and the waiting queue, starts and ends
//! calls, and registers translators. The session token is kept between runs
//! in a credential file (or the OS keychain with `--store keyring`).

mod commands;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use interp_core::{Config, CredentialStore, FileCredentialStore, KeyringCredentialStore};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "interp")]
#[command(version)]
#[command(about = "Interpretation platform client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Origin the client is reached through, e.g. http://10.0.0.5:3000
    #[arg(long, global = true, env = "INTERP_ORIGIN")]
    origin: Option<String>,

    /// API address used when the origin does not decide it
    #[arg(long, global = true, env = "INTERP_API_URL")]
    api_url: Option<String>,

    /// Where the session token is kept
    #[arg(long, global = true, value_enum, default_value_t = StoreKind::File)]
    store: StoreKind,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StoreKind {
    File,
    Keyring,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and keep the session token
    Login {
        #[arg(short, long)]
        email: Option<String>,
    },
    /// End the session and forget the token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Call control
    Calls {
        #[command(subcommand)]
        command: CallsCommand,
    },
    /// Waiting queue
    Queue {
        #[command(subcommand)]
        command: QueueCommand,
    },
    /// Active calls, queue and metrics at a glance
    Status,
    /// Register as a translator
    RegisterTranslator {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// Language to offer (spanish, french, german); repeat for more
        #[arg(short, long = "language")]
        languages: Vec<String>,
        /// Free text, e.g. "$50/hour"
        #[arg(long)]
        hourly_rate: Option<String>,
    },
    /// Confirm an email address with the token from the verification email
    VerifyEmail { token: String },
    /// Send the verification email again
    ResendVerification { email: String },
}

#[derive(Subcommand)]
enum CallsCommand {
    /// List calls in progress
    Active,
    /// Start a call in a room
    Start {
        room: String,
        #[arg(long)]
        customer_name: Option<String>,
        #[arg(long)]
        customer_language: Option<String>,
        #[arg(long)]
        customer_phone: Option<String>,
    },
    /// End a call
    End { call_id: String },
    /// Recently completed calls
    History {
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand)]
enum QueueCommand {
    /// Callers waiting right now
    Show,
    /// Aggregate wait statistics
    Metrics,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn open_store(kind: StoreKind) -> Result<Arc<dyn CredentialStore>> {
    Ok(match kind {
        StoreKind::File => Arc::new(FileCredentialStore::default_location()?),
        StoreKind::Keyring => Arc::new(KeyringCredentialStore::new()?),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    let mut config = Config::load_or_default();
    if cli.origin.is_some() {
        config.origin = cli.origin.clone();
    }
    if cli.api_url.is_some() {
        config.api_url = cli.api_url.clone();
    }
    debug!(?config, "Loaded configuration");

    let store = open_store(cli.store)?;
    let app = commands::App::new(config, store)?;

    let after_login = matches!(cli.command, Commands::Login { .. });
    let result = app.run(cli.command).await;
    app.report_navigation(after_login);
    result
}
