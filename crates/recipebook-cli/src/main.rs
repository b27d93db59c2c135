//! Recipebook - a terminal front end for the recipe catalog.
//!
//! Each invocation is one "page load": the stored token is validated, the
//! command runs inside the session scope, and the token stays on disk for
//! the next run.

mod commands;
mod prompt;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use recipebook_core::{ApiClient, AuthProvider, Config, History, SessionManager};

/// Log file name prefix inside `--log-dir`
const LOG_FILE_PREFIX: &str = "recipebook.log";

#[derive(Debug, Parser)]
#[command(name = "recipebook", version, about = "Browse the recipe catalog from the terminal")]
struct Cli {
    /// Base URL of the catalog API (overrides config and RECIPEBOOK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Also write logs to a daily-rolling file in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: Option<String>,
    },
    /// Create an account and log into it
    Register {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show the navigation bar
    Nav,
    /// List recipes
    Recipes {
        /// Server-side search by name
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one recipe with steps, ingredients and tips
    Recipe { id: i64 },
    /// List seasons
    Seasons,
    /// List the recipes of a season
    Season {
        id: i64,
        /// Only show recipes mentioning this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// List celebrations
    Celebrations,
    /// List ethnicities
    Ethnicities,
}

/// Initialize the tracing subscriber for logging.
///
/// Returns the file writer guard when file logging is on; it must live
/// until exit so buffered lines are flushed.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer().with_writer(io::stderr);

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_dir.as_deref());

    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    debug!(api_url = %config.api_url, backend = ?config.token_backend, "Config loaded");

    let api = ApiClient::new(config.api_url.clone())?;
    let store = config.token_store()?;
    let history = Arc::new(History::default());
    let manager = SessionManager::new(Arc::new(api.clone()), store.clone(), history.clone());

    let result = AuthProvider::new(manager)
        .mount(commands::run(cli.command, &api, store.as_ref(), &mut config))
        .await;

    info!(route = %history.current(), "Finished");
    result
}
