//! Command-line views over the client core.
//!
//! Each subcommand is one short-lived view: it opens a
//! [`crate::view::ViewScope`], drives a service, prints the result and
//! drops the scope.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app_state::AppState;
use commands::account::{LoginArgs, SignUpArgs};
use commands::categories::CategoriesCommand;
use commands::events::EventsCommand;
use output::OutputFormat;

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "matchday")]
#[command(about = "Find a team: browse, create and join sports events")]
#[command(version)]
pub struct Cli {
    /// API base URL (overrides MATCHDAY_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file (overrides MATCHDAY_SESSION_FILE)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    /// Output format
    #[arg(long, short, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Create a new account
    Signup(SignUpArgs),

    /// List all accounts
    Accounts,

    /// Browse and manage events
    Events {
        /// Event subcommand.
        #[command(subcommand)]
        command: EventsCommand,
    },

    /// Browse and manage categories
    Categories {
        /// Category subcommand.
        #[command(subcommand)]
        command: CategoriesCommand,
    },
}

/// Dispatches a parsed command line.
///
/// # Errors
///
/// Returns the alert text of the failed action.
pub async fn run(cli: Cli, state: &AppState) -> anyhow::Result<()> {
    let output = cli.output;
    match cli.command {
        Commands::Login(args) => commands::account::login(state, output, args).await,
        Commands::Logout => commands::account::logout(state),
        Commands::Whoami => commands::account::whoami(state, output).await,
        Commands::Signup(args) => commands::account::sign_up(state, output, args).await,
        Commands::Accounts => commands::account::list_accounts(state, output).await,
        Commands::Events { command } => commands::events::run(command, state, output).await,
        Commands::Categories { command } => {
            commands::categories::run(command, state, output).await
        }
    }
}
