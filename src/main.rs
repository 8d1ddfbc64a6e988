//! matchday command-line entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use matchday::app_state::AppState;
use matchday::cli::{self, Cli};
use matchday::config::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Load configuration
    let config = ClientConfig::from_env()?
        .with_overrides(args.api_url.as_deref(), args.session_file.clone())?;

    // Initialize tracing on stderr so stdout stays parseable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::debug!(api_url = %config.api_url, session_file = %config.session_file.display(), "configuration loaded");

    // Build application state
    let state = AppState::from_config(&config)?;

    cli::run(args, &state).await
}
