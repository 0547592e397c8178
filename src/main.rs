use std::error::Error;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use terminal_chess::session::session_config::{Args, SessionConfig};
use terminal_chess::session::session_top::{run_stdio_session, SessionOutcome};

fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so the board on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SessionConfig::try_from(Args::parse())?;
    info!(mode = ?config.mode, difficulty = config.difficulty, "starting session");

    match run_stdio_session(config)? {
        SessionOutcome::Finished(status) => info!(?status, "session finished"),
        SessionOutcome::Abandoned => info!("session abandoned"),
    }
    Ok(())
}
