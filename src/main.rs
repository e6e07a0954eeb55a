//! callscribe - Call transcript analysis service
//!
//! Entry point for the callscribe CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use callscribe::cli::{Cli, Commands};
use callscribe::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            callscribe::cli::completions::print(shell);
        }
        command => {
            // Pick up GROQ_API_KEY and friends from a local .env file.
            if let Ok(path) = dotenvy::dotenv() {
                tracing::debug!("Loaded environment from {}", path.display());
            }

            // Load configuration only for runtime commands.
            let settings = Settings::load()?;

            match command {
                Commands::Serve { bind, port } => {
                    callscribe::cli::commands::serve(&settings, bind, port).await?;
                }
                Commands::Analyze { file } => {
                    callscribe::cli::commands::analyze_transcript(&settings, file).await?;
                }
                Commands::Log { limit, json } => {
                    callscribe::cli::commands::show_log(&settings, limit, json)?;
                }
                Commands::Config(config_cmd) => {
                    callscribe::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
