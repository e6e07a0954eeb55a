//! CLI command implementations

use anyhow::{Context, Result};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use crate::analysis::{AnalysisPipeline, CallAnalyzer};
use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::llm::build_provider;
use crate::storage::LogStore;
use crate::web::AppState;

/// Open the analysis log configured in `settings`
fn open_store(settings: &Settings) -> Result<Arc<LogStore>> {
    let path = settings.log_path();
    let store = LogStore::open(&path)
        .with_context(|| format!("Failed to open analysis log: {}", path.display()))?;
    Ok(Arc::new(store))
}

fn build_pipeline(settings: &Settings) -> Result<AnalysisPipeline> {
    let provider = build_provider(settings)?;
    let store = open_store(settings)?;
    Ok(AnalysisPipeline::new(CallAnalyzer::new(provider), store))
}

/// Run the web interface
pub async fn serve(settings: &Settings, bind: Option<String>, port: Option<u16>) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(bind) = bind {
        settings.server.bind = bind;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    let pipeline = build_pipeline(&settings)?;
    tracing::info!("Analysis log: {}", pipeline.store().path().display());

    let state = Arc::new(AppState {
        pipeline,
        download_name: settings.general.log_file.clone(),
    });

    crate::web::serve(&settings.server_addr(), state).await
}

/// Analyze a single transcript from a file or stdin
pub async fn analyze_transcript(settings: &Settings, file: Option<PathBuf>) -> Result<()> {
    let transcript = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read transcript: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read transcript from stdin")?;
            buf
        }
    };

    let pipeline = build_pipeline(settings)?;
    let record = pipeline.submit(&transcript).await?;

    println!("Summary:   {}", record.summary);
    println!("Sentiment: {}", record.sentiment);
    println!("Timestamp: {}", record.timestamp_string());

    Ok(())
}

/// Print the analysis log
pub fn show_log(settings: &Settings, limit: Option<usize>, json: bool) -> Result<()> {
    let store = open_store(settings)?;
    let mut records = store.read_all()?;

    if let Some(limit) = limit {
        let skip = records.len().saturating_sub(limit);
        records.drain(..skip);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No analyses found");
        return Ok(());
    }

    println!(
        "{:<20} {:<10} {:<40} {}",
        "Timestamp", "Sentiment", "Transcript", "Summary"
    );
    println!("{}", "-".repeat(100));

    for record in records {
        println!(
            "{:<20} {:<10} {:<40} {}",
            record.timestamp_string(),
            record.sentiment.as_str(),
            truncate(&record.transcript, 38),
            record.summary
        );
    }

    Ok(())
}

/// Handle config commands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = settings.clone();
            if !shown.llm.api_key.is_empty() {
                shown.llm.api_key = "********".to_string();
            }
            let toml = toml::to_string_pretty(&shown)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
