use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use countdown_core::{
    source_for_location, AnchoredTimeSource, App, EngineDeps, StatusReport, SystemTimeSource,
    TimeSource,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod display;

use config::load_settings;
use display::TerminalDisplay;

#[derive(Parser, Debug)]
#[command(about = "Valentine week countdown in India Standard Time")]
struct Cli {
    /// Settings file; `countdown.toml` is used when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Content directory or http(s) base URL.
    #[arg(long)]
    content: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    /// Pretend the current instant is this RFC 3339 timestamp.
    #[arg(long)]
    now: Option<DateTime<Utc>>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Default)]
enum Command {
    /// Show the page until there is nothing left to show.
    #[default]
    Run,
    /// Print what the page would show right now as JSON.
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(content) = cli.content {
        settings.content_base = content;
    }
    if let Some(year) = cli.year {
        settings.year = Some(year);
    }

    let clock: Arc<dyn TimeSource> = match cli.now {
        Some(anchor) => {
            info!(%anchor, "simulating clock");
            Arc::new(AnchoredTimeSource::new(anchor))
        }
        None => Arc::new(SystemTimeSource),
    };
    let config = settings.engine_config(clock.now())?;

    match cli.command.unwrap_or_default() {
        Command::Status => {
            let report = StatusReport::at(clock.now(), config.window, &config.themes);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Run => {
            let content = source_for_location(&settings.content_base)
                .with_context(|| format!("invalid content base '{}'", settings.content_base))?;
            info!(
                content_base = %settings.content_base,
                start = %config.window.start,
                end = %config.window.end,
                "starting countdown"
            );
            let app = App::new(
                config,
                EngineDeps {
                    clock,
                    content: Arc::from(content),
                    display: Arc::new(TerminalDisplay::default()),
                },
            );
            app.run().await;
        }
    }

    Ok(())
}
