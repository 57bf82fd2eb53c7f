use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use quiz_core::{GameController, HttpQuizService};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod session;
mod terminal;

use config::load_settings;
use terminal::{format_point, TerminalMap, TerminalView};

#[derive(Parser, Debug)]
#[command(name = "capital-quiz", about = "Name the capital of each country the quiz service asks about")]
struct Args {
    /// Base URL of the question/answer service.
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file; defaults to ./quiz.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    no_color: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if args.no_color {
        settings.color = false;
    }
    let server_url = settings.server_url()?;
    info!(%server_url, "starting capital quiz");

    let mut controller = GameController::new(
        HttpQuizService::new(server_url),
        TerminalView::new(io::stdout(), settings.color),
        TerminalMap::new(io::stdout(), settings.color),
    )
    .with_tiles(settings.tiles());

    let summary = session::run(&mut controller, BufReader::new(tokio::io::stdin()))
        .await
        .context("failed to read answers from stdin")?;

    let visited: Vec<String> = controller
        .map()
        .markers()
        .iter()
        .map(|marker| format!("{} ({})", marker.label, format_point(marker.at)))
        .collect();
    if !visited.is_empty() {
        println!("Capitals visited: {}", visited.join(", "));
    }
    println!(
        "Final score: {} of {} countries{}",
        summary.score,
        summary.asked,
        if summary.finished { "" } else { " (quiz not finished)" }
    );
    Ok(())
}
