use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod correlate;
mod detect;
mod ingest;

#[derive(Debug, Parser)]
#[command(name = "feedpulse")]
#[command(about = "Engagement monitoring and viral detection for subscribed content feeds")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run viral detection over the article store and write the alert report.
    Detect {
        /// Where to write the HTML report (default: <reports_dir>/viral_alert.html).
        #[arg(long)]
        html_out: Option<PathBuf>,
    },
    /// Correlate title labels with engagement rate.
    Correlate,
    /// Ingest a JSON batch of freshly fetched engagement metrics.
    Ingest {
        /// Path to the batch file.
        #[arg(long)]
        batch: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = feedpulse_core::load_app_config_from_env()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Detect { html_out } => detect::run_detect(&config, html_out.as_deref()),
        Commands::Correlate => correlate::run_correlate(&config),
        Commands::Ingest { batch } => ingest::run_ingest(&config, &batch),
    }
}
