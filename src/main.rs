use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsdigest::config::Config;
use newsdigest::error::Error;

mod commands;

#[derive(Parser)]
#[command(
    name = "newsdigest",
    version,
    about = "Extract structured news items from generated news digests",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Config file (TOML); environment variables are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Output format for items
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract items from a saved document
    Parse {
        /// Input file; reads stdin when omitted
        input: Option<PathBuf>,

        /// Treat the input as a JSON response envelope instead of plain text
        #[arg(long, default_value = "false")]
        envelope: bool,

        /// Only print items of this category
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Maximum items per category
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the extraction report after the items
        #[arg(long, default_value = "false")]
        report: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Fetch live items from the upstream chat API
    Fetch {
        /// Category to fetch; all categories when omitted
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Maximum items per category
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the static fallback catalog
    Catalog {
        /// Category to print; all categories when omitted
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check that the upstream chat API answers
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Command failed");
            eprintln!("Error: {e:#}");
            let code = e
                .chain()
                .find_map(|cause| cause.downcast_ref::<Error>())
                .map_or(1, Error::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    let log_format = cli.log_format.as_deref().unwrap_or(&config.logging.format);
    setup_tracing(log_format, &config.logging.level, cli.verbose)?;

    tracing::debug!(config = ?cli.config, "newsdigest starting");

    match cli.command {
        Commands::Parse {
            input,
            envelope,
            category,
            limit,
            report,
            format,
        } => {
            tracing::info!(
                input = ?input,
                envelope = %envelope,
                category = ?category,
                "Starting parse command"
            );
            commands::parse(
                &config,
                commands::ParseParams {
                    input,
                    envelope,
                    category,
                    limit,
                    report,
                    format,
                },
            )
            .await?;
        }

        Commands::Fetch {
            category,
            limit,
            format,
        } => {
            tracing::info!(category = ?category, limit = ?limit, "Starting fetch command");
            commands::fetch(&config, category, limit, format).await?;
        }

        Commands::Catalog { category, format } => {
            commands::catalog(&config, category, format)?;
        }

        Commands::Health => {
            commands::health(&config).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("newsdigest=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("newsdigest={level},warn")))
    };

    // stdout carries item output; logs go to stderr
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
