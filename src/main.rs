//! Command-line reader for Banis from the BaniDB API, with an offline cache.

mod cli;
mod commands;
mod error;

use banis_config::Config;
use clap::Parser;
use exn::ResultExt;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    // `RUST_LOG` wins over `-v`. Logs go to stderr, documents to stdout.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(std::io::stderr)).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let mut out = std::io::stdout();
    match cli.command {
        Command::List => commands::list(&config, &mut out).await,
        Command::Show {
            bani,
            secondary,
            no_translation,
        } => {
            let fetcher = commands::http_fetcher(&config)?;
            commands::show(&config, fetcher, bani, secondary, no_translation, &mut out).await
        },
        Command::Preload { force } => {
            let fetcher = commands::http_fetcher(&config)?;
            commands::preload(&config, fetcher, force, &mut out).await
        },
        Command::Clear => commands::clear(&config, &mut out).await,
    }
}
