use banis_extract::models::DocumentType;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "banis", version, about = "Read Banis from BaniDB, cached for offline use")]
pub struct Cli {
    /// Config file (.toml, .yaml or .json); defaults to the platform config directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}
impl Cli {
    /// Log filter for the verbosity flags, used when `RUST_LOG` isn't set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every Bani by category, marking the ones already cached
    List,
    /// Print a Bani, fetching it first if it isn't cached
    Show {
        /// Catalog key, e.g. `japjiSahib` or `japji-sahib`
        #[arg(value_parser = parse_document_type)]
        bani: DocumentType,
        /// Also show Hindi text (refetches cached Banis that have none)
        #[arg(long)]
        secondary: bool,
        /// Hide the English translation
        #[arg(long)]
        no_translation: bool,
    },
    /// Fetch every Bani into the cache, once per install
    Preload {
        /// Run again even if a preload already happened
        #[arg(long)]
        force: bool,
    },
    /// Delete the cache file
    Clear,
}

fn parse_document_type(value: &str) -> Result<DocumentType, String> {
    value.parse().map_err(|_| format!("unknown Bani '{value}', see `banis list`"))
}
