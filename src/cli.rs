use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cardforged")]
#[command(author, version, about = "Card art downloader")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download every card matching a card API search
    Query {
        /// Search terms, comma separated (e.g. "set:mh2, is:borderless")
        #[arg(required = true)]
        terms: String,

        /// Print the matching cards instead of downloading them
        #[arg(long)]
        list_only: bool,

        /// Do not echo failed downloads to the console
        #[arg(short, long)]
        quiet: bool,
    },

    /// Download the cards of a text list ("Name" or "Name (SET) number" per line)
    List {
        /// List file
        #[arg(required = true)]
        file: PathBuf,

        /// Do not echo failed downloads to the console
        #[arg(short, long)]
        quiet: bool,
    },

    /// Download the cards and tokens of a deck
    Deck {
        /// Deck id
        #[arg(required = true)]
        id: String,

        /// Print the deck list instead of downloading it
        #[arg(long)]
        list_only: bool,

        /// Do not echo failed downloads to the console
        #[arg(short, long)]
        quiet: bool,
    },

    /// Download card records from a JSON file
    Records {
        /// JSON file with a record, an array of records, or a search result page
        #[arg(required = true)]
        file: PathBuf,

        /// Do not echo failed downloads to the console
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show the rendering variant of card records without downloading
    Classify {
        /// JSON file with card records
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the records not yet present in a render archive
    Filter {
        /// Zip archive of finished renders
        #[arg(short, long, required = true)]
        archive: PathBuf,

        /// JSON file with card records
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses --config or defaults if not specified)
        #[arg(value_name = "CONFIG")]
        file: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
