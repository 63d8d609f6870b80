use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "reel")]
#[command(about = "Movie club watch schedule", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive schedule UI (default)
    Ui,

    /// One-shot catalog search, printed to stdout
    Search {
        /// Query text
        query: String,

        /// Maximum number of results to print
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Print the config file location
    ConfigPath,
}
