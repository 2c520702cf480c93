use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Terminal browser for a remote user directory")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive table
    Tui {
        /// Data source URL (overrides ROSTER_ENDPOINT)
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// Fetch once and print a page of records
    List {
        /// Data source URL (overrides ROSTER_ENDPOINT)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Free-text filter applied to the page
        #[arg(short, long, default_value = "")]
        search: String,

        /// Page number to print
        #[arg(short, long, default_value = "1")]
        page: usize,
    },
}
