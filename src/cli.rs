use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "orderdesk")]
#[command(author, version, about = "Pre-order backend: sheet-backed order search, admin form and slip verification", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Run {
        /// Override the PORT environment variable
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the grouped orders of one account as JSON
    Search {
        /// Account handle, matched ignoring case and whitespace
        account: String,
    },

    /// Validate the sheet header row against SHEET_HEADERS
    CheckSheet,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
