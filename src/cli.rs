//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// aka - short-route bookmarks for URLs and local files
#[derive(Parser, Debug)]
#[command(name = "aka")]
#[command(version)]
#[command(about = "Type a short route, land on the URL or file it points to", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Reconcile the route index with the stored bookmarks
    Repair,

    /// Print a sample configuration file
    Config {
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<String>,
    },
}
