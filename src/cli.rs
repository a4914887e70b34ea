//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// textcopy - a short-lived text sharing service
#[derive(Parser, Debug)]
#[command(name = "textcopy")]
#[command(version)]
#[command(about = "Share base64 text through short codes that expire", long_about = None)]
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

    /// Print a sample configuration, or write it to a file
    GenerateConfig {
        /// Output file path
        #[arg(long, short)]
        output: Option<String>,
    },
}
