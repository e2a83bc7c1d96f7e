use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dashboard", about = "Catalog admin dashboard for the GPG and Valesco backends")]
pub struct Cli {
    /// Path to config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in to whichever backend accepts the credentials
    Login {
        #[arg(long, visible_alias = "login")]
        username: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Drop the session and all cached data
    Logout,

    /// Show the current session
    Whoami,

    /// Drop cached catalog data but stay logged in
    ClearCache,

    /// GET a path on the session's backend and print the JSON response
    Get {
        #[arg(long)]
        path: String,
    },
}
