use std::path::PathBuf;

use clap::Parser;

/// Push notifications when commands or code blocks succeed or fail
#[derive(Parser, Debug)]
#[command(name = "pushwrap", author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file path
    #[arg(long, global = true, env = "PUSHWRAPPERS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Run a command and report its outcome
    Run {
        /// Label used in the notification title (defaults to the command line)
        #[arg(short, long)]
        label: Option<String>,
        /// Command and arguments to run
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },
    /// Send a single notification
    Send {
        /// Notification title
        #[arg(short, long, default_value = "pushwrap")]
        title: String,
        /// Notification message
        message: String,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration
    Validate,
}
