use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gemini-key-rotator",
    version,
    about = "Inspect and exercise rotation across multiple Google Gemini API keys",
    long_about = "Loads a semicolon-separated list of Gemini API keys from the environment, validates it, and reports masked per-key health under the configured rotation strategy."
)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "GEMINI_ROTATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "GEMINI_ROTATOR_JSON_LOGS")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show masked status of every configured key
    Status {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the configured key list without building a rotator
    Validate,

    /// Rotate the current key and print each selection
    Rotate {
        /// Number of rotations to perform
        #[arg(short = 'n', long, default_value_t = 1)]
        times: usize,

        /// Report this error against the current key before every rotation
        #[arg(long, value_name = "MESSAGE")]
        report_error: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// `status` when no subcommand was given
    pub fn resolved_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Status { json: false })
    }
}
