//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::resolution::ResolutionOrder;

/// goalboard - goal progress dashboard
#[derive(Parser)]
#[command(
    name = "gb",
    about = "Render resolution, running and gym goal progress from CSV files",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Where the CSV sources are read from
#[derive(Debug, Clone, clap::Args)]
pub struct BaseArgs {
    /// Directory, file:// URL or http(s):// URL holding the CSV files
    #[arg(short, long)]
    pub base: Option<String>,
}

/// Options for commands that compute progress from the sources
#[derive(Debug, Clone, clap::Args)]
pub struct SourceArgs {
    #[command(flatten)]
    pub location: BaseArgs,

    /// Yearly running goal in kilometres
    #[arg(short = 't', long)]
    pub target_km: Option<f64>,

    /// Compute progress as of this date (YYYY-MM-DD) instead of today
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<chrono::NaiveDate>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the dashboard page
    Render {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output file, or - for stdout
        #[arg(short, long, default_value = "index.html")]
        output: PathBuf,

        /// Resolution card ordering
        #[arg(long, value_enum)]
        order: Option<ResolutionOrder>,

        /// Exit with an error when resolutions fail to load
        #[arg(long)]
        strict: bool,
    },

    /// Print a progress summary
    Summary {
        #[command(flatten)]
        sources: SourceArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Report accepted and dropped rows for each source
    Check {
        #[command(flatten)]
        location: BaseArgs,
    },
}

/// Output format for the summary command
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => {
                debug!(%s, "OutputFormat::from_str: unknown format");
                Err(format!("Unknown format: {}. Use: text or json", s))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Path of the log file written by the binary
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("goalboard")
        .join("logs")
        .join("goalboard.log")
}
