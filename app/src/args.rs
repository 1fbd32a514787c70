use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cdcr",
    author,
    version,
    about = "Provision Kafka topics and reconcile a CDC connector on Kafka Connect",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (YAML); every field is optional
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Kafka Connect REST endpoint
    #[arg(long, global = true)]
    pub connect_url: Option<String>,

    /// Container running the Connect worker, used for network diagnostics
    #[arg(long, global = true)]
    pub connect_container: Option<String>,

    #[arg(long, global = true)]
    pub bootstrap_servers: Option<String>,

    /// Readiness probe attempts per dependency
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    /// Seconds between readiness probe attempts
    #[arg(long, global = true)]
    pub interval_secs: Option<u64>,

    /// What to do when the connector already exists
    #[arg(long, global = true, value_enum)]
    pub on_exists: Option<ExistsArg>,

    /// Fail when the new connector does not reach RUNNING
    #[arg(long, global = true)]
    pub require_healthy: bool,

    /// Abort the whole run after this many seconds
    #[arg(long, global = true)]
    pub deadline_secs: Option<u64>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG wins when set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Provision topics, then create or replace the connector
    Up {
        /// Connector configuration (JSON)
        config: PathBuf,
    },
    /// Create or replace the connector without touching topics
    Connector {
        /// Connector configuration (JSON)
        config: PathBuf,
    },
    /// Create the pipeline's topics
    Topics {
        /// Derive change-event topics from this connector configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Show the live status of the configured connector
    Status {
        /// Connector configuration (JSON)
        config: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExistsArg {
    Keep,
    Replace,
    Fail,
    /// Ask on the terminal
    Prompt,
}
