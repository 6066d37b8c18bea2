//! CLI argument definitions for the `hookrun` binary.

use std::path::PathBuf;

use clap::Parser;
use hookrun_infra::config::DEFAULT_TRIGGERS_FILE;

/// Run scripts on authenticated webhook requests.
#[derive(Debug, Parser)]
#[command(name = "hookrun", version, about, long_about = None)]
pub struct Cli {
    /// Path to the YAML trigger file.
    #[arg(env = "TRIGGERS_FILE", default_value = DEFAULT_TRIGGERS_FILE)]
    pub config: PathBuf,

    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Address to bind to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[arg(long, env = "HOOKRUN_JSON_LOGS")]
    pub json_logs: bool,

    /// Export tracing spans via OpenTelemetry (stdout exporter).
    #[arg(long)]
    pub otel: bool,

    /// Suppress all output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
