use std::path::PathBuf;

use clap::Parser;

/// EasyAdmin: call host operations from an embedded frame.
///
/// Runs a host window with the built-in operations and an embedded client
/// frame in one process, then issues a single call through the channel.
#[derive(Parser, Debug)]
#[command(name = "easyadmin", version, about)]
pub struct Args {
    /// Operation to call.
    #[arg(long, default_value = "getCurrentUser")]
    pub call: String,

    /// Positional arguments as a JSON array, e.g. '[{"name": "X"}]'.
    #[arg(long)]
    pub args: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Answer immediately instead of simulating backend latency.
    #[arg(long)]
    pub no_latency: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// Decode `--args`. Absent means no arguments.
    pub fn call_args(&self) -> Result<Vec<serde_json::Value>, String> {
        match self.args.as_deref() {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(raw)
                .map_err(|e| format!("--args must be a JSON array: {e}")),
        }
    }
}
