//! Newsproof command line: drives a persisted ledger one command at a time.

use clap::Parser;
use newsproof_cli::{run, Command, LedgerConfig};
use newsproof_utils::{init_logging, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "newsproof", about = "Authorization-gated record ledger")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, env = "NEWSPROOF_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for ledger storage.
    #[arg(long, env = "NEWSPROOF_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// LMDB map size in mebibytes.
    #[arg(long, env = "NEWSPROOF_MAP_SIZE_MB", global = true)]
    map_size_mb: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "NEWSPROOF_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "NEWSPROOF_LOG_FORMAT", global = true)]
    log_format: Option<LogFormat>,

    /// Identity the command acts as.
    #[arg(long = "as", env = "NEWSPROOF_IDENTITY", global = true)]
    caller: Option<String>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => LedgerConfig::from_toml_file(path)?,
        None => LedgerConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(map_size_mb) = cli.map_size_mb {
        config.map_size_mb = map_size_mb;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }
    if let Some(log_format) = cli.log_format {
        config.log_format = log_format;
    }

    init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    let output = run(&config, cli.caller.as_deref(), &cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
