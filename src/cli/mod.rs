// hcs-logs - CLI Module
//
// Command-line interface using clap derive macros.
// Subcommands: config (interactive scope maintenance), download.

mod commands;

use clap::{Args, Parser, Subcommand};

use crate::resolve::{DEFAULT_API_BASE, DEFAULT_KEY_LIMIT};
use crate::store::{is_account_hash, ACCOUNT_HASH_LEN};

pub use commands::{execute, report_failure, store_location};

/// hcs-logs: download CDN raw logs with per-account credentials.
#[derive(Parser, Debug)]
#[command(name = "hcs-logs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Credential store file, or the name of the scope to use as default/global config.
    #[arg(long, global = true, env = "HCS_CONFIG")]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long = "log", global = true, default_value = "error")]
    pub log_level: String,

    /// Show secret values in prompts instead of masking them.
    #[arg(long, global = true)]
    pub show_secret: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, edit, delete, or print credential scopes, then save and exit.
    Config,

    /// Resolve credentials for each target account and prepare the download.
    Download(DownloadArgs),
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Account hashes owning the target hosts (comma-separated, repeatable).
    #[arg(long = "account", value_delimiter = ',', required = true, value_parser = parse_account_hash)]
    pub accounts: Vec<String>,

    /// Account hash of the account you log in with.
    #[arg(long, value_parser = parse_account_hash)]
    pub own_account: String,

    /// Auto generate credentials (access_key_id, secret_key) when none are configured.
    #[arg(long)]
    pub auto: bool,

    /// Generate credentials even if the key limit is already reached.
    #[arg(long)]
    pub force_generate: bool,

    /// Maximum number of existing keys before auto generation refuses.
    #[arg(long, default_value_t = DEFAULT_KEY_LIMIT)]
    pub key_limit: usize,

    /// Directory to store log files, or {remoteName}:{prefix} for S3.
    #[arg(short = 'd', long, default_value = "./")]
    pub output: String,

    /// CDN API endpoint used for provisioning.
    #[arg(long, env = "HCS_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,
}

fn parse_account_hash(value: &str) -> Result<String, String> {
    if is_account_hash(value) {
        Ok(value.to_string())
    } else {
        Err(format!("expected {} letters or digits", ACCOUNT_HASH_LEN))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
