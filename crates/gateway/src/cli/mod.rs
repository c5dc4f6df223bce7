pub mod chat;
pub mod config;
pub mod send;

use clap::{Parser, Subcommand};

/// commtrainer: an LLM conversation-practice backend.
#[derive(Debug, Parser)]
#[command(name = "commtrainer", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default when no subcommand is given).
    Serve,
    /// Send a single message through the turn pipeline and print the result.
    Send {
        /// The message to send.
        message: String,
        /// Session key (defaults to the configured default session).
        #[arg(long)]
        session: Option<String>,
        /// Output the full turn result as JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },
    /// Interactive chat against the turn pipeline.
    Chat {
        /// Session key (defaults to "cli:chat").
        #[arg(long, default_value = "cli:chat")]
        session: String,
    },
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path in `CT_CONFIG` (or `config.toml`).
/// A missing file means all defaults. Returns the parsed config and the
/// path that was used.
pub fn load_config() -> anyhow::Result<(ct_domain::config::Config, String)> {
    let config_path = std::env::var("CT_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let config = load_config_from(&config_path)?;
    Ok((config, config_path))
}

pub fn load_config_from(config_path: &str) -> anyhow::Result<ct_domain::config::Config> {
    if !std::path::Path::new(config_path).exists() {
        return Ok(ct_domain::config::Config::default());
    }
    let raw = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
    toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))
}
