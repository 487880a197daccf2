//! Environment-driven bot configuration
//!
//! All settings come from the process environment (a `.env` file is loaded
//! by the binary before this runs). Only `DISCORD_TOKEN` and `API_BASE_URL`
//! are mandatory; everything else has a sensible default.

use anyhow::{Context, Result};

/// Default local offset from UTC, in hours. The store's users live at UTC-5
/// and the deployment deliberately has no timezone database and no DST
/// handling: this is a design constant, not an approximation to fix.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -5;

/// How often the reminder scheduler ticks, in seconds.
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 60;

/// Per-request timeout for calls to the remote to-do store, in seconds.
/// A hung upstream call must never stall a scheduler tick indefinitely.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 5;

/// Bot configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token.
    pub discord_token: String,
    /// Base URL of the remote to-do store, without trailing slash.
    pub api_base_url: String,
    /// Channel that receives operational diagnostics (startup notice,
    /// unresolvable guilds/channels during dispatch).
    pub operator_channel_id: u64,
    /// When set, slash commands are registered for this guild only
    /// (instant propagation, used during development).
    pub discord_guild_id: Option<String>,
    /// Default log filter for `env_logger`.
    pub log_level: String,
    /// Fixed local offset from UTC applied by the scheduler clock.
    pub local_utc_offset_hours: i32,
    /// Scheduler tick interval in seconds.
    pub tick_interval_secs: u64,
    /// Timeout applied to every call against the remote store.
    pub api_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let discord_token =
            std::env::var("DISCORD_TOKEN").context("DISCORD_TOKEN must be set")?;
        let api_base_url = std::env::var("API_BASE_URL")
            .context("API_BASE_URL must be set")?
            .trim_end_matches('/')
            .to_string();
        let operator_channel_id = std::env::var("OPERATOR_CHANNEL_ID")
            .context("OPERATOR_CHANNEL_ID must be set")?
            .parse::<u64>()
            .context("OPERATOR_CHANNEL_ID must be a numeric channel id")?;

        Ok(Config {
            discord_token,
            api_base_url,
            operator_channel_id,
            discord_guild_id: std::env::var("DISCORD_GUILD_ID").ok(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            local_utc_offset_hours: parse_env_or(
                "LOCAL_UTC_OFFSET_HOURS",
                DEFAULT_UTC_OFFSET_HOURS,
            ),
            tick_interval_secs: parse_env_or("TICK_INTERVAL_SECS", DEFAULT_TICK_INTERVAL_SECS),
            api_timeout_secs: parse_env_or("API_TIMEOUT_SECS", DEFAULT_API_TIMEOUT_SECS),
        })
    }
}

fn parse_env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
