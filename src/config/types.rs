//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::defaults::{
    default_access, default_chat_command, default_color_escape, default_config_file,
    default_console_aliases, default_gagged_commands, default_vote_kick_time,
    default_vote_map_time,
};
use super::validation::{ValidationError, validate};
use crate::handlers::TableKind;
use crate::state::{Access, Credential};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Administration configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Core settings.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Login credentials (`[[user]]` blocks).
    #[serde(default, rename = "user")]
    pub users: Vec<Credential>,
    /// Overrides and aliases of the command surface (`[[command]]` blocks).
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandOverride>,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// The `[admin]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Access OR'd into every session's stored access.
    #[serde(default = "default_access")]
    pub default_access: Access,
    /// Kick vote duration in seconds.
    #[serde(default = "default_vote_kick_time")]
    pub vote_kick_time: u64,
    /// Map vote duration in seconds.
    #[serde(default = "default_vote_map_time")]
    pub vote_map_time: u64,
    /// Comma-separated commands a gagged player may not use.
    #[serde(default = "default_gagged_commands")]
    pub gagged_commands: String,
    /// Engine config exec'd on every reload; empty disables it.
    #[serde(default = "default_config_file")]
    pub config_file: String,
    /// Color-code escape character; empty when the engine has none.
    #[serde(default = "default_color_escape")]
    pub color_escape: String,
    /// Engine chat keyword routed into the say-subcommand table.
    #[serde(default = "default_chat_command")]
    pub chat_command: String,
    /// Console commands that dispatch their arguments as the console.
    #[serde(default = "default_console_aliases")]
    pub console_aliases: Vec<String>,
}

impl AdminConfig {
    /// The color escape as a character, `None` for the identity strip.
    pub fn color_escape(&self) -> Option<char> {
        self.color_escape.chars().next()
    }

    pub fn vote_kick_duration(&self) -> Duration {
        Duration::from_secs(self.vote_kick_time)
    }

    pub fn vote_map_duration(&self) -> Duration {
        Duration::from_secs(self.vote_map_time)
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            default_access: default_access(),
            vote_kick_time: default_vote_kick_time(),
            vote_map_time: default_vote_map_time(),
            gagged_commands: default_gagged_commands(),
            config_file: default_config_file(),
            color_escape: default_color_escape(),
            chat_command: default_chat_command(),
            console_aliases: default_console_aliases(),
        }
    }
}

/// A `[[command]]` block.
///
/// Without `handler` it modifies the existing command `name`; with
/// `handler` it defines (or replaces) `name` as an alias of that built-in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandOverride {
    pub name: String,
    /// Built-in handler key, e.g. `admin_kick`.
    #[serde(default)]
    pub handler: Option<String>,
    #[serde(default)]
    pub table: TableKind,
    #[serde(default)]
    pub access: Option<Access>,
    #[serde(default)]
    pub min_args: Option<usize>,
    #[serde(default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
    /// Remove the command from its table.
    #[serde(default)]
    pub disabled: bool,
}
