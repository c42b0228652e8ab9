//! Environment-driven configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Database connection string placeholders and pool bounds
//! - 1.0.0: Initial Config::from_env

use std::path::PathBuf;

use super::error::BotError;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_MAP_DATA_PATH: &str = "data/PzfansMaps.json";
const DEFAULT_CONNECTION_STRING: &str = "sqlite://data";
const DEFAULT_DATABASE_NAME: &str = "faction_bot";
const DEFAULT_MIN_POOL_SIZE: usize = 1;
const DEFAULT_MAX_POOL_SIZE: usize = 4;

/// Document store connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub connection_string: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: String,
    pub min_pool_size: usize,
    pub max_pool_size: usize,
}

impl DatabaseConfig {
    /// Connection string with `${USERNAME}` and `${PASSWORD}` substituted
    ///
    /// Values are percent-encoded so credentials containing `@` or `:` stay
    /// inside the userinfo part. Placeholders are left untouched unless both
    /// credentials are configured.
    pub fn resolved_connection_string(&self) -> String {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => self
                .connection_string
                .replace("${USERNAME}", &encode_component(username))
                .replace("${PASSWORD}", &encode_component(password)),
            _ => self.connection_string.clone(),
        }
    }
}

fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub faction_id: String,
    pub discord_guild_id: Option<u64>,
    pub log_level: String,
    pub map_data_path: PathBuf,
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| BotError::Config(format!("{key} must be set")))
        };

        let discord_guild_id = get("DISCORD_GUILD_ID")
            .map(|raw| {
                raw.trim().parse::<u64>().map_err(|_| {
                    BotError::Config(format!("DISCORD_GUILD_ID `{raw}` is not a guild id"))
                })
            })
            .transpose()?;

        let min_pool_size = parse_pool_size(
            "DATABASE_CONNECTION_MIN_POOL_SIZE",
            get("DATABASE_CONNECTION_MIN_POOL_SIZE"),
            DEFAULT_MIN_POOL_SIZE,
        )?;
        let max_pool_size = parse_pool_size(
            "DATABASE_CONNECTION_MAX_POOL_SIZE",
            get("DATABASE_CONNECTION_MAX_POOL_SIZE"),
            DEFAULT_MAX_POOL_SIZE,
        )?;
        if min_pool_size > max_pool_size {
            return Err(BotError::Config(format!(
                "minimum pool size {min_pool_size} exceeds maximum pool size {max_pool_size}"
            )));
        }

        Ok(Self {
            discord_token: require("DISCORD_TOKEN")?,
            faction_id: require("FACTION_ID")?,
            discord_guild_id,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            map_data_path: get("MAP_DATA_PATH")
                .unwrap_or_else(|| DEFAULT_MAP_DATA_PATH.to_string())
                .into(),
            database: DatabaseConfig {
                connection_string: get("DATABASE_CONNECTION_STRING")
                    .unwrap_or_else(|| DEFAULT_CONNECTION_STRING.to_string()),
                username: get("DATABASE_USERNAME"),
                password: get("DATABASE_PASSWORD"),
                name: get("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
                min_pool_size,
                max_pool_size,
            },
        })
    }
}

fn parse_pool_size(key: &str, raw: Option<String>, default: usize) -> Result<usize, BotError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(size) if size >= 1 => Ok(size),
        _ => Err(BotError::Config(format!(
            "{key} must be a positive integer, got `{raw}`"
        ))),
    }
}
