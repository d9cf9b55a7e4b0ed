//! Startup configuration loaded from environment variables.

use std::fmt;

use serde::Serialize;

use super::source::{EnvSource, ProcessEnv};
use super::{
    DEFAULT_DB_PATH, DEFAULT_MTPROXY_CONFIG_PATH, DEFAULT_MTPROXY_PORT,
    DEFAULT_SERVICE_NAME_CONFIG_FILE, DEFAULT_SERVICE_NAME_PORT_TLS,
};

/// Which MTProxy deployment layout the bot is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ProxySchema {
    /// MTProxy is driven by a config file on disk.
    #[default]
    ConfigFile,

    /// MTProxy is configured by listening port and optional fake-TLS domain.
    PortTls,
}

impl ProxySchema {
    /// Service name used when `MTPROXY_SERVICE_NAME` is not set.
    #[must_use]
    pub const fn default_service_name(self) -> &'static str {
        match self {
            Self::ConfigFile => DEFAULT_SERVICE_NAME_CONFIG_FILE,
            Self::PortTls => DEFAULT_SERVICE_NAME_PORT_TLS,
        }
    }
}

/// MTProxy settings, shaped by the selected [`ProxySchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "schema", rename_all = "snake_case")]
pub enum ProxyConfig {
    /// MTProxy reads its settings from a config file.
    ConfigFile {
        /// Path to the MTProxy config file.
        config_path: String,
    },

    /// MTProxy listens on a port with an optional fake-TLS domain.
    PortTls {
        /// Port MTProxy listens on.
        port: u16,

        /// Fake-TLS domain, `None` when not configured.
        tls_domain: Option<String>,
    },
}

impl ProxyConfig {
    /// Returns the schema this configuration was loaded with.
    #[must_use]
    pub const fn schema(&self) -> ProxySchema {
        match self {
            Self::ConfigFile { .. } => ProxySchema::ConfigFile,
            Self::PortTls { .. } => ProxySchema::PortTls,
        }
    }
}

/// Immutable bot configuration.
///
/// Built once at startup by [`Config::load`]. The owner is always part of
/// [`Config::allowed_admin_ids`].
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    #[serde(skip)]
    bot_token: String,
    owner_id: u64,
    allowed_admin_ids: Vec<u64>,
    db_path: String,
    mtproxy_service_name: String,
    proxy: ProxyConfig,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env(schema: ProxySchema) -> Result<Self, ConfigError> {
        Self::load(&ProcessEnv, schema)
    }

    /// Loads configuration from an arbitrary environment source.
    ///
    /// Variables are checked in a fixed order and the first failure is
    /// returned. Optional values that are empty after trimming fall back
    /// to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `BOT_TOKEN` is unset, `OWNER_ID` is not a
    /// non-negative integer, (for [`ProxySchema::PortTls`]) `MTPROXY_PORT`
    /// is not a valid port number, or a variable holds non-unicode data.
    pub fn load<E: EnvSource + ?Sized>(env: &E, schema: ProxySchema) -> Result<Self, ConfigError> {
        let bot_token = trimmed(env, "BOT_TOKEN")?;
        if bot_token.is_empty() {
            return Err(ConfigError::MissingBotToken);
        }

        let owner_id = trimmed(env, "OWNER_ID")?;
        let owner_id: u64 = if is_digits(&owner_id) {
            owner_id.parse().map_err(|_| ConfigError::InvalidOwnerId)?
        } else {
            return Err(ConfigError::InvalidOwnerId);
        };

        let allowed_admin_ids = parse_admin_ids(&trimmed(env, "ADMIN_IDS")?, owner_id);

        let db_path = trimmed_or(env, "DB_PATH", DEFAULT_DB_PATH)?;
        let mtproxy_service_name =
            trimmed_or(env, "MTPROXY_SERVICE_NAME", schema.default_service_name())?;

        let proxy = match schema {
            ProxySchema::ConfigFile => ProxyConfig::ConfigFile {
                config_path: trimmed_or(env, "MTPROXY_CONFIG_PATH", DEFAULT_MTPROXY_CONFIG_PATH)?,
            },
            ProxySchema::PortTls => {
                let port = trimmed(env, "MTPROXY_PORT")?;
                let port = if port.is_empty() {
                    DEFAULT_MTPROXY_PORT
                } else if is_digits(&port) {
                    port.parse()
                        .map_err(|_| ConfigError::PortOutOfRange(port.clone()))?
                } else {
                    return Err(ConfigError::InvalidPort);
                };

                let tls_domain = Some(trimmed(env, "MTPROXY_TLS_DOMAIN")?).filter(|d| !d.is_empty());

                ProxyConfig::PortTls { port, tls_domain }
            }
        };

        Ok(Self {
            bot_token,
            owner_id,
            allowed_admin_ids,
            db_path,
            mtproxy_service_name,
            proxy,
        })
    }

    /// Telegram bot API token.
    #[must_use]
    pub fn bot_token(&self) -> &str {
        &self.bot_token
    }

    /// Bot token with the secret part masked, safe for logs.
    #[must_use]
    pub fn redacted_token(&self) -> String {
        match self.bot_token.split_once(':') {
            Some((bot_id, _)) => format!("{bot_id}:***"),
            None => "***".to_owned(),
        }
    }

    /// Telegram id of the bot owner.
    #[must_use]
    pub const fn owner_id(&self) -> u64 {
        self.owner_id
    }

    /// Ids allowed to control the bot, owner included.
    #[must_use]
    pub fn allowed_admin_ids(&self) -> &[u64] {
        &self.allowed_admin_ids
    }

    /// Checks if `user_id` may control the bot.
    #[must_use]
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.allowed_admin_ids.contains(&user_id)
    }

    /// Checks if `user_id` is the bot owner.
    #[must_use]
    pub const fn is_owner(&self, user_id: u64) -> bool {
        self.owner_id == user_id
    }

    /// Path to the bot database.
    #[must_use]
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Name of the MTProxy service to manage.
    #[must_use]
    pub fn mtproxy_service_name(&self) -> &str {
        &self.mtproxy_service_name
    }

    /// Schema-specific MTProxy settings.
    #[must_use]
    pub const fn proxy(&self) -> &ProxyConfig {
        &self.proxy
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &self.redacted_token())
            .field("owner_id", &self.owner_id)
            .field("allowed_admin_ids", &self.allowed_admin_ids)
            .field("db_path", &self.db_path)
            .field("mtproxy_service_name", &self.mtproxy_service_name)
            .field("proxy", &self.proxy)
            .finish()
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("BOT_TOKEN is not set")]
    MissingBotToken,

    #[error("OWNER_ID is not a valid integer")]
    InvalidOwnerId,

    #[error("MTPROXY_PORT must be an integer")]
    InvalidPort,

    #[error("MTPROXY_PORT is out of range: {0}")]
    PortOutOfRange(String),

    #[error("{0} is not valid unicode")]
    NotUnicode(String),
}

/// Parses the comma-separated admin list and appends the owner if missing.
///
/// Entries that are not plain non-negative integers are skipped.
fn parse_admin_ids(raw: &str, owner_id: u64) -> Vec<u64> {
    let mut ids: Vec<u64> = raw
        .split(',')
        .map(str::trim)
        .filter(|part| is_digits(part))
        .filter_map(|part| part.parse().ok())
        .collect();

    if !ids.contains(&owner_id) {
        ids.push(owner_id);
    }

    ids
}

fn trimmed<E: EnvSource + ?Sized>(env: &E, key: &str) -> Result<String, ConfigError> {
    Ok(env
        .get(key)?
        .map(|value| value.trim().to_owned())
        .unwrap_or_default())
}

fn trimmed_or<E: EnvSource + ?Sized>(
    env: &E,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    let value = trimmed(env, key)?;
    Ok(if value.is_empty() {
        default.to_owned()
    } else {
        value
    })
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
