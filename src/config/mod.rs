//! Configuration module for the MTProxy admin bot.
//!
//! Handles loading and validation of the startup configuration
//! from environment variables: bot credentials, admin list, storage
//! location, and the MTProxy service settings.

mod settings;
mod source;

pub use settings::{Config, ConfigError, ProxyConfig, ProxySchema};
pub use source::{EnvSource, ProcessEnv};

/// Default location of the bot database.
pub const DEFAULT_DB_PATH: &str = "./data/mtproxy-bot.db";

/// Default systemd unit name for the config-file schema.
pub const DEFAULT_SERVICE_NAME_CONFIG_FILE: &str = "MTProxy.service";

/// Default service name for the port/TLS schema.
pub const DEFAULT_SERVICE_NAME_PORT_TLS: &str = "MTProxy";

/// Default MTProxy config file path.
pub const DEFAULT_MTPROXY_CONFIG_PATH: &str = "/opt/MTProxy/objs/bin/mtconfig.conf";

/// Default MTProxy listening port.
pub const DEFAULT_MTPROXY_PORT: u16 = 443;
