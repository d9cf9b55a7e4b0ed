//! MTProxy Admin Bot - Main Entry Point
//!
//! Loads the bot configuration from the environment and reports it.
//! Configuration errors halt startup with a non-zero exit status.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mtproxy_admin_bot::config::{Config, ProxyConfig, ProxySchema};

/// Telegram bot for administering an MTProxy service.
#[derive(Parser, Debug)]
#[command(name = "mtproxy_bot")]
#[command(about = "Administer an MTProxy service from Telegram")]
#[command(version)]
struct Args {
    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// MTProxy deployment layout to configure.
    #[arg(long, value_enum, default_value_t = ProxySchema::ConfigFile)]
    schema: ProxySchema,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args.log_level);

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let config = Config::from_env(args.schema)
        .context("Failed to load bot configuration from environment")?;

    log_summary(&config);

    info!("Configuration loaded");

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Logs the loaded configuration without exposing the token.
fn log_summary(config: &Config) {
    info!("Bot token: {}", config.redacted_token());
    info!(
        "Owner: {} ({} admin(s) allowed)",
        config.owner_id(),
        config.allowed_admin_ids().len()
    );
    debug!("Allowed admins: {:?}", config.allowed_admin_ids());
    info!("Database: {}", config.db_path());
    info!("MTProxy service: {}", config.mtproxy_service_name());

    match config.proxy() {
        ProxyConfig::ConfigFile { config_path } => {
            info!("MTProxy config file: {}", config_path);
        }
        ProxyConfig::PortTls { port, tls_domain } => {
            info!(
                "MTProxy port: {} (TLS domain: {})",
                port,
                tls_domain.as_deref().unwrap_or("none")
            );
        }
    }
}
