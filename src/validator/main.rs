//! Standalone validator for bot environment files.
//!
//! This tool reads a `.env` file without touching the process
//! environment and checks it with the same rules the bot uses at startup.

use std::collections::BTreeMap;
use std::process::ExitCode;

use clap::Parser;

use mtproxy_admin_bot::config::{Config, ProxyConfig, ProxySchema};

/// Environment file validator.
#[derive(Parser, Debug)]
#[command(name = "check_env")]
#[command(about = "Validates environment files for the MTProxy admin bot")]
#[command(version)]
struct Args {
    /// Path to the .env file to validate.
    #[arg(short, long, default_value = ".env")]
    file: String,

    /// MTProxy deployment layout to validate against.
    #[arg(long, value_enum, default_value_t = ProxySchema::ConfigFile)]
    schema: ProxySchema,

    /// Show which variables are set and which fall back to defaults.
    #[arg(short, long)]
    verbose: bool,

    /// Print the resulting configuration as JSON (token omitted).
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let vars = match read_env_file(&args.file) {
        Ok(vars) => vars,
        Err(e) => {
            eprintln!("✗ Failed to read {}: {e}", args.file);
            return ExitCode::FAILURE;
        }
    };

    validate_env(&vars, args.schema, args.verbose, args.json)
}

fn read_env_file(path: &str) -> dotenvy::Result<BTreeMap<String, String>> {
    dotenvy::from_filename_iter(path)?.collect()
}

fn validate_env(
    vars: &BTreeMap<String, String>,
    schema: ProxySchema,
    verbose: bool,
    json: bool,
) -> ExitCode {
    if verbose {
        for key in known_vars(schema) {
            match vars.get(*key).map(|v| v.trim()) {
                Some(value) if !value.is_empty() => println!("  {key}: set"),
                _ => println!("  {key}: unset"),
            }
        }
        println!();
    }

    let config = match Config::load(vars, schema) {
        Ok(config) => config,
        Err(e) => {
            println!("✗ Validation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if json {
        return match serde_json::to_string_pretty(&config) {
            Ok(out) => {
                println!("{out}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("✗ Failed to serialize configuration: {e}");
                ExitCode::FAILURE
            }
        };
    }

    println!("✓ Configuration is valid");
    println!("  Bot token:       {}", config.redacted_token());
    println!("  Owner:           {}", config.owner_id());
    println!("  Admins:          {}", join_ids(config.allowed_admin_ids()));
    println!("  Database:        {}", config.db_path());
    println!("  Service:         {}", config.mtproxy_service_name());

    match config.proxy() {
        ProxyConfig::ConfigFile { config_path } => {
            println!("  Config file:     {config_path}");
        }
        ProxyConfig::PortTls { port, tls_domain } => {
            println!("  Port:            {port}");
            println!("  TLS domain:      {}", tls_domain.as_deref().unwrap_or("none"));
        }
    }

    ExitCode::SUCCESS
}

/// Variables read for the given schema, in validation order.
fn known_vars(schema: ProxySchema) -> &'static [&'static str] {
    match schema {
        ProxySchema::ConfigFile => &[
            "BOT_TOKEN",
            "OWNER_ID",
            "ADMIN_IDS",
            "DB_PATH",
            "MTPROXY_SERVICE_NAME",
            "MTPROXY_CONFIG_PATH",
        ],
        ProxySchema::PortTls => &[
            "BOT_TOKEN",
            "OWNER_ID",
            "ADMIN_IDS",
            "DB_PATH",
            "MTPROXY_SERVICE_NAME",
            "MTPROXY_PORT",
            "MTPROXY_TLS_DOMAIN",
        ],
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
