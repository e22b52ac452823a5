//! auth-guard service
//!
//! ```sh
//! # Run with default config (~/.config/auth-guard/config.toml)
//! auth-guard
//!
//! # Custom config path
//! auth-guard --config /etc/auth-guard/config.toml
//!
//! # Validate config without starting
//! auth-guard --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use auth_guard::config::{default_config_path, AppConfig};
use auth_guard::runtime::{init_tracing, AuthRuntime, RuntimeOptions};
use auth_guard::shared::listen_for_shutdown_signals;

/// Authentication backend with brute-force protection.
#[derive(Parser, Debug)]
#[command(
    name = "auth-guard",
    version,
    about = "Authentication backend with rate limiting and an in-memory account store"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "AUTH_GUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    /// Skip creating the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Public URL  : {}", config.app.public_url);
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Start runtime ──────────────────────────────────────────
    let runtime = AuthRuntime::start(RuntimeOptions {
        config,
        seed_admin: !cli.no_admin,
        ..RuntimeOptions::default()
    })
    .await?;

    tokio::spawn(listen_for_shutdown_signals(runtime.shutdown_signal()));
    info!("Press Ctrl+C to shutdown gracefully.");

    runtime.shutdown_signal().notified().wait().await;
    runtime.shutdown().await;

    Ok(())
}
