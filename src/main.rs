//! qadmind - QAdmin simulation host
//!
//! Reads a scripted event stream on stdin and prints every line the admin
//! core sends to players, the console or the kick sink.

use parking_lot::Mutex;
use qadmin::console::{self, ConsoleHost};
use qadmin::{Admin, Config, ConfigError};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Interval between clock ticks delivered to the core.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("QADMIN_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "qadmin.toml".to_string());

    let admin = match Admin::from_path(&config_path, ConsoleHost::new()) {
        Ok(admin) => admin,
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %config_path, "Config file not found, using defaults");
            Admin::new(Config::default(), ConsoleHost::new())
        }
        Err(e) => {
            tracing::error!(path = %config_path, error = %e, "Failed to load config");
            return Err(e.into());
        }
    };

    info!(
        users = admin.state().users.len(),
        commands = admin.registry().direct().len(),
        "Starting qadmind"
    );

    let admin = Arc::new(Mutex::new(admin));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();

    let printer = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            println!("{line}");
        }
    });

    let stdin = BufReader::new(tokio::io::stdin());
    console::run(admin, stdin, TICK_INTERVAL, tx).await?;

    printer.await?;
    info!("Input closed, shutting down");
    Ok(())
}
