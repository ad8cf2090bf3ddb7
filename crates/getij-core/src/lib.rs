pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{Config, DisplayConfig, Overrides, SupabaseConfig, ValidationResult, ViewMode};
pub use error::{AppError, FeedError, NetworkError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Logs go to stderr; stdout carries the rendered forecast
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!("Getij core initialized");
    Ok(())
}
