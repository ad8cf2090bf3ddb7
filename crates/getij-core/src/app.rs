use std::sync::Arc;

use crate::Config;

/// Explicit application context, built once in `main` and handed to the
/// fetch and render routines.
#[derive(Debug, Clone)]
pub struct App {
    config: Arc<Config>,
}

impl App {
    /// Create an application instance from an already loaded config
    pub fn with_config(config: Config) -> Self {
        tracing::info!(
            view = %config.display.view,
            refresh_minutes = config.display.auto_refresh_minutes,
            "Application context created"
        );
        Self {
            config: Arc::new(config),
        }
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn shutdown(&self) {
        tracing::info!("Shutting down application");
    }
}
