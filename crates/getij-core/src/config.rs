use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

/// Environment variable names shared with the web front-end config.
pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const ENV_AUTO_REFRESH_MINUTES: &str = "AUTO_REFRESH_MINUTES";
pub const ENV_VIEW: &str = "GETIJ_VIEW";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory (resolved at load time, never persisted)
    #[serde(skip)]
    pub config_dir: PathBuf,

    /// Remote endpoint settings
    #[serde(default)]
    pub supabase: SupabaseConfig,

    /// Rendering and refresh settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Hosted backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    #[serde(default = "default_supabase_url")]
    pub url: String,

    /// Public anon key, sent as both `apikey` and bearer token
    #[serde(default = "default_anon_key")]
    pub anon_key: String,

    /// Name of the RPC returning the latest row
    #[serde(default = "default_rpc_name")]
    pub rpc_name: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_supabase_url() -> String {
    "https://YOUR_PROJECT.supabase.co".to_string()
}

fn default_anon_key() -> String {
    "YOUR_SUPABASE_ANON_KEY".to_string()
}

fn default_rpc_name() -> String {
    "get_latest_sms".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl SupabaseConfig {
    /// Check if credentials are configured (not placeholders)
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
            && !self.anon_key.is_empty()
            && !self.url.contains("YOUR_")
            && !self.anon_key.starts_with("YOUR_")
    }
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: default_supabase_url(),
            anon_key: default_anon_key(),
            rpc_name: default_rpc_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Which front-end rendering to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// `body_processed` shown verbatim
    #[serde(alias = "text")]
    Raw,
    /// Multi-day forecast table per location
    #[default]
    Grid,
    /// Accordion card per location
    #[serde(alias = "accordion")]
    Cards,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Raw => "raw",
            ViewMode::Grid => "grid",
            ViewMode::Cards => "cards",
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "text" => Ok(ViewMode::Raw),
            "grid" => Ok(ViewMode::Grid),
            "cards" | "accordion" => Ok(ViewMode::Cards),
            other => Err(format!(
                "unknown view '{}', expected one of: raw, grid, cards",
                other
            )),
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// View rendered on every refresh
    #[serde(default)]
    pub view: ViewMode,

    /// Refresh interval in minutes (0 disables periodic refresh)
    #[serde(default)]
    pub auto_refresh_minutes: u32,

    /// Expand every day section in the cards view
    #[serde(default)]
    pub expand_all: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            view: ViewMode::default(),
            auto_refresh_minutes: 0,
            expand_all: false,
        }
    }
}

impl DisplayConfig {
    /// Periodic refresh interval, `None` when disabled.
    pub fn refresh_interval(&self) -> Option<std::time::Duration> {
        if self.auto_refresh_minutes == 0 {
            None
        } else {
            Some(std::time::Duration::from_secs(
                u64::from(self.auto_refresh_minutes) * 60,
            ))
        }
    }
}

/// Settings given on the command line; these win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub view: Option<ViewMode>,
    pub refresh_minutes: Option<u32>,
    pub expand_all: bool,
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist.
    ///
    /// Values from the environment override the file.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
        }

        Self::load_from(&config_path, |key| std::env::var(key).ok())
    }

    /// Load configuration from `path`, layering overrides from `env` on top.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_from<F>(path: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let refresh_override = match env(ENV_AUTO_REFRESH_MINUTES) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(minutes) => Some(i64::from(minutes)),
                Err(_) => {
                    tracing::warn!(
                        "Ignoring {}={:?}: not a whole number of minutes",
                        ENV_AUTO_REFRESH_MINUTES,
                        raw
                    );
                    None
                }
            },
            None => None,
        };

        let view_override = match env(ENV_VIEW) {
            Some(raw) => match raw.parse::<ViewMode>() {
                Ok(view) => Some(view.as_str()),
                Err(e) => {
                    tracing::warn!("Ignoring {}: {}", ENV_VIEW, e);
                    None
                }
            },
            None => None,
        };

        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .set_override_option("supabase.url", env(ENV_SUPABASE_URL))?
            .set_override_option("supabase.anon_key", env(ENV_SUPABASE_ANON_KEY))?
            .set_override_option("display.auto_refresh_minutes", refresh_override)?
            .set_override_option("display.view", view_override)?
            .build()
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let mut config: Config = settings
            .try_deserialize()
            .context("Failed to parse config file")?;

        config.config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(config)
    }

    /// Apply command-line flags on top of the file and environment.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(view) = overrides.view {
            self.display.view = view;
        }
        if let Some(minutes) = overrides.refresh_minutes {
            self.display.auto_refresh_minutes = minutes;
        }
        if overrides.expand_all {
            self.display.expand_all = true;
        }
    }

    /// Validate and log warnings, failing on errors.
    pub fn check(&self) -> Result<ValidationResult> {
        let validation = self.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(validation)
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if !self.supabase.is_configured() {
            result.add_error(
                "supabase",
                "Supabase URL and anon key must be set (config file or SUPABASE_URL / SUPABASE_ANON_KEY)",
            );
        } else {
            self.validate_url(&self.supabase.url, "supabase.url", &mut result);
        }

        if self.supabase.rpc_name.trim().is_empty() {
            result.add_error("supabase.rpc_name", "RPC name cannot be empty");
        }

        if self.supabase.timeout_secs == 0 {
            result.add_error("supabase.timeout_secs", "Timeout must be greater than 0");
        }

        if self.display.auto_refresh_minutes == 0 {
            result.add_warning(
                "display.auto_refresh_minutes",
                "Automatic refresh disabled (0 minutes)",
            );
        } else if self.display.auto_refresh_minutes > 1440 {
            result.add_warning(
                "display.auto_refresh_minutes",
                "Refresh interval is more than 24 hours",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("getij");

        Ok(config_dir.join("config.toml"))
    }
}
