//! Configuration for the session engine
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/pagespy/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Page URL recorded as every event's source location
    pub page_url: String,

    /// Print the snapshot JSON after the end-of-session summary
    pub export_snapshot: bool,

    /// Timing knobs for the animated components
    pub timing: TimingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_url: "https://example.com/".to_string(),
            export_snapshot: true,
            timing: TimingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Timing Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Periods for the timer-driven components, in milliseconds
#[derive(Debug, Clone)]
pub struct TimingConfig {
    /// Carousel autoplay period
    pub carousel_interval_ms: u64,
    /// How long a toast stays on screen
    pub toast_duration_ms: u64,
    /// Counter tween tick period
    pub counter_tick_ms: u64,
    /// Number of increments a counter takes to reach its target
    pub counter_steps: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            carousel_interval_ms: 8_000,
            toast_duration_ms: 4_000,
            counter_tick_ms: 30,
            counter_steps: 50,
        }
    }
}

impl TimingConfig {
    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel_interval_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn counter_tick(&self) -> Duration {
        Duration::from_millis(self.counter_tick_ms)
    }

    /// Create from file config with defaults
    pub fn from_file(file: Option<FileTiming>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            carousel_interval_ms: file
                .carousel_interval_ms
                .unwrap_or(defaults.carousel_interval_ms),
            toast_duration_ms: file.toast_duration_ms.unwrap_or(defaults.toast_duration_ms),
            counter_tick_ms: file.counter_tick_ms.unwrap_or(defaults.counter_tick_ms),
            counter_steps: file.counter_steps.unwrap_or(defaults.counter_steps),
        }
    }
}

/// Timing settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileTiming {
    pub carousel_interval_ms: Option<u64>,
    pub toast_duration_ms: Option<u64>,
    pub counter_tick_ms: Option<u64>,
    pub counter_steps: Option<u32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Log Rotation
// ─────────────────────────────────────────────────────────────────────────────

/// Log file rotation strategy
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogRotation {
    /// Rotate log files hourly
    Hourly,
    /// Rotate log files daily (default)
    #[default]
    Daily,
    /// Never rotate - single log file
    Never,
}

impl LogRotation {
    /// Parse rotation string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "daily" => Self::Daily,
            "never" => Self::Never,
            _ => Self::Daily, // Default to daily for unknown values
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Enable file logging (in addition to stdout)
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Log file rotation strategy
    pub file_rotation: LogRotation,
    /// Prefix for log file names (e.g., "pagespy" -> "pagespy.2024-01-15.log")
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false, // Opt-in feature
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "pagespy".to_string(),
        }
    }
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation: file
                .file_rotation
                .map(|s| LogRotation::from_str(&s))
                .unwrap_or(defaults.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub page_url: Option<String>,
    pub export_snapshot: Option<bool>,

    /// Optional [timing] section
    pub timing: Option<FileTiming>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/pagespy/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("pagespy").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Use Config::default().to_toml() as single source of truth
        let template = Self::default().to_toml();

        // Write config (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be parsed is fatal: fail fast
    /// with a clear error instead of silently falling back to defaults while
    /// the user debugs the wrong thing.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration    ║");
                    eprintln!("╚══════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, delete the file and restart pagespy.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Config file doesn't exist - use defaults
                FileConfig::default()
            }
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file   ║");
                eprintln!("╚══════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // Page URL: env > file > default
        let page_url = std::env::var("PAGESPY_PAGE_URL")
            .ok()
            .or(file.page_url)
            .unwrap_or_else(|| "https://example.com/".to_string());

        // Snapshot export: env > file > default
        let export_snapshot = std::env::var("PAGESPY_EXPORT_SNAPSHOT")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .ok()
            .or(file.export_snapshot)
            .unwrap_or(true);

        // Timing: file > defaults, with an env override for the carousel
        let mut timing = TimingConfig::from_file(file.timing);
        if let Some(interval) = std::env::var("PAGESPY_CAROUSEL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            timing.carousel_interval_ms = interval;
        }

        // Logging: env level override > file > defaults
        let mut logging = LoggingConfig::from_file(file.logging);
        if let Ok(level) = std::env::var("PAGESPY_LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            page_url,
            export_snapshot,
            timing,
            logging,
        }
    }

    /// Serialize to the commented TOML template written on first run
    pub fn to_toml(&self) -> String {
        format!(
            r#"# pagespy configuration

# Page URL recorded as every event's source location
page_url = "{page_url}"

# Print the snapshot JSON after the end-of-session summary
export_snapshot = {export_snapshot}

# Timing knobs for the animated components (milliseconds)
[timing]
carousel_interval_ms = {carousel_interval}
toast_duration_ms = {toast_duration}
counter_tick_ms = {counter_tick}
counter_steps = {counter_steps}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to stdout)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            page_url = self.page_url,
            export_snapshot = self.export_snapshot,
            carousel_interval = self.timing.carousel_interval_ms,
            toast_duration = self.timing.toast_duration_ms,
            counter_tick = self.timing.counter_tick_ms,
            counter_steps = self.timing.counter_steps,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
