use config::{Config, ConfigError, File};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_STUDENT_SERVICE_URL: &str = "http://localhost:9002";
pub const DEFAULT_COLLEGE_SERVICE_URL: &str = "http://localhost:9001";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_NOTIFICATION_MS: u64 = 3_000;

/// Get version information
pub fn get_version_info() -> String {
    let build_timestamp = option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown");
    let build_date = option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown");
    let rustc_semver = option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown");
    let cargo_target_triple = option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown");

    format!(
        "student-dashboard version {}\n\
         Built: {} ({})\n\
         Rust: {}\n\
         Target: {}",
        VERSION, build_date, build_timestamp, rustc_semver, cargo_target_triple
    )
}

/// Base URLs of the two record services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    #[serde(default = "default_student_url")]
    pub student_service_url: String,
    #[serde(default = "default_college_url")]
    pub college_service_url: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            student_service_url: default_student_url(),
            college_service_url: default_college_url(),
        }
    }
}

/// Settings handed to the request gateway at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            headers: HashMap::new(),
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// How long a banner stays visible. Zero keeps it until dismissed.
    #[serde(default = "default_notification_ms")]
    pub duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_notification_ms(),
        }
    }
}

impl NotificationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub append_to_file: bool,
    #[serde(default)]
    pub disable_console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            color: true,
            output_path: None,
            append_to_file: false,
            disable_console: false,
        }
    }
}

fn default_student_url() -> String {
    DEFAULT_STUDENT_SERVICE_URL.to_string()
}
fn default_college_url() -> String {
    DEFAULT_COLLEGE_SERVICE_URL.to_string()
}
fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}
fn default_notification_ms() -> u64 {
    DEFAULT_NOTIFICATION_MS
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_log_format() -> String {
    "compact".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Parsed service base URLs, checked when the configuration is validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceEndpoints {
    pub student: Url,
    pub college: Url,
}

impl ServiceEndpoints {
    pub fn new(student: &str, college: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            student: parse_base_url("services.student_service_url", student)?,
            college: parse_base_url("services.college_service_url", college)?,
        })
    }
}

fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::Message(format!("{} is not a valid URL ({}): {}", key, raw, e)))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Message(format!(
            "{} must be an http(s) base URL, got {}",
            key, raw
        )));
    }
    Ok(url)
}

impl AppConfig {
    /// Load configuration from the default locations, an optional explicit
    /// file and the environment. Not validated: callers apply their own
    /// overrides first, then call [`AppConfig::validate`].
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut config_builder = Config::builder()
            // Start with default values
            .set_default("services.student_service_url", DEFAULT_STUDENT_SERVICE_URL)?
            .set_default("services.college_service_url", DEFAULT_COLLEGE_SERVICE_URL)?
            .set_default("gateway.timeout_ms", DEFAULT_TIMEOUT_MS)?
            .set_default("notifications.duration_ms", DEFAULT_NOTIFICATION_MS)?
            .set_default("logging.level", "warn")?
            .set_default("logging.format", "compact")?
            .set_default("logging.color", true)?
            // Load config files in order of precedence
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("/etc/student-dashboard/config").required(false));

        if let Some(path) = config_file {
            config_builder = config_builder.add_source(File::with_name(path).required(true));
        }

        let config = config_builder
            // Environment variables
            .add_source(
                config::Environment::with_prefix("STUDENT_DASHBOARD")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoints()?;
        if self.gateway.timeout_ms == 0 {
            return Err(ConfigError::Message(
                "gateway.timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn endpoints(&self) -> Result<ServiceEndpoints, ConfigError> {
        ServiceEndpoints::new(
            &self.services.student_service_url,
            &self.services.college_service_url,
        )
    }
}
