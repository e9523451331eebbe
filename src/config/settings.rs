//! Configuration settings structures for flat-viewing
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
use crate::models::BookingRules;
use crate::services::identity::FixedIdentityProvider;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "flat-viewing".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/flat-viewing.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_tenant_placeholder() -> String {
    FixedIdentityProvider::DEFAULT_TENANT_ID.to_string()
}

fn default_webhook_timeout() -> u64 {
    5
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Colours are only emitted when stdout is a terminal
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_log_path")]
    pub path: String,

    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: true,
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level or `EnvFilter` directive, e.g. "info" or "flat_viewing=debug"
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Transforms the file representation into the runtime logger config.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;

        Ok(FileConfig::new(
            self.enabled,
            PathBuf::from(self.path),
            self.append,
            format,
        ))
    }
}

// ============================================================================
// Booking Settings
// ============================================================================

/// Booking window, timeslot grid and store behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSettings {
    #[serde(default = "BookingSettings::default_max_days_ahead")]
    pub max_days_ahead: i64,

    #[serde(default = "BookingSettings::default_min_hours_ahead")]
    pub min_hours_ahead: i64,

    #[serde(default = "BookingSettings::default_slot_minutes")]
    pub slot_minutes: i8,

    #[serde(default = "BookingSettings::default_first_viewing_hour")]
    pub first_viewing_hour: i8,

    #[serde(default = "BookingSettings::default_last_viewing_hour")]
    pub last_viewing_hour: i8,

    /// Tenant id recorded on reservations until authentication is wired in
    #[serde(default = "default_tenant_placeholder")]
    pub tenant_placeholder: String,

    /// Serialize read-modify-write cycles per flat id
    #[serde(default = "default_true")]
    pub serialize_per_flat: bool,

    /// Insert the demo landlord and flats on startup
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl BookingSettings {
    fn default_max_days_ahead() -> i64 {
        BookingRules::default().max_days_ahead
    }

    fn default_min_hours_ahead() -> i64 {
        BookingRules::default().min_hours_ahead
    }

    fn default_slot_minutes() -> i8 {
        BookingRules::default().slot_minutes
    }

    fn default_first_viewing_hour() -> i8 {
        BookingRules::default().first_viewing_hour
    }

    fn default_last_viewing_hour() -> i8 {
        BookingRules::default().last_viewing_hour
    }

    pub fn rules(&self) -> BookingRules {
        BookingRules {
            max_days_ahead: self.max_days_ahead,
            min_hours_ahead: self.min_hours_ahead,
            slot_minutes: self.slot_minutes,
            first_viewing_hour: self.first_viewing_hour,
            last_viewing_hour: self.last_viewing_hour,
        }
    }
}

impl Default for BookingSettings {
    fn default() -> Self {
        let rules = BookingRules::default();
        Self {
            max_days_ahead: rules.max_days_ahead,
            min_hours_ahead: rules.min_hours_ahead,
            slot_minutes: rules.slot_minutes,
            first_viewing_hour: rules.first_viewing_hour,
            last_viewing_hour: rules.last_viewing_hour,
            tenant_placeholder: default_tenant_placeholder(),
            serialize_per_flat: true,
            seed_demo_data: true,
        }
    }
}

// ============================================================================
// Notification Settings
// ============================================================================

/// Delivery channel for landlord and tenant notices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
    /// Write each notice to the application log
    #[default]
    Log,
    /// POST each notice as JSON to `notifications.webhook.url`
    Webhook,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookSettings {
    #[serde(default)]
    pub url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_webhook_timeout")]
    pub timeout_seconds: u64,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_seconds: default_webhook_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub provider: NotifierKind,

    #[serde(default)]
    pub webhook: WebhookSettings,
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logger: LoggerSettings,

    #[serde(default)]
    pub booking: BookingSettings,

    #[serde(default)]
    pub notifications: NotificationSettings,
}
