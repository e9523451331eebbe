//! Configuration validation logic
//!
//! Each section checks its own values; `Settings::validate` runs them all and
//! stops at the first failure.

use crate::config::error::ConfigError;
use crate::config::settings::{
    BookingSettings, FileSettings, LoggerSettings, NotificationSettings, NotifierKind,
    ServerConfig, Settings,
};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request and keep-alive timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host cannot be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Accepts a bare level name or a full `EnvFilter` directive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.level.trim().to_lowercase();
        let is_directive = level.contains('=') || level.contains(',');
        if !is_directive && !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid values are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl FileSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid values are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "Log file path cannot be empty when file output is enabled.",
            ));
        }

        Ok(())
    }
}

impl BookingSettings {
    /// # Validation Rules
    /// - The booking window must be non-empty: `max_days_ahead * 24 > min_hours_ahead`
    /// - `slot_minutes` must divide an hour evenly
    /// - Viewing hours must lie within a day and be ordered
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_days_ahead <= 0 {
            return Err(ConfigError::validation(
                "booking.max_days_ahead",
                "Max days ahead must be greater than 0.",
            ));
        }

        if self.min_hours_ahead < 0 {
            return Err(ConfigError::validation(
                "booking.min_hours_ahead",
                "Min hours ahead cannot be negative.",
            ));
        }

        if self.min_hours_ahead >= self.max_days_ahead * 24 {
            return Err(ConfigError::ValidationError {
                field: "booking.min_hours_ahead".to_string(),
                message: format!(
                    "Min hours ahead ({}) leaves no bookable window within {} days.",
                    self.min_hours_ahead, self.max_days_ahead
                ),
            });
        }

        if self.slot_minutes <= 0 || 60 % self.slot_minutes != 0 {
            return Err(ConfigError::ValidationError {
                field: "booking.slot_minutes".to_string(),
                message: format!(
                    "Slot length ({}) must be a positive divisor of 60.",
                    self.slot_minutes
                ),
            });
        }

        if !(0..24).contains(&self.first_viewing_hour)
            || !(0..24).contains(&self.last_viewing_hour)
        {
            return Err(ConfigError::validation(
                "booking.first_viewing_hour",
                "Viewing hours must be between 0 and 23.",
            ));
        }

        if self.first_viewing_hour > self.last_viewing_hour {
            return Err(ConfigError::ValidationError {
                field: "booking.last_viewing_hour".to_string(),
                message: format!(
                    "Last viewing hour ({}) cannot be before first viewing hour ({}).",
                    self.last_viewing_hour, self.first_viewing_hour
                ),
            });
        }

        if self.tenant_placeholder.trim().is_empty() {
            return Err(ConfigError::validation(
                "booking.tenant_placeholder",
                "Tenant placeholder cannot be empty.",
            ));
        }

        Ok(())
    }
}

impl NotificationSettings {
    /// The webhook URL is only checked when the webhook provider is selected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider != NotifierKind::Webhook {
            return Ok(());
        }

        let url = self.webhook.url.trim();
        if url.is_empty() {
            return Err(ConfigError::validation(
                "notifications.webhook.url",
                "Webhook URL is required when the webhook provider is selected.",
            ));
        }

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::validation(
                "notifications.webhook.url",
                "Webhook URL must start with http:// or https://.",
            ));
        }

        if self.webhook.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "notifications.webhook.timeout_seconds",
                "Webhook timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application.name.trim().is_empty() {
            return Err(ConfigError::validation(
                "application.name",
                "Application name cannot be empty.",
            ));
        }

        self.server.validate()?;
        self.logger.validate()?;
        self.booking.validate()?;
        self.notifications.validate()?;
        Ok(())
    }
}
