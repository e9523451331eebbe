//! Serve command handler
//!
//! Handles the dry-run path of `serve`; the real startup happens in
//! `main` through [`crate::server::Server`].

use crate::config::Settings;
use crate::error::AppResult;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validates configuration and prints what the server would do.
    ///
    /// # Errors
    /// Configuration validation errors
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        for line in self.summary() {
            println!("✓ {}", line);
        }
        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    /// Human-readable lines describing the effective configuration.
    pub fn summary(&self) -> Vec<String> {
        let booking = &self.config.booking;
        let mut lines = vec![
            "Configuration is valid".to_string(),
            format!("Server would bind to: {}", self.config.server.address()),
            format!(
                "Viewing slots: {} minutes, {:02}:00-{:02}:00, {}h to {} days ahead",
                booking.slot_minutes,
                booking.first_viewing_hour,
                booking.last_viewing_hour + 1,
                booking.min_hours_ahead,
                booking.max_days_ahead
            ),
            format!("Notifications via: {:?}", self.config.notifications.provider),
            format!("Log level: {}", self.config.logger.level),
        ];
        if booking.seed_demo_data {
            lines.push("Demo flats will be seeded".to_string());
        }
        lines
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
